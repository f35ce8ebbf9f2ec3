//! `passvault edit`: change the fields of an existing record.
//!
//! With any of `--name`, `--secret`, `--url`, `--note` only those fields
//! change.  Without them every field is prompted for, and pressing Enter
//! keeps the current value.

use dialoguer::{Input, Password};
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, select_record, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::Credential;

/// New values requested on the command line.
#[derive(Debug, Default)]
pub struct FieldChanges {
    pub name: Option<String>,
    pub secret: Option<String>,
    pub url: Option<String>,
    pub note: Option<String>,
}

impl FieldChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.secret.is_none() && self.url.is_none() && self.note.is_none()
    }

    /// Overwrite the fields of `record` that have a new value.
    fn apply(self, record: &mut Credential) -> Result<()> {
        if let Some(name) = self.name {
            if name.trim().is_empty() {
                return Err(VaultError::CommandFailed("name cannot be empty".into()));
            }
            record.name = name;
        }
        if let Some(secret) = self.secret {
            if secret.is_empty() {
                return Err(VaultError::CommandFailed("password cannot be empty".into()));
            }
            record.secret_value = secret;
        }
        if let Some(url) = self.url {
            record.url = url;
        }
        if let Some(note) = self.note {
            record.note = note;
        }
        Ok(())
    }
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, query: &str, changes: FieldChanges) -> Result<()> {
    if changes.secret.is_some() {
        output::warning("Secret provided on command line; it may appear in shell history.");
    }

    let (_, mut store) = open_vault(cli)?;
    let mut record = select_record(&store, query)?;

    let changes = if changes.is_empty() {
        prompt_changes(&record)?
    } else {
        changes
    };
    changes.apply(&mut record)?;

    let name = record.name.clone();
    store.update(record)?;
    output::success(&format!("Updated '{name}'"));

    Ok(())
}

/// Ask for every field, defaulting to the current value.
fn prompt_changes(record: &Credential) -> Result<FieldChanges> {
    let prompt_err = |e: dialoguer::Error| VaultError::CommandFailed(format!("input prompt: {e}"));

    let name: String = Input::new()
        .with_prompt("Name")
        .with_initial_text(record.name.clone())
        .interact_text()
        .map_err(prompt_err)?;

    let secret = Zeroizing::new(
        Password::new()
            .with_prompt("Password (Enter keeps the current one)")
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_err)?,
    );

    let url: String = Input::new()
        .with_prompt("URL")
        .with_initial_text(record.url.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let note: String = Input::new()
        .with_prompt("Note")
        .with_initial_text(record.note.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    Ok(FieldChanges {
        name: Some(name),
        secret: (!secret.is_empty()).then(|| secret.to_string()),
        url: Some(url),
        note: Some(note),
    })
}
