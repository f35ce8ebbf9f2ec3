//! `passvault add`: store a new password.

use crate::cli::output;
use crate::cli::{open_vault, read_secret, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::CredentialDraft;

/// Execute the `add` command.
pub fn execute(cli: &Cli, name: &str, url: &str, note: &str, secret: Option<&str>) -> Result<()> {
    if name.trim().is_empty() {
        return Err(VaultError::CommandFailed("name cannot be empty".into()));
    }

    // Read the secret before unlocking so piped input isn't mistaken
    // for the master password.
    let secret_value = read_secret(secret, &format!("Password for {name}"))?;
    if secret_value.is_empty() {
        return Err(VaultError::CommandFailed("password cannot be empty".into()));
    }

    let (_, mut store) = open_vault(cli)?;

    let draft = CredentialDraft {
        name: name.to_string(),
        secret_value: secret_value.to_string(),
        url: url.to_string(),
        note: note.to_string(),
    };
    store.add(draft)?;

    output::success(&format!("Added '{name}' ({} total)", store.len()));

    Ok(())
}
