//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::{Credential, VaultStore};

/// Environment variable consulted before prompting for the master password.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// How many times an interactive unlock may be retried.
const MAX_UNLOCK_ATTEMPTS: usize = 3;

/// PassVault CLI: encrypted password vault.
#[derive(Parser)]
#[command(name = "passvault", about = "Encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// PassVault home directory holding config.toml (default: ~/.passvault)
    #[arg(long, env = "PASSVAULT_HOME", global = true)]
    pub home: Option<PathBuf>,

    /// Vault file to use (overrides config.toml)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault
    Init,

    /// List all stored passwords
    List {
        /// Show secret values instead of masking them
        #[arg(long)]
        show_secrets: bool,
    },

    /// Search passwords by name, URL, or note
    Find {
        /// Text to look for (case-insensitive)
        query: String,
        /// Show secret values instead of masking them
        #[arg(long)]
        show_secrets: bool,
    },

    /// Add a password
    Add {
        /// Name of the entry (e.g. "Google")
        #[arg(short, long)]
        name: String,
        /// Site where the password is used
        #[arg(short, long, default_value = "")]
        url: String,
        /// Free-text note
        #[arg(long, default_value = "")]
        note: String,
        /// Secret value (omit for interactive prompt)
        #[arg(long)]
        secret: Option<String>,
    },

    /// Print the secret of a matching entry
    Get {
        /// Name, URL, or note of the entry
        query: String,
    },

    /// Edit a matching entry
    Edit {
        /// Name, URL, or note of the entry
        query: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New secret value
        #[arg(long)]
        secret: Option<String>,
        /// New URL
        #[arg(long)]
        url: Option<String>,
        /// New note
        #[arg(long)]
        note: Option<String>,
    },

    /// Delete a matching entry
    Delete {
        /// Name, URL, or note of the entry
        query: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the PassVault home directory from `--home` / `PASSVAULT_HOME`.
pub fn home_dir(cli: &Cli) -> PathBuf {
    cli.home.clone().unwrap_or_else(Settings::default_home)
}

/// Load settings from the home directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    Settings::load(&home_dir(cli))
}

/// Build the full path to the vault file from CLI arguments and settings.
pub fn vault_path(cli: &Cli, settings: &Settings) -> PathBuf {
    match &cli.vault {
        Some(path) => path.clone(),
        None => settings.vault_path(&home_dir(cli)),
    }
}

/// Read the master password from `PASSVAULT_PASSWORD` or an interactive prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used by `init`).
///
/// Also respects `PASSVAULT_PASSWORD` for scripted usage.
/// Enforces the configured minimum length.
pub fn prompt_new_password(min_len: usize) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        if pw.chars().count() < min_len {
            return Err(VaultError::CommandFailed(format!(
                "master password must be at least {min_len} characters"
            )));
        }
        return Ok(pw);
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose master password")
                .with_confirmation(
                    "Repeat master password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if password.chars().count() < min_len {
            output::warning(&format!(
                "Master password must be at least {min_len} characters. Try again."
            ));
            continue;
        }

        return Ok(password);
    }
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Load settings and unlock the vault.
///
/// With `PASSVAULT_PASSWORD` set there is exactly one attempt; an
/// interactive prompt is retried on a wrong password.
pub fn open_vault(cli: &Cli) -> Result<(Settings, VaultStore)> {
    let settings = load_settings(cli)?;
    let path = vault_path(cli, &settings);

    if !VaultStore::exists(&path) {
        output::tip("Run `passvault init` to create a vault.");
        return Err(VaultError::VaultNotFound(path));
    }

    let interactive = password_from_env().is_none();
    let mut attempt = 1;
    loop {
        let password = prompt_password()?;
        match VaultStore::unlock(&path, password.as_bytes()) {
            Err(VaultError::WrongPassword) if interactive && attempt < MAX_UNLOCK_ATTEMPTS => {
                output::warning("Wrong master password, try again.");
                attempt += 1;
            }
            result => return result.map(|store| (settings, store)),
        }
    }
}

/// Read a secret value from one of three sources: an inline argument,
/// piped stdin, or a hidden interactive prompt.
pub fn read_secret(inline: Option<&str>, prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        output::warning("Secret provided on command line; it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(buf.trim_end().to_string()));
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Pick exactly one record matching `query`.
///
/// Several matches open a selection menu on a terminal; otherwise the
/// caller must narrow the query.
pub fn select_record(store: &VaultStore, query: &str) -> Result<Credential> {
    let mut matches = store.find(query);

    match matches.len() {
        0 => Err(VaultError::NoMatch(query.to_string())),
        1 => Ok(matches.remove(0)),
        n if io::stdin().is_terminal() => {
            let items: Vec<String> = matches.iter().map(output::describe).collect();
            let index = dialoguer::Select::new()
                .with_prompt(format!("{n} entries match '{query}', pick one"))
                .items(&items)
                .default(0)
                .interact_opt()
                .map_err(|e| VaultError::CommandFailed(format!("selection prompt: {e}")))?
                .ok_or(VaultError::UserCancelled)?;
            Ok(matches.swap_remove(index))
        }
        n => Err(VaultError::CommandFailed(format!(
            "{n} entries match '{query}', use a more specific query"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn vault_flag_overrides_settings() {
        let cli = parse(&["passvault", "--vault", "/tmp/custom.pvlt", "list"]);
        let path = vault_path(&cli, &Settings::default());
        assert_eq!(path, PathBuf::from("/tmp/custom.pvlt"));
    }

    #[test]
    fn vault_path_defaults_to_home() {
        let cli = parse(&["passvault", "--home", "/tmp/pv-home", "list"]);
        let path = vault_path(&cli, &Settings::default());
        assert_eq!(path, PathBuf::from("/tmp/pv-home/vault.pvlt"));
    }

    #[test]
    fn add_requires_name() {
        assert!(Cli::try_parse_from(["passvault", "add"]).is_err());
    }

    #[test]
    fn edit_fields_are_optional() {
        let cli = parse(&["passvault", "edit", "google", "--url", "google.com"]);
        match cli.command {
            Commands::Edit {
                query,
                name,
                secret,
                url,
                note,
            } => {
                assert_eq!(query, "google");
                assert_eq!(url.as_deref(), Some("google.com"));
                assert!(name.is_none() && secret.is_none() && note.is_none());
            }
            _ => panic!("expected edit"),
        }
    }
}
