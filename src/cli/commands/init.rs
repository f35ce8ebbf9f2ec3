//! `passvault init`: create a new, empty vault.

use crate::cli::output;
use crate::cli::{home_dir, load_settings, prompt_new_password, vault_path, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::VaultStore;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let path = vault_path(cli, &settings);

    // 1. Refuse to overwrite an existing vault.
    if VaultStore::exists(&path) {
        output::tip("Use `passvault add` to store passwords in the existing vault.");
        return Err(VaultError::VaultAlreadyExists(path));
    }

    // 2. Prompt for a new master password (with confirmation).
    let password = prompt_new_password(settings.min_password_len)?;

    // 3. Derive the key and write the empty vault.
    output::info("Deriving key, this takes a moment...");
    let store = VaultStore::create(&path, password.as_bytes())?;

    output::success(&format!("Vault created at {}", store.path().display()));
    if cli.vault.is_none() && cli.home.is_none() {
        output::tip(&format!(
            "Settings are read from {}",
            home_dir(cli).join("config.toml").display()
        ));
    }
    output::tip("Run `passvault add --name <NAME>` to store your first password.");

    Ok(())
}
