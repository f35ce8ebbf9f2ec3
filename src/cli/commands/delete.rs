//! `passvault delete`: remove a record from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, select_record, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, query: &str, force: bool) -> Result<()> {
    let (_, mut store) = open_vault(cli)?;
    let record = select_record(&store, query)?;
    let label = output::describe(&record);

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{label}'?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.delete(&record.id)?;
    output::success(&format!("Deleted '{label}' ({} left)", store.len()));

    Ok(())
}
