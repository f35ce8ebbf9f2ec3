//! `passvault list`: display all records in a table.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, show_secrets: bool) -> Result<()> {
    let (settings, store) = open_vault(cli)?;

    let records = store.list_records();
    output::info(&format!("{} password(s) stored", records.len()));
    output::print_records_table(&records, show_secrets || settings.show_secrets);

    Ok(())
}
