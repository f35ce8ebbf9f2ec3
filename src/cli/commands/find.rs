//! `passvault find`: search records by name, URL, or note.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `find` command.
pub fn execute(cli: &Cli, query: &str, show_secrets: bool) -> Result<()> {
    if query.is_empty() {
        output::tip("An empty query matches nothing; use `passvault list` to see everything.");
    }

    let (settings, store) = open_vault(cli)?;

    let records = store.find(query);
    output::info(&format!("{} match(es) for '{query}'", records.len()));
    output::print_records_table(&records, show_secrets || settings.show_secrets);

    Ok(())
}
