//! `passvault get`: print the secret of a single record.

use crate::cli::{open_vault, select_record, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, query: &str) -> Result<()> {
    let (_, store) = open_vault(cli)?;

    // Print only the value so the output can be piped.
    let record = select_record(&store, query)?;
    println!("{}", record.secret_value);

    Ok(())
}
