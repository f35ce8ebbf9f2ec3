//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Credential;

/// Timestamp format used in tables.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// One-line label for a record, used in selection menus.
pub fn describe(record: &Credential) -> String {
    if record.url.is_empty() {
        record.name.clone()
    } else {
        format!("{} ({})", record.name, record.url)
    }
}

/// Mask a secret for display.
pub fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "\u{2022}".repeat(8)
    }
}

/// Build the records table (Name, Secret, URL, Note, Created, Edited).
///
/// The record id is deliberately left out.
pub fn records_table(records: &[Credential], show_secrets: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Secret", "URL", "Note", "Created", "Edited"]);

    for r in records {
        let secret = if show_secrets {
            r.secret_value.clone()
        } else {
            mask(&r.secret_value)
        };
        table.add_row(vec![
            r.name.clone(),
            secret,
            r.url.clone(),
            r.note.clone(),
            r.created_at.format(TIME_FORMAT).to_string(),
            r.last_edited_at.format(TIME_FORMAT).to_string(),
        ]);
    }

    table
}

/// Print a table of records, or a hint when there are none.
pub fn print_records_table(records: &[Credential], show_secrets: bool) {
    if records.is_empty() {
        info("No passwords found.");
        return;
    }

    println!("{}", records_table(records, show_secrets));
}
