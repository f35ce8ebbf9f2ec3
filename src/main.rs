use clap::Parser;
use passvault::cli::commands::edit::FieldChanges;
use passvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `passvault=debug`).
const LOG_ENV: &str = "PASSVAULT_LOG";

fn main() {
    // Logs go to stderr; stdout carries command output such as `get`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::List { show_secrets } => passvault::cli::commands::list::execute(&cli, show_secrets),
        Commands::Find {
            ref query,
            show_secrets,
        } => passvault::cli::commands::find::execute(&cli, query, show_secrets),
        Commands::Add {
            ref name,
            ref url,
            ref note,
            ref secret,
        } => passvault::cli::commands::add::execute(&cli, name, url, note, secret.as_deref()),
        Commands::Get { ref query } => passvault::cli::commands::get::execute(&cli, query),
        Commands::Edit {
            ref query,
            ref name,
            ref secret,
            ref url,
            ref note,
        } => {
            let changes = FieldChanges {
                name: name.clone(),
                secret: secret.clone(),
                url: url.clone(),
                note: note.clone(),
            };
            passvault::cli::commands::edit::execute(&cli, query, changes)
        }
        Commands::Delete { ref query, force } => {
            passvault::cli::commands::delete::execute(&cli, query, force)
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
