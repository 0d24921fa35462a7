//! Developer CLI for `AccountKit`.

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod store;
mod terminal;

use commands::{accounts::AccountsCommand, delete_account::DeleteAccountArgs};
use store::FileSessionStore;

#[derive(Debug, Parser)]
#[command(name = "accountkit", version, about)]
struct Cli {
    /// Path of the account store. Defaults to `<data dir>/accountkit/accounts.json`.
    #[arg(long, env = "ACCOUNTKIT_STORE", global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inspects and edits the local account store.
    Accounts {
        #[command(subcommand)]
        command: AccountsCommand,
    },
    /// Deletes the current account, confirming with an emailed code.
    DeleteAccount(DeleteAccountArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli.store.map_or_else(store::default_path, Ok)?;
    let store = Arc::new(FileSessionStore::open(&path)?);

    match cli.command {
        Command::Accounts { command } => commands::accounts::run(&store, command),
        Command::DeleteAccount(args) => commands::delete_account::run(store, args).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_delete_account() {
        let cli = Cli::try_parse_from([
            "accountkit",
            "--store",
            "/tmp/accounts.json",
            "delete-account",
            "--timeout-secs",
            "10",
        ])
        .unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/accounts.json")));
        assert!(matches!(cli.command, Command::DeleteAccount(_)));
    }
}
