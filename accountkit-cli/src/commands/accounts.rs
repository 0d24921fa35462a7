use std::str::FromStr;

use accountkit_core::{Environment, XrpcConfig};
use clap::{Args, Subcommand};
use eyre::{eyre, Result};

use crate::store::{FileSessionStore, StoredAccount};

#[derive(Debug, Subcommand)]
pub enum AccountsCommand {
    /// Lists stored accounts; the current one is marked with `*`.
    List,
    /// Stores an account session.
    Add(AddArgs),
    /// Makes the account with the given DID or handle current.
    Use {
        /// DID or handle.
        account: String,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Account DID.
    #[arg(long)]
    did: String,

    /// Account handle.
    #[arg(long)]
    handle: String,

    /// Access token of an existing session.
    #[arg(long, env = "ACCOUNTKIT_ACCESS_JWT", hide_env_values = true)]
    access_jwt: String,

    /// PDS URL. Defaults to the environment's entryway.
    #[arg(long)]
    service_url: Option<String>,

    /// `staging` or `production`.
    #[arg(long, default_value = "production")]
    environment: String,

    /// Make this the current account.
    #[arg(long)]
    make_current: bool,
}

pub fn run(store: &FileSessionStore, command: AccountsCommand) -> Result<()> {
    match command {
        AccountsCommand::List => {
            let current = store.current().map(|account| account.did);
            for account in store.accounts() {
                let marker = if current.as_ref() == Some(&account.did) {
                    '*'
                } else {
                    ' '
                };
                println!(
                    "{marker} {} {} ({})",
                    account.handle, account.did, account.service_url
                );
            }
        }
        AccountsCommand::Add(args) => {
            let environment = Environment::from_str(&args.environment)
                .map_err(|_| eyre!("unknown environment {}", args.environment))?;
            let service_url = args.service_url.unwrap_or_else(|| {
                XrpcConfig::default_service_url(environment).to_string()
            });
            store.upsert(
                StoredAccount {
                    did: args.did,
                    handle: args.handle,
                    service_url,
                    access_jwt: args.access_jwt,
                },
                args.make_current,
            )?;
        }
        AccountsCommand::Use { account } => {
            let account = store.switch_to(&account)?;
            tracing::info!(did = %account.did, "switched current account");
        }
    }
    Ok(())
}
