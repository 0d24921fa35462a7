use std::{
    io::{BufRead, Write},
    sync::Arc,
};

use accountkit_core::{
    delete_account::{ControlKind, InputKind},
    ActionOutcome, DeleteAccountFlow, SourceTranslator, XrpcAccountService, XrpcConfig,
    DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
};
use clap::Args;
use eyre::{bail, eyre, Result};

use crate::{
    store::FileSessionStore,
    terminal::{self, Console, TerminalHost},
};

#[derive(Debug, Args)]
pub struct DeleteAccountArgs {
    /// Account password. Prompted for when absent.
    #[arg(long, env = "ACCOUNTKIT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

/// Runs the account deletion modal for the store's current account.
pub async fn run(store: Arc<FileSessionStore>, args: DeleteAccountArgs) -> Result<()> {
    let stored = store
        .current()
        .ok_or_else(|| eyre!("no current account; add one with `accountkit accounts add`"))?;

    let config = XrpcConfig {
        service_url: stored.service_url.clone(),
        timeout_secs: args.timeout_secs,
        max_retries: DEFAULT_MAX_RETRIES,
    };
    let service = XrpcAccountService::new(config, stored.access_jwt.clone())?;
    let host = Arc::new(TerminalHost::default());
    let flow = DeleteAccountFlow::for_current_account(
        Arc::new(service),
        store,
        host.clone(),
        Arc::new(SourceTranslator),
    )?;

    drive(&flow, &host, &mut terminal::stdio(), args.password).await
}

/// Walks the user through both screens.
async fn drive<R: BufRead, W: Write>(
    flow: &DeleteAccountFlow,
    host: &TerminalHost,
    console: &mut Console<R, W>,
    password: Option<String>,
) -> Result<()> {
    if !request_code(flow, console).await? || !confirm_deletion(flow, console, password).await?
    {
        return console.line("Cancelled.");
    }

    if !host.is_closed() {
        bail!("account deleted but the modal was not closed");
    }
    Ok(())
}

/// First screen. Returns `false` if the user cancelled.
async fn request_code<R: BufRead, W: Write>(
    flow: &DeleteAccountFlow,
    console: &mut Console<R, W>,
) -> Result<bool> {
    loop {
        let view = flow.view();
        console.print_view(&view)?;
        let send = view
            .controls
            .iter()
            .find(|control| control.kind == ControlKind::SendEmail)
            .ok_or_else(|| eyre!("send control missing in state {:?}", view.state))?;

        if !console.confirm(&format!("{}?", send.label))? {
            flow.cancel();
            return Ok(false);
        }
        match flow.request_code().await {
            ActionOutcome::Completed => return Ok(true),
            ActionOutcome::Failed { message } => {
                tracing::warn!("code request failed: {message}");
            }
            ActionOutcome::Ignored => bail!("code request ignored in state {:?}", flow.state()),
        }
    }
}

/// Confirmation screen. Returns `false` if the user cancelled.
async fn confirm_deletion<R: BufRead, W: Write>(
    flow: &DeleteAccountFlow,
    console: &mut Console<R, W>,
    mut password: Option<String>,
) -> Result<bool> {
    loop {
        let view = flow.view();
        console.print_view(&view)?;

        for input in &view.inputs {
            match input.kind {
                InputKind::ConfirmationCode => {
                    console.line(&input.description)?;
                    let label = format!("{} (empty to cancel):", input.placeholder);
                    let code = console.prompt(&label)?.filter(|code| !code.trim().is_empty());
                    let Some(code) = code else {
                        flow.cancel();
                        return Ok(false);
                    };
                    flow.set_confirmation_code(code);
                }
                InputKind::Password => {
                    let value = match password.take() {
                        Some(value) => value,
                        None => {
                            console.line(&input.description)?;
                            console
                                .prompt(&format!("{}:", input.placeholder))?
                                .unwrap_or_default()
                        }
                    };
                    flow.set_password(value);
                }
            }
        }

        match flow.confirm_deletion().await {
            ActionOutcome::Completed => return Ok(true),
            ActionOutcome::Failed { message } => {
                tracing::warn!("account deletion failed: {message}");
            }
            ActionOutcome::Ignored => bail!("deletion ignored in state {:?}", flow.state()),
        }
    }
}
