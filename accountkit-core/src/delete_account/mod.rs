//! The account deletion modal.
//!
//! A two step flow: the user first asks the service to email a confirmation
//! code, then submits that code together with their password. On success the
//! host is walked through a fixed teardown sequence.
//!
//! The flow is headless. The host draws [`DeleteAccountFlow::view`] after each
//! call and forwards button presses and text edits to the flow.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::{clean_error, AccountKitError},
    i18n::{Message, Translator},
    session::{Account, SessionStore},
    AccountService, ModalHost,
};

mod state;
mod view;

pub use state::{FlowState, Phase};
pub use view::{
    Control, ControlKind, ControlStyle, DeleteAccountView, InputField, InputKind,
    SHEET_SNAP_POINT,
};

use state::{strip_whitespace, FormState};

#[cfg(test)]
mod tests;

/// Result of a user action.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum ActionOutcome {
    /// The action is not available in the current state (its control is not
    /// shown). Nothing changed.
    Ignored,
    /// The action finished successfully.
    Completed,
    /// The request failed; `message` is now displayed in the form.
    Failed {
        /// The message shown to the user.
        message: String,
    },
}

/// One side effect of a successful deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TeardownStep {
    ShowToast,
    ResetToHome,
    RemoveAccount,
    ClearCurrentAccount,
    CloseModal,
}

/// Side effects of a successful deletion, in order. Navigation happens while
/// the account still exists locally.
const TEARDOWN: [TeardownStep; 5] = [
    TeardownStep::ShowToast,
    TeardownStep::ResetToHome,
    TeardownStep::RemoveAccount,
    TeardownStep::ClearCurrentAccount,
    TeardownStep::CloseModal,
];

/// Marks a request as in flight; clears the mark when dropped, including when
/// the host abandons the future before it completes.
struct InFlight<'a> {
    state: &'a Mutex<FormState>,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a Mutex<FormState>, form: &mut FormState) -> Self {
        form.error_message.clear();
        form.processing = true;
        Self { state }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.state).processing = false;
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Controller of the account deletion modal for one account.
///
/// Holding a `DeleteAccountFlow` proves an account is loaded: it can only be
/// built from an [`Account`], or from a session store that has a current one.
#[derive(uniffi::Object)]
pub struct DeleteAccountFlow {
    account: Account,
    service: Arc<dyn AccountService>,
    session: Arc<dyn SessionStore>,
    host: Arc<dyn ModalHost>,
    translator: Arc<dyn Translator>,
    state: Mutex<FormState>,
}

#[uniffi::export(async_runtime = "tokio")]
impl DeleteAccountFlow {
    /// Opens the flow for `account`.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(
        account: Account,
        service: Arc<dyn AccountService>,
        session: Arc<dyn SessionStore>,
        host: Arc<dyn ModalHost>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        log::debug!("opening account deletion for {}", account.did);
        Self {
            account,
            service,
            session,
            host,
            translator,
            state: Mutex::new(FormState::default()),
        }
    }

    /// Opens the flow for the session's current account.
    ///
    /// # Errors
    /// Returns [`AccountKitError::NoCurrentAccount`] when no account is signed in.
    /// This is a bug in the caller, which must not offer account deletion then.
    #[uniffi::constructor]
    pub fn for_current_account(
        service: Arc<dyn AccountService>,
        session: Arc<dyn SessionStore>,
        host: Arc<dyn ModalHost>,
        translator: Arc<dyn Translator>,
    ) -> Result<Self, AccountKitError> {
        let account = session
            .current_account()
            .ok_or(AccountKitError::NoCurrentAccount)?;
        Ok(Self::new(account, service, session, host, translator))
    }

    /// The account this flow deletes.
    #[must_use]
    pub fn account(&self) -> Account {
        self.account.clone()
    }

    /// The current state of the flow.
    #[must_use]
    pub fn state(&self) -> FlowState {
        lock(&self.state).flow_state()
    }

    /// Renders the modal.
    #[must_use]
    pub fn view(&self) -> DeleteAccountView {
        view::render(&lock(&self.state), &self.account, self.translator.as_ref())
    }

    /// Updates the confirmation code input. Ignored before the email is sent.
    pub fn set_confirmation_code(&self, code: String) {
        let mut form = lock(&self.state);
        if form.email_sent && !form.closed {
            form.confirmation_code = code;
        }
    }

    /// Updates the password input. Ignored before the email is sent.
    pub fn set_password(&self, password: String) {
        let mut form = lock(&self.state);
        if form.email_sent && !form.closed {
            form.password = SecretString::from(password);
        }
    }

    /// Asks the service to email a deletion confirmation code.
    ///
    /// Available on the first screen while no request is in flight.
    pub async fn request_code(&self) -> ActionOutcome {
        let in_flight = {
            let mut form = lock(&self.state);
            if form.phase() != Phase::RequestCode || !form.flow_state().is_interactive() {
                return ActionOutcome::Ignored;
            }
            InFlight::begin(&self.state, &mut form)
        };

        log::info!("requesting deletion code for {}", self.account.did);
        let result = self.service.request_account_delete().await;

        let outcome = {
            let mut form = lock(&self.state);
            match result {
                Ok(()) => {
                    form.email_sent = true;
                    ActionOutcome::Completed
                }
                Err(e) => {
                    log::error!("requesting deletion code failed: {e}");
                    form.error_message = clean_error(&e);
                    ActionOutcome::Failed {
                        message: form.error_message.clone(),
                    }
                }
            }
        };
        drop(in_flight);
        outcome
    }

    /// Submits the confirmation code and password, deleting the account.
    ///
    /// Available on the confirmation screen while no request is in flight. On
    /// success the host is notified, navigated home, the account is removed
    /// from the session store and the modal is closed.
    pub async fn confirm_deletion(&self) -> ActionOutcome {
        let (in_flight, token, password) = {
            let mut form = lock(&self.state);
            if form.phase() != Phase::ConfirmDeletion || !form.flow_state().is_interactive()
            {
                return ActionOutcome::Ignored;
            }
            let token = strip_whitespace(&form.confirmation_code);
            let password = form.password.expose_secret().to_string();
            (InFlight::begin(&self.state, &mut form), token, password)
        };

        log::info!("deleting account {}", self.account.did);
        let result = self
            .service
            .delete_account(self.account.did.clone(), password, token)
            .await;

        match result {
            Ok(()) => {
                lock(&self.state).closed = true;
                drop(in_flight);
                log::info!("account {} deleted", self.account.did);
                self.teardown();
                ActionOutcome::Completed
            }
            Err(e) => {
                log::error!("deleting account failed: {e}");
                let message = clean_error(&e);
                lock(&self.state).error_message.clone_from(&message);
                drop(in_flight);
                ActionOutcome::Failed { message }
            }
        }
    }

    /// Dismisses the modal without contacting the service.
    ///
    /// Not available while a request is in flight.
    pub fn cancel(&self) -> ActionOutcome {
        {
            let mut form = lock(&self.state);
            if !form.flow_state().is_interactive() {
                return ActionOutcome::Ignored;
            }
            form.closed = true;
        }
        log::debug!("account deletion cancelled");
        self.host.close_modal();
        ActionOutcome::Completed
    }
}

impl DeleteAccountFlow {
    /// Runs [`TEARDOWN`] in order. Must be called without holding the state lock,
    /// as hosts commonly re-render from inside these callbacks.
    fn teardown(&self) {
        for step in TEARDOWN {
            match step {
                TeardownStep::ShowToast => {
                    let message = Message::AccountDeleted.translate(self.translator.as_ref());
                    self.host.show_toast(message);
                }
                TeardownStep::ResetToHome => self.host.reset_to_home(),
                TeardownStep::RemoveAccount => {
                    self.session.remove_account(self.account.clone());
                }
                TeardownStep::ClearCurrentAccount => self.session.clear_current_account(),
                TeardownStep::CloseModal => self.host.close_modal(),
            }
        }
    }
}
