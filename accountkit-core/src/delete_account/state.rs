use secrecy::SecretString;

/// Which screen of the modal is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum Phase {
    /// Ask the service to email a confirmation code.
    RequestCode,
    /// Enter the code and password and delete the account.
    ConfirmDeletion,
}

/// Observable state of an account deletion flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FlowState {
    /// Waiting for the user to request a code.
    IdleRequest,
    /// The code request is in flight.
    LoadingRequest,
    /// The code request failed; the user may try again.
    ErrorRequest,
    /// Waiting for the code and password.
    IdleConfirm,
    /// The deletion request is in flight.
    LoadingConfirm,
    /// The deletion request failed; the user may try again.
    ErrorConfirm,
    /// The modal was dismissed, either by cancelling or after deletion.
    Closed,
}

impl FlowState {
    /// Whether a user action may start from this state.
    pub(crate) const fn is_interactive(self) -> bool {
        !matches!(
            self,
            Self::LoadingRequest | Self::LoadingConfirm | Self::Closed
        )
    }
}

/// Form state owned by one flow instance.
#[derive(Debug)]
pub(crate) struct FormState {
    pub(crate) email_sent: bool,
    pub(crate) confirmation_code: String,
    pub(crate) password: SecretString,
    pub(crate) processing: bool,
    pub(crate) error_message: String,
    pub(crate) closed: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            email_sent: false,
            confirmation_code: String::new(),
            password: SecretString::from(String::new()),
            processing: false,
            error_message: String::new(),
            closed: false,
        }
    }
}

impl FormState {
    pub(crate) const fn phase(&self) -> Phase {
        if self.email_sent {
            Phase::ConfirmDeletion
        } else {
            Phase::RequestCode
        }
    }

    pub(crate) fn flow_state(&self) -> FlowState {
        if self.closed {
            return FlowState::Closed;
        }
        let failed = !self.error_message.is_empty();
        match (self.phase(), self.processing, failed) {
            (Phase::RequestCode, true, _) => FlowState::LoadingRequest,
            (Phase::RequestCode, false, true) => FlowState::ErrorRequest,
            (Phase::RequestCode, false, false) => FlowState::IdleRequest,
            (Phase::ConfirmDeletion, true, _) => FlowState::LoadingConfirm,
            (Phase::ConfirmDeletion, false, true) => FlowState::ErrorConfirm,
            (Phase::ConfirmDeletion, false, false) => FlowState::IdleConfirm,
        }
    }
}

/// Removes every whitespace character, keeping the order of the rest.
pub(crate) fn strip_whitespace(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}
