use super::state::{FlowState, FormState, Phase};
use crate::{
    i18n::{Message, Translator},
    session::Account,
};

/// Height of the bottom sheet presenting the modal.
pub const SHEET_SNAP_POINT: &str = "60%";

/// Everything the host needs to draw the account deletion modal.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct DeleteAccountView {
    /// Modal title.
    pub title: String,
    /// Handle of the account being deleted, shown quoted after the title.
    pub handle: String,
    /// Current screen.
    pub phase: Phase,
    /// Current state of the flow.
    pub state: FlowState,
    /// Explanatory text at the top of the request screen. The confirmation
    /// screen has none; each of its inputs carries a prompt instead.
    pub description: Option<String>,
    /// Text inputs, only present on the confirmation screen.
    pub inputs: Vec<InputField>,
    /// Error from the most recent failed request.
    pub error: Option<String>,
    /// When set, show an activity indicator in place of the controls.
    pub loading: bool,
    /// Buttons, in display order. Empty while loading or once closed.
    pub controls: Vec<Control>,
    /// Snap point of the sheet presenting the modal.
    pub snap_point: String,
}

/// Identifies a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum InputKind {
    /// The emailed confirmation code.
    ConfirmationCode,
    /// The account password.
    Password,
}

/// A text input of the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct InputField {
    /// Which value the input edits.
    pub kind: InputKind,
    /// Prompt displayed above the input; also labels it for accessibility.
    pub description: String,
    /// Placeholder inside the empty input.
    pub placeholder: String,
    /// Current value. Never populated for secure inputs.
    pub value: Option<String>,
    /// Whether typed characters must be masked.
    pub secure: bool,
    /// Accessibility label.
    pub accessibility_label: String,
    /// Accessibility hint.
    pub accessibility_hint: String,
}

/// Identifies a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ControlKind {
    /// Requests the confirmation email.
    SendEmail,
    /// Deletes the account.
    ConfirmDelete,
    /// Dismisses the modal.
    Cancel,
}

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ControlStyle {
    /// Main call to action.
    Primary,
    /// Irreversible action.
    Destructive,
    /// Low-emphasis action.
    Secondary,
}

/// A button of the modal.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct Control {
    /// Action triggered by the button.
    pub kind: ControlKind,
    /// Visual weight.
    pub style: ControlStyle,
    /// Button text.
    pub label: String,
    /// Accessibility label.
    pub accessibility_label: String,
    /// Accessibility hint, if any.
    pub accessibility_hint: Option<String>,
}

pub(crate) fn render(
    form: &FormState,
    account: &Account,
    translator: &dyn Translator,
) -> DeleteAccountView {
    let tr = |message: Message| message.translate(translator);
    let phase = form.phase();
    let state = form.flow_state();

    let (description, inputs) = match phase {
        Phase::RequestCode => (Some(tr(Message::RequestCodeDescription)), Vec::new()),
        Phase::ConfirmDeletion => (
            None,
            vec![
                InputField {
                    kind: InputKind::ConfirmationCode,
                    description: tr(Message::ConfirmCodeDescription),
                    placeholder: tr(Message::ConfirmationCode),
                    value: Some(form.confirmation_code.clone()),
                    secure: false,
                    accessibility_label: tr(Message::ConfirmationCode),
                    accessibility_hint: tr(Message::ConfirmationCodeHint),
                },
                InputField {
                    kind: InputKind::Password,
                    description: tr(Message::PasswordDescription),
                    placeholder: tr(Message::Password),
                    value: None,
                    secure: true,
                    accessibility_label: tr(Message::Password),
                    accessibility_hint: tr(Message::PasswordHint),
                },
            ],
        ),
    };

    let controls = if state.is_interactive() {
        let primary = match phase {
            Phase::RequestCode => Control {
                kind: ControlKind::SendEmail,
                style: ControlStyle::Primary,
                label: tr(Message::SendEmail),
                accessibility_label: tr(Message::SendEmailLabel),
                accessibility_hint: Some(tr(Message::SendEmailHint)),
            },
            Phase::ConfirmDeletion => Control {
                kind: ControlKind::ConfirmDelete,
                style: ControlStyle::Destructive,
                label: tr(Message::DeleteMyAccount),
                accessibility_label: tr(Message::DeleteMyAccountLabel),
                accessibility_hint: None,
            },
        };
        let cancel = Control {
            kind: ControlKind::Cancel,
            style: ControlStyle::Secondary,
            label: tr(Message::Cancel),
            accessibility_label: tr(Message::CancelLabel),
            accessibility_hint: match phase {
                Phase::RequestCode => None,
                Phase::ConfirmDeletion => Some(tr(Message::CancelHint)),
            },
        };
        vec![primary, cancel]
    } else {
        Vec::new()
    };

    DeleteAccountView {
        title: tr(Message::DeleteAccountTitle),
        handle: account.handle.clone(),
        phase,
        state,
        description,
        inputs,
        error: (!form.error_message.is_empty()).then(|| form.error_message.clone()),
        loading: form.processing,
        controls,
        snap_point: SHEET_SNAP_POINT.to_string(),
    }
}
