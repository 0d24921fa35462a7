//! Localization of the strings a flow renders.
//!
//! Flows never format user-visible text themselves: every string is a
//! [`Message`] whose English source and disambiguation context are handed to
//! the host's [`Translator`].

use strum::EnumIter;

/// Looks up the localized form of a source string.
#[uniffi::export(with_foreign)]
pub trait Translator: Send + Sync {
    /// Returns `message` translated to the active locale. `context`
    /// disambiguates identical source strings (e.g. `"action"` for buttons).
    fn translate(&self, message: String, context: Option<String>) -> String;
}

/// Returns source strings untranslated.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceTranslator;

impl Translator for SourceTranslator {
    fn translate(&self, message: String, _context: Option<String>) -> String {
        message
    }
}

/// Source strings of the account deletion modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Message {
    /// Modal title.
    DeleteAccountTitle,
    /// Explains why a code is emailed.
    RequestCodeDescription,
    /// Send-email button.
    SendEmail,
    /// Send-email accessibility label.
    SendEmailLabel,
    /// Send-email accessibility hint.
    SendEmailHint,
    /// Cancel button.
    Cancel,
    /// Cancel accessibility label.
    CancelLabel,
    /// Cancel accessibility hint, confirmation phase.
    CancelHint,
    /// Prompt above the code input.
    ConfirmCodeDescription,
    /// Code input label and placeholder.
    ConfirmationCode,
    /// Code input accessibility hint.
    ConfirmationCodeHint,
    /// Prompt above the password input.
    PasswordDescription,
    /// Password input label and placeholder.
    Password,
    /// Password input accessibility hint.
    PasswordHint,
    /// Destructive confirm button.
    DeleteMyAccount,
    /// Confirm accessibility label.
    DeleteMyAccountLabel,
    /// Toast shown once the account is gone.
    AccountDeleted,
}

impl Message {
    /// English source string.
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::DeleteAccountTitle => "Delete Account",
            Self::RequestCodeDescription => "For security reasons, we'll need to send a confirmation code to your email address.",
            Self::SendEmail => "Send Email",
            Self::SendEmailLabel => "Send email",
            Self::SendEmailHint => "Sends email with confirmation code for account deletion",
            Self::Cancel => "Cancel",
            Self::CancelLabel => "Cancel account deletion",
            Self::CancelHint => "Exits account deletion process",
            Self::ConfirmCodeDescription => "Check your inbox for an email with the confirmation code to enter below:",
            Self::ConfirmationCode => "Confirmation code",
            Self::ConfirmationCodeHint => "Input confirmation code for account deletion",
            Self::PasswordDescription => "Please enter your password as well:",
            Self::Password => "Password",
            Self::PasswordHint => "Input password for account deletion",
            Self::DeleteMyAccount => "Delete my account",
            Self::DeleteMyAccountLabel => "Confirm delete account",
            Self::AccountDeleted => "Your account has been deleted",
        }
    }

    /// Disambiguation context passed to the translator.
    #[must_use]
    pub const fn context(self) -> Option<&'static str> {
        match self {
            Self::SendEmail | Self::Cancel => Some("action"),
            _ => None,
        }
    }

    /// Translates the message with `translator`.
    #[must_use]
    pub fn translate(self, translator: &dyn Translator) -> String {
        translator.translate(
            self.source().to_string(),
            self.context().map(str::to_string),
        )
    }
}
