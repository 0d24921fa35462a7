use crate::error::AccountServiceError;

/// Remote account-management operations used by the account deletion flow.
///
/// The host may implement this over its own network stack; otherwise
/// [`crate::XrpcAccountService`] talks to the account's PDS directly.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Asks the service to email a confirmation code authorizing deletion of the
    /// signed-in account. Safe to call more than once.
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects it.
    async fn request_account_delete(&self) -> Result<(), AccountServiceError>;

    /// Irreversibly deletes the account.
    ///
    /// # Errors
    /// Fails on a wrong password, an invalid or expired code, or a transport error.
    async fn delete_account(
        &self,
        did: String,
        password: String,
        token: String,
    ) -> Result<(), AccountServiceError>;
}
