use thiserror::Error;

/// Shown for transport failures, where the server never answered.
pub const UNABLE_TO_CONNECT: &str =
    "Unable to connect. Please check your internet connection and try again.";

/// Shown when the service reports a failure of one of its upstreams.
pub const UPSTREAM_FAILURE: &str =
    "The server appears to be experiencing issues. Please try again in a few moments.";

/// Shown when the session was created with an app password.
pub const BAD_TOKEN_SCOPE: &str = "This feature is not available while using an App Password. Please sign in with your main password.";

/// Shown when a failure carries no description at all.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors outputs from `AccountKit` that are not shown inside a flow.
///
/// These signal misuse by the embedding application (for example opening the
/// deletion modal without a signed-in account) or bad configuration.
#[derive(Debug, Error, uniffi::Error)]
pub enum AccountKitError {
    /// A flow that acts on the current account was opened while no account is loaded.
    #[error("no_current_account: the account deletion flow requires a loaded account")]
    NoCurrentAccount,
    /// The presented input is not valid for the requested operation
    #[error("invalid_input_{attribute}: {reason}")]
    InvalidInput {
        /// The attribute that is invalid
        attribute: String,
        /// The reason the input is invalid
        reason: String,
    },
}

/// Failures reported by the account service collaborator.
///
/// Foreign implementations of [`crate::AccountService`] return these; the
/// bundled XRPC client maps HTTP and transport failures onto them.
#[derive(Debug, Error, uniffi::Error)]
pub enum AccountServiceError {
    /// The request never produced a usable response.
    #[error("network_error: {error}")]
    Network {
        /// The URL of the request
        url: String,
        /// The HTTP status, if the server answered at all
        status: Option<u16>,
        /// Description of the failure
        error: String,
    },
    /// The service answered with an XRPC error body.
    #[error("{}", xrpc_display(.error, .message))]
    Xrpc {
        /// The HTTP status of the response
        status: u16,
        /// The XRPC error name, e.g. `InvalidToken`
        error: String,
        /// Human readable detail supplied by the service
        message: Option<String>,
    },
    /// The response body could not be decoded.
    #[error("serialization_error: {error}")]
    Serialization {
        /// Description of the decoding failure
        error: String,
    },
    /// Any other failure raised by a foreign implementation.
    #[error("{error}")]
    Generic {
        /// Description of the failure
        error: String,
    },
    /// Unexpected `UniFFI` callback error.
    #[error("unexpected uniffi callback error: {reason}")]
    UnexpectedUniFFICallbackError {
        /// Reason reported by the `UniFFI` runtime
        reason: String,
    },
}

impl From<uniffi::UnexpectedUniFFICallbackError> for AccountServiceError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError {
            reason: error.reason,
        }
    }
}

fn xrpc_display<'a>(error: &'a str, message: &'a Option<String>) -> &'a str {
    message.as_deref().filter(|m| !m.is_empty()).unwrap_or(error)
}

/// Collapses an account service failure into the single string shown to the user.
#[must_use]
pub fn clean_error(error: &AccountServiceError) -> String {
    match error {
        AccountServiceError::Network { status: None, .. } => {
            UNABLE_TO_CONNECT.to_string()
        }
        AccountServiceError::Network {
            status: Some(500..=599),
            ..
        } => UPSTREAM_FAILURE.to_string(),
        AccountServiceError::Network { error, .. } => clean_error_message(error),
        other => clean_error_message(&other.to_string()),
    }
}

/// Rewrites a raw failure message into a user-facing one.
#[must_use]
#[uniffi::export]
pub fn clean_error_message(raw: &str) -> String {
    if raw.contains("Network request failed") || raw.contains("Failed to fetch") {
        return UNABLE_TO_CONNECT.to_string();
    }
    if raw.contains("Upstream Failure") {
        return UPSTREAM_FAILURE.to_string();
    }
    if raw.contains("Bad token scope") {
        return BAD_TOKEN_SCOPE.to_string();
    }
    let message = raw.strip_prefix("Error: ").unwrap_or(raw);
    if message.trim().is_empty() {
        return UNKNOWN_ERROR.to_string();
    }
    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Error: Invalid password", "Invalid password" ; "strips error prefix")]
    #[test_case("TypeError: Network request failed", UNABLE_TO_CONNECT ; "network request failed")]
    #[test_case("Failed to fetch", UNABLE_TO_CONNECT ; "failed to fetch")]
    #[test_case("Upstream Failure", UPSTREAM_FAILURE ; "upstream failure")]
    #[test_case("Bad token scope", BAD_TOKEN_SCOPE ; "app password session")]
    #[test_case("Token is expired", "Token is expired" ; "passes through")]
    #[test_case("", UNKNOWN_ERROR ; "empty")]
    #[test_case("Error: ", UNKNOWN_ERROR ; "empty after prefix")]
    fn test_clean_error_message(raw: &str, expected: &str) {
        assert_eq!(clean_error_message(raw), expected);
    }

    #[test]
    fn test_transport_failure_without_status_is_connectivity() {
        let error = AccountServiceError::Network {
            url: "https://pds.example/xrpc/com.atproto.server.deleteAccount".to_string(),
            status: None,
            error: "request timeout/connect error: operation timed out".to_string(),
        };
        assert_eq!(clean_error(&error), UNABLE_TO_CONNECT);
    }

    #[test]
    fn test_xrpc_error_prefers_message_over_name() {
        let error = AccountServiceError::Xrpc {
            status: 400,
            error: "InvalidToken".to_string(),
            message: Some("Token is invalid".to_string()),
        };
        assert_eq!(clean_error(&error), "Token is invalid");

        let error = AccountServiceError::Xrpc {
            status: 400,
            error: "ExpiredToken".to_string(),
            message: Some(String::new()),
        };
        assert_eq!(clean_error(&error), "ExpiredToken");
    }

    #[test]
    fn test_failure_without_description_is_never_blank() {
        let error = AccountServiceError::Generic {
            error: String::new(),
        };
        assert_eq!(clean_error(&error), UNKNOWN_ERROR);

        let error = AccountServiceError::Xrpc {
            status: 400,
            error: String::new(),
            message: None,
        };
        assert_eq!(clean_error(&error), UNKNOWN_ERROR);
    }

    #[test]
    fn test_generic_foreign_error_is_cleaned() {
        let error = AccountServiceError::Generic {
            error: "Error: Upstream Failure".to_string(),
        };
        assert_eq!(clean_error(&error), UPSTREAM_FAILURE);
    }
}
