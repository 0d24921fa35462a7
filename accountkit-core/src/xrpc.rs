//! [`AccountService`] over AT Protocol XRPC.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    defaults::XrpcConfig,
    error::{AccountKitError, AccountServiceError, UNKNOWN_ERROR},
    http_request::Request,
    AccountService, Environment,
};

const REQUEST_ACCOUNT_DELETE: &str = "com.atproto.server.requestAccountDelete";
const DELETE_ACCOUNT: &str = "com.atproto.server.deleteAccount";

/// Error body returned by XRPC endpoints on failure.
#[derive(Deserialize, Debug, PartialEq, Eq)]
struct XrpcErrorBody {
    error: String,
    message: Option<String>,
}

#[derive(Serialize)]
struct DeleteAccountInput<'a> {
    did: &'a str,
    password: &'a str,
    token: &'a str,
}

/// Account service talking to the account's PDS.
#[derive(uniffi::Object)]
pub struct XrpcAccountService {
    base_url: String,
    access_jwt: SecretString,
    request: Request,
}

#[uniffi::export]
impl XrpcAccountService {
    /// Creates a client for the given service, authenticated with the session's access token.
    ///
    /// # Errors
    /// Returns [`AccountKitError::InvalidInput`] if the service URL is not HTTPS.
    #[uniffi::constructor]
    pub fn new(config: XrpcConfig, access_jwt: String) -> Result<Self, AccountKitError> {
        #[cfg(not(test))]
        if !config.service_url.starts_with("https://") {
            return Err(AccountKitError::InvalidInput {
                attribute: "service_url".to_string(),
                reason: "the account service must be reached over https".to_string(),
            });
        }

        Ok(Self {
            base_url: config.base_url().to_string(),
            access_jwt: SecretString::from(access_jwt),
            request: Request::new(&config),
        })
    }

    /// Creates a client for one of the hosted environments with default settings.
    #[uniffi::constructor]
    #[must_use]
    pub fn with_environment(environment: Environment, access_jwt: String) -> Self {
        let config = XrpcConfig::from_environment(environment);
        Self {
            base_url: config.base_url().to_string(),
            access_jwt: SecretString::from(access_jwt),
            request: Request::new(&config),
        }
    }

    /// Exposes this client through the [`AccountService`] interface, so foreign
    /// code can hand it to a flow.
    #[must_use]
    pub fn as_account_service(self: Arc<Self>) -> Arc<dyn AccountService> {
        self
    }
}

impl XrpcAccountService {
    fn url(&self, nsid: &str) -> String {
        format!("{}/xrpc/{nsid}", self.base_url)
    }

    async fn expect_success(
        response: reqwest::Response,
        nsid: &str,
    ) -> Result<(), AccountServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        log::warn!("{nsid} failed with status {status}");

        match serde_json::from_str::<XrpcErrorBody>(&body) {
            Ok(XrpcErrorBody { error, message }) => Err(AccountServiceError::Xrpc {
                status: status.as_u16(),
                error,
                message,
            }),
            Err(_) => Err(AccountServiceError::Network {
                url,
                status: Some(status.as_u16()),
                error: if body.is_empty() {
                    UNKNOWN_ERROR.to_string()
                } else {
                    body
                },
            }),
        }
    }
}

#[async_trait::async_trait]
impl AccountService for XrpcAccountService {
    async fn request_account_delete(&self) -> Result<(), AccountServiceError> {
        log::info!("requesting account deletion email from {}", self.base_url);
        let request = self
            .request
            .post(&self.url(REQUEST_ACCOUNT_DELETE))
            .bearer_auth(self.access_jwt.expose_secret());

        let response = self.request.send_idempotent(request).await?;
        Self::expect_success(response, REQUEST_ACCOUNT_DELETE).await
    }

    async fn delete_account(
        &self,
        did: String,
        password: String,
        token: String,
    ) -> Result<(), AccountServiceError> {
        let password = SecretString::from(password);
        log::info!("deleting account {did}");
        let request = self
            .request
            .post(&self.url(DELETE_ACCOUNT))
            .json(&DeleteAccountInput {
                did: &did,
                password: password.expose_secret(),
                token: &token,
            });

        let response = self.request.send_once(request).await?;
        Self::expect_success(response, DELETE_ACCOUNT).await
    }
}

#[cfg(test)]
impl XrpcAccountService {
    /// Creates a client for a mock server with fast retries.
    fn for_mock_server(url: &str) -> Self {
        let config = XrpcConfig {
            service_url: url.to_string(),
            timeout_secs: 2,
            max_retries: 2,
        };
        Self::new(config, "access-jwt".to_string()).expect("config is valid")
    }
}
