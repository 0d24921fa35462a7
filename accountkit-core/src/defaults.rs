use std::time::Duration;

use serde::Deserialize;

use crate::{error::AccountKitError, Environment};

/// Per-request timeout applied by the XRPC client unless configured otherwise.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Retries for idempotent requests; total attempts = retries + 1.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Settings for [`crate::XrpcAccountService`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, uniffi::Record)]
pub struct XrpcConfig {
    /// Base URL of the account's PDS or entryway, without a trailing `/xrpc`.
    pub service_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many times an idempotent request is retried after a transient failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl XrpcConfig {
    /// Service URL of one of the hosted environments.
    #[must_use]
    pub const fn default_service_url(environment: Environment) -> &'static str {
        match environment {
            Environment::Staging => "https://staging.bsky.dev",
            Environment::Production => "https://bsky.social",
        }
    }

    /// Default configuration for one of the hosted environments.
    #[must_use]
    pub fn from_environment(environment: Environment) -> Self {
        Self {
            service_url: Self::default_service_url(environment).to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Parses a JSON configuration such as `{"service_url": "https://pds.example"}`.
    ///
    /// # Errors
    /// Returns [`AccountKitError::InvalidInput`] if the JSON is malformed.
    pub fn from_json(config: &str) -> Result<Self, AccountKitError> {
        serde_json::from_str(config).map_err(|e| AccountKitError::InvalidInput {
            attribute: "config".to_string(),
            reason: format!("Invalid config: {e}"),
        })
    }

    pub(crate) const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The service URL without trailing slashes.
    pub(crate) fn base_url(&self) -> &str {
        self.service_url.trim_end_matches('/')
    }
}
