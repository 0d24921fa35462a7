use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use reqwest::{Method, RequestBuilder, Response};

use crate::{defaults::XrpcConfig, error::AccountServiceError};

/// A thin wrapper on an HTTP client. Sets the timeout and user-agent on every
/// request and retries transient failures of requests that are safe to repeat.
pub struct Request {
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
}

impl Request {
    pub(crate) fn new(config: &XrpcConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: config.timeout(),
            max_retries: config.max_retries,
        }
    }

    /// Creates a request builder with defaults applied.
    pub(crate) fn req(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .timeout(self.timeout)
            .header(
                "User-Agent",
                format!("accountkit-core/{}", env!("CARGO_PKG_VERSION")),
            )
    }

    /// Creates a POST request builder with defaults applied.
    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.req(Method::POST, url)
    }

    /// Sends a request exactly once. Used for calls with irreversible effects.
    #[allow(clippy::unused_self)]
    pub(crate) async fn send_once(
        &self,
        request_builder: RequestBuilder,
    ) -> Result<Response, AccountServiceError> {
        execute_request_builder(request_builder, false)
            .await
            .map_err(Into::into)
    }

    /// Sends an idempotent request, retrying 429s, 5xx, timeouts and connect errors.
    pub(crate) async fn send_idempotent(
        &self,
        request_builder: RequestBuilder,
    ) -> Result<Response, AccountServiceError> {
        let Some(template) = request_builder.try_clone() else {
            return self.send_once(request_builder).await;
        };

        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(200))
            .with_max_delay(Duration::from_secs(2))
            .with_max_times(self.max_retries as usize);

        let result = (|| async {
            let request_builder = template.try_clone().ok_or_else(|| {
                RequestHandleError::permanent(
                    "<unknown>".to_string(),
                    None,
                    "request cannot be retried because it is not cloneable".to_string(),
                )
            })?;
            execute_request_builder(request_builder, true).await
        })
        .retry(backoff)
        .when(RequestHandleError::is_retryable)
        .notify(|err, delay| {
            log::warn!("retrying {} in {delay:?}: {}", err.url, err.error);
        })
        .await;

        match result {
            Ok(response) => Ok(response),
            // Out of retries on a 429/5xx: hand back the last response so its
            // error body can be decoded.
            Err(RequestHandleError {
                response: Some(response),
                ..
            }) => Ok(*response),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug)]
struct RequestHandleError {
    url: String,
    status: Option<u16>,
    error: String,
    retryable: bool,
    response: Option<Box<Response>>,
}

impl RequestHandleError {
    const fn retryable(url: String, status: Option<u16>, error: String) -> Self {
        Self {
            url,
            status,
            error,
            retryable: true,
            response: None,
        }
    }

    fn retryable_response(response: Response, error: String) -> Self {
        Self {
            url: response.url().to_string(),
            status: Some(response.status().as_u16()),
            error,
            retryable: true,
            response: Some(Box::new(response)),
        }
    }

    const fn permanent(url: String, status: Option<u16>, error: String) -> Self {
        Self {
            url,
            status,
            error,
            retryable: false,
            response: None,
        }
    }

    const fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl From<RequestHandleError> for AccountServiceError {
    fn from(value: RequestHandleError) -> Self {
        Self::Network {
            url: value.url,
            status: value.status,
            error: value.error,
        }
    }
}

/// Executes a request. With `retry_statuses`, 429 and 5xx responses are surfaced
/// as retryable errors carrying the response; every other response is returned
/// as-is so the caller can decode the XRPC error body.
async fn execute_request_builder(
    request_builder: RequestBuilder,
    retry_statuses: bool,
) -> Result<Response, RequestHandleError> {
    let (client, request) = request_builder.build_split();
    let request = request.map_err(|err| {
        RequestHandleError::permanent(
            err.url()
                .map_or_else(|| "<unknown>".to_string(), ToString::to_string),
            None,
            format!("request build failed: {err}"),
        )
    })?;
    let url = request.url().to_string();

    match client.execute(request).await {
        Ok(resp) => {
            let status = resp.status().as_u16();
            if retry_statuses && status == 429 {
                return Err(RequestHandleError::retryable_response(
                    resp,
                    "Rate Limit Exceeded".to_string(),
                ));
            }
            if retry_statuses && (500..600).contains(&status) {
                return Err(RequestHandleError::retryable_response(
                    resp,
                    format!("request error with bad status code {status}"),
                ));
            }
            Ok(resp)
        }
        Err(err) => {
            if err.is_timeout() || err.is_connect() {
                return Err(RequestHandleError::retryable(
                    url,
                    None,
                    format!("request timeout/connect error: {err}"),
                ));
            }

            Err(RequestHandleError::permanent(
                url,
                None,
                format!("request failed: {err}"),
            ))
        }
    }
}
