use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::credentials::Credentials;
use crate::scoring::payload::ScoringRequest;

/// Ceiling for a single scoring call, connect through body
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authorization scheme the scoring service expects: `Snowflake Token="<pat>"`
pub const AUTH_SCHEME: &str = "Snowflake";

const USER_AGENT: &str = concat!("house-value/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("could not connect to scoring endpoint: {0}")]
    ConnectionFailure(String),
    #[error("scoring service returned HTTP {status}")]
    HttpError { status: u16, body: String },
    #[error("transport error: {0}")]
    UnknownTransportError(String),
    #[error("scoring service returned a body that is not JSON: {message}")]
    InvalidJson { message: String, body: String },
    #[error("invalid scoring client setup: {0}")]
    InvalidSetup(String),
}

/// Format the Authorization header value for a bearer token
pub fn authorization_value(token: &str) -> String {
    format!("{} Token=\"{}\"", AUTH_SCHEME, token)
}

/// HTTP client for the remote scoring service.
///
/// Makes exactly one POST per [`ScoringClient::score`] call. There is no
/// retry and no cache; a failed call is reported and the user resubmits.
#[derive(Debug, Clone)]
pub struct ScoringClient {
    http: reqwest::Client,
    endpoint: Url,
    auth: HeaderValue,
    timeout: Duration,
}

impl ScoringClient {
    pub fn new(credentials: &Credentials) -> Result<Self, ScoringError> {
        let endpoint = Url::parse(credentials.endpoint()).map_err(|e| {
            ScoringError::InvalidSetup(format!(
                "invalid endpoint URL '{}': {}",
                credentials.endpoint(),
                e
            ))
        })?;

        let mut auth = HeaderValue::from_str(&authorization_value(credentials.token()))
            .map_err(|_| {
                ScoringError::InvalidSetup("token contains characters not allowed in a header".to_string())
            })?;
        auth.set_sensitive(true);

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScoringError::InvalidSetup(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            auth,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Override the request timeout (used to simulate slow servers in tests)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST a scoring request and return the parsed JSON body of a 200 response.
    ///
    /// The body is decoded as UTF-8 regardless of any declared charset.
    /// Invalid sequences become U+FFFD, so the `body` kept in `HttpError`
    /// and `InvalidJson` is a lossy copy of what the server sent.
    pub async fn score(&self, request: &ScoringRequest) -> Result<Value, ScoringError> {
        let started = Instant::now();
        debug!(endpoint = %self.endpoint, "sending scoring request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, self.auth.clone())
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = body.len(),
            "scoring response received"
        );

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "scoring service rejected request");
            return Err(ScoringError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ScoringError::InvalidJson {
            message: e.to_string(),
            body,
        })
    }

    fn classify(&self, error: reqwest::Error) -> ScoringError {
        if error.is_timeout() {
            warn!(timeout_secs = self.timeout.as_secs(), "scoring request timed out");
            ScoringError::Timeout(self.timeout)
        } else if error.is_connect() {
            warn!(error = %error, "could not connect to scoring endpoint");
            ScoringError::ConnectionFailure(error_chain(&error))
        } else {
            warn!(error = %error, "scoring request failed");
            ScoringError::UnknownTransportError(error_chain(&error))
        }
    }
}

/// Join an error with its sources; reqwest keeps the useful part
/// (e.g. "Connection refused") in the source chain.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
