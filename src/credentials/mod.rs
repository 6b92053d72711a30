pub mod prompt;

use std::fmt;

/// Environment variable holding the scoring service's personal access token
pub const ENV_TOKEN_VAR: &str = "SNOWFLAKE_PAT";

/// Environment variable holding the scoring endpoint URL
pub const ENV_ENDPOINT_VAR: &str = "SCORING_ENDPOINT";

pub use prompt::prompt_for_token;

/// Bearer token and endpoint for the scoring service.
///
/// Read once at startup and never mutated. `Debug` redacts the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    endpoint: String,
    token: String,
}

impl Credentials {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug)]
pub enum CredentialError {
    TokenNotFound,
    EndpointNotFound,
    PromptFailed(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::TokenNotFound => {
                write!(f, "Missing access token. Set {} or run interactively", ENV_TOKEN_VAR)
            }
            CredentialError::EndpointNotFound => write!(
                f,
                "Missing scoring endpoint. Set {}, pass --endpoint, or add `endpoint` to the config file",
                ENV_ENDPOINT_VAR
            ),
            CredentialError::PromptFailed(msg) => write!(f, "Failed to read token: {}", msg),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Trim a candidate value, treating empty strings as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable from the environment. Returns None if unset or blank.
fn get_from_env(var: &str) -> Option<String> {
    non_empty(std::env::var(var).ok())
}

/// Check for a token in the SNOWFLAKE_PAT environment variable.
pub fn get_token_from_env() -> Option<String> {
    get_from_env(ENV_TOKEN_VAR)
}

/// Check for an endpoint in the SCORING_ENDPOINT environment variable.
pub fn get_endpoint_from_env() -> Option<String> {
    get_from_env(ENV_ENDPOINT_VAR)
}

/// Where each credential may come from, highest priority first.
#[derive(Debug, Default, Clone)]
pub struct CredentialSources {
    /// `--endpoint` on the command line
    pub endpoint_flag: Option<String>,
    pub endpoint_env: Option<String>,
    /// `endpoint` in the config file
    pub endpoint_config: Option<String>,
    pub token_env: Option<String>,
}

impl CredentialSources {
    /// Collect everything except the command-line flag from the process
    /// environment and the loaded config.
    pub fn from_env(endpoint_flag: Option<String>, endpoint_config: Option<String>) -> Self {
        Self {
            endpoint_flag,
            endpoint_env: get_endpoint_from_env(),
            endpoint_config,
            token_env: get_token_from_env(),
        }
    }

    fn endpoint(&self) -> Option<String> {
        non_empty(self.endpoint_flag.clone())
            .or_else(|| non_empty(self.endpoint_env.clone()))
            .or_else(|| non_empty(self.endpoint_config.clone()))
    }
}

/// Resolve credentials from the given sources.
///
/// When no token is available and `interactive` is set, `prompt` is asked
/// for one (a hidden terminal prompt in the binary). Missing credentials
/// are fatal for the caller: no request can be made without both.
pub fn resolve<F>(
    sources: &CredentialSources,
    interactive: bool,
    prompt: F,
) -> Result<Credentials, CredentialError>
where
    F: FnOnce() -> anyhow::Result<String>,
{
    let endpoint = sources.endpoint().ok_or(CredentialError::EndpointNotFound)?;

    let token = match non_empty(sources.token_env.clone()) {
        Some(token) => token,
        None if interactive => {
            let entered = prompt().map_err(|e| CredentialError::PromptFailed(format!("{:#}", e)))?;
            non_empty(Some(entered)).ok_or(CredentialError::TokenNotFound)?
        }
        None => return Err(CredentialError::TokenNotFound),
    };

    Ok(Credentials::new(endpoint, token))
}
