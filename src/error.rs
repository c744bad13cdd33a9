//! Error types for the deepaudit CLI

use thiserror::Error;

/// Result type alias for deepaudit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Errors produced by the audit pipeline.
///
/// Every variant carries a stable machine code (see [`AuditError::code`]) so
/// callers and scripts can dispatch on the failure without parsing messages.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Code content cannot be empty")]
    EmptyCode,

    #[error("File name cannot be empty")]
    EmptyFileName,

    #[error("Code size {size} exceeds limit of {limit} bytes")]
    CodeTooLarge { size: usize, limit: usize },

    #[error("Rate limit exceeded: max {limit} requests per {window_secs}s window")]
    RateLimitExceeded { limit: usize, window_secs: u64 },

    #[error("API key not configured. Run `deepaudit init` to set up your API key.")]
    MissingCredential,

    #[error("API key rejected by the audit engine. Check your configured key.")]
    InvalidCredential,

    #[error("Analysis timed out after {0}ms")]
    Timeout(u64),

    #[error("Audit engine rate limit hit. Try again later.")]
    UpstreamRateLimited,

    #[error("Audit engine unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Malformed audit engine response: {0}")]
    MalformedResponse(String),

    #[error("Audit engine returned invalid score: {0}")]
    InvalidScore(serde_json::Number),

    #[error("Audit engine returned unknown severity: {0:?}")]
    InvalidSeverity(String),

    #[error("Fix called with no findings to remediate")]
    NoFindings,

    #[error("Audit engine returned an empty fix")]
    EmptyFix,

    #[error("Generated fix appears incomplete ({got} bytes for {original} bytes of input)")]
    IncompleteFix { got: usize, original: usize },
}

impl AuditError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AuditError::EmptyCode => "EMPTY_CODE",
            AuditError::EmptyFileName => "EMPTY_FILENAME",
            AuditError::CodeTooLarge { .. } => "CODE_TOO_LARGE",
            AuditError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            AuditError::MissingCredential => "MISSING_API_KEY",
            AuditError::InvalidCredential => "INVALID_API_KEY",
            AuditError::Timeout(_) => "TIMEOUT",
            AuditError::UpstreamRateLimited => "API_RATE_LIMIT",
            AuditError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            AuditError::MalformedResponse(_) => "PARSE_ERROR",
            AuditError::InvalidScore(_) => "INVALID_SCORE",
            AuditError::InvalidSeverity(_) => "INVALID_SEVERITY",
            AuditError::NoFindings => "NO_FINDINGS",
            AuditError::EmptyFix => "EMPTY_FIX",
            AuditError::IncompleteFix { .. } => "INCOMPLETE_FIX",
        }
    }

    /// True for failures worth retrying manually (transient upstream trouble),
    /// false for input, configuration, and engine contract errors.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AuditError::Timeout(_)
                | AuditError::UpstreamRateLimited
                | AuditError::UpstreamUnavailable(_)
        )
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
