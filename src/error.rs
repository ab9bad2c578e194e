use http::StatusCode;

use std::path::PathBuf;

/// Invalid configuration.
///
/// Raised while options are built, before any request is constructed
/// from them.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The named param builder does not exist.
    #[error("unknown param builder `{0}`, expected one of: indifferent, symbol, mash")]
    UnknownParamBuilder(String),

    #[error("unknown header case `{0}`, expected `title_case` or `lowercase`")]
    UnknownHeaderCase(String),

    #[error("unknown merge policy `{0}`, expected `route_precedence` or `request_precedence`")]
    UnknownMergePolicy(String),

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that can occur while extracting request parameters.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    /// A key was used both as a scalar and as a nested container,
    /// e.g. `a=1&a[b]=2`.
    #[error("expected {expected} (got {got}) for param `{name}`")]
    TypeConflict {
        name: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("failed to decode url-encoded parameters: {0}")]
    Urlencoded(#[from] serde_urlencoded::de::Error),

    #[error("parameter nesting exceeds the limit of {limit}")]
    TooDeep { limit: usize },

    #[error("body larger than limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[cfg(feature = "json")]
    #[error("failed to deserialize body: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParamsError {
    /// The status a request failing with this error should be rejected with.
    pub fn status(&self) -> StatusCode {
        match self {
            ParamsError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
