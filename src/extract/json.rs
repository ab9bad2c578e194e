#[cfg(feature = "json")]
use crate::env::Env;
#[cfg(feature = "json")]
use crate::error::ParamsError;
#[cfg(feature = "json")]
use crate::params::{ParamMap, Value};

use serde::Deserialize;

/// Key non-object JSON bodies are stored under.
pub const JSON_KEY: &str = "_json";

/// Deserialize the request body as JSON.
///
/// The members of a top-level object become parameters. Any other
/// top-level value is stored under [`JSON_KEY`].
#[cfg(feature = "json")]
pub fn json(env: &Env, config: JsonConfig) -> Result<ParamMap, ParamsError> {
    super::check_limit(env, config.limit)?;

    match serde_json::from_slice::<serde_json::Value>(env.body())? {
        serde_json::Value::Object(object) => Ok(object
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()),
        other => {
            let mut params = ParamMap::new();
            params.insert(JSON_KEY, Value::from(other));
            Ok(params)
        }
    }
}

/// Whether the media type is JSON, including `+json` suffixes.
#[cfg(feature = "json")]
pub(crate) fn is_json(mime: &mime::Mime) -> bool {
    mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON)
}

/// Configuration for the [`json`] extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    limit: usize,
}

impl JsonConfig {
    /// Create a [`JsonConfig`] instance.
    pub fn new() -> Self {
        Self {
            limit: 2_097_152, // (~2mb)
        }
    }

    /// Set maximum number of bytes the body may have.
    ///
    /// By default the limit is 2mb.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn max_bytes(&self) -> usize {
        self.limit
    }
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self::new()
    }
}
