use super::query::urlencoded;
use crate::env::Env;
use crate::error::ParamsError;
use crate::params::ParamMap;

use serde::Deserialize;

/// Decode the request body as a URL encoded form.
///
/// [`FormConfig`] limits how large the body may be.
pub fn form(env: &Env, config: FormConfig, max_depth: usize) -> Result<ParamMap, ParamsError> {
    super::check_limit(env, config.limit)?;
    urlencoded(env.body(), max_depth)
}

pub(crate) fn is_form(mime: &mime::Mime) -> bool {
    mime.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str()
}

/// Configuration for the [`form`] extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    limit: usize,
}

impl FormConfig {
    /// Create a [`FormConfig`] instance.
    pub fn new() -> Self {
        Self {
            limit: 16_384, // (~16kb)
        }
    }

    /// Set maximum number of bytes the body may have.
    ///
    /// By default the limit is 16kb.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn max_bytes(&self) -> usize {
        self.limit
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::new()
    }
}
