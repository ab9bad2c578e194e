//! Extraction of request parameters from the environment.

mod form;
mod json;
mod nested;
mod query;
mod routing;

pub use form::{form, FormConfig};
#[cfg(feature = "json")]
pub use json::json;
pub use json::{JsonConfig, JSON_KEY};
pub use query::query;
pub use routing::{routing_args, RESERVED_ROUTING_KEYS};

use crate::config::{MergePolicy, Options};
use crate::env::Env;
use crate::error::ParamsError;
use crate::http::Method;
use crate::params::ParamMap;

/// Extracts the merged parameters of a request, with string keys.
///
/// Query parameters come first. Body parameters replace query parameters
/// with the same name. Routing arguments, minus the reserved ones, are
/// deep merged last according to [`Options::merge`].
///
/// Requests without parameters yield an empty map.
pub fn params(env: &Env, options: &Options) -> Result<ParamMap, ParamsError> {
    let mut params = query(env, options.max_depth)?;

    for (key, value) in body(env, options)? {
        params.insert(key, value);
    }

    let routing = routing_args(env);
    match options.merge {
        MergePolicy::RoutePrecedence => params.deep_merge(routing),
        MergePolicy::RequestPrecedence => params.reverse_deep_merge(routing),
    }

    Ok(params)
}

/// Parameters carried by the body, if it is in a format we decode.
fn body(env: &Env, options: &Options) -> Result<ParamMap, ParamsError> {
    if env.body().is_empty() {
        return Ok(ParamMap::new());
    }

    let result = match BodyKind::of(env) {
        BodyKind::Form => form(env, options.form, options.max_depth),
        #[cfg(feature = "json")]
        BodyKind::Json => json(env, options.json),
        BodyKind::Other => {
            log::debug!(
                "not decoding body with content type {:?}",
                env.content_type()
            );
            return Ok(ParamMap::new());
        }
    };

    if let Err(err) = &result {
        log::warn!("rejecting request body: {}", err);
    }

    result
}

enum BodyKind {
    Form,
    #[cfg(feature = "json")]
    Json,
    Other,
}

impl BodyKind {
    fn of(env: &Env) -> BodyKind {
        let mime = match env.content_type() {
            Some(_) => env.media_type(),
            // bodies of posts without a content type are treated as forms
            None if env.method() == Method::Post => return BodyKind::Form,
            None => return BodyKind::Other,
        };

        match mime {
            Some(mime) if form::is_form(&mime) => BodyKind::Form,
            #[cfg(feature = "json")]
            Some(mime) if json::is_json(&mime) => BodyKind::Json,
            _ => BodyKind::Other,
        }
    }
}

/// Reject bodies that are, or claim to be, larger than `limit`.
fn check_limit(env: &Env, limit: usize) -> Result<(), ParamsError> {
    if env.body().len() > limit || env.content_length().map_or(false, |len| len > limit) {
        return Err(ParamsError::PayloadTooLarge { limit });
    }

    Ok(())
}
