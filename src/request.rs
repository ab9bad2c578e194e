use crate::config::Options;
use crate::env::Env;
use crate::error::ParamsError;
use crate::extract;
use crate::http::{Bytes, Headers, Method};
use crate::params::Params;

use once_cell::sync::OnceCell;

/// An inbound request, as seen by route handlers.
///
/// Params and headers are derived from the environment on first access
/// and cached for the lifetime of the request.
pub struct Request {
    env: Env,
    options: Options,
    params: OnceCell<Params>,
    headers: OnceCell<Headers>,
}

impl Request {
    /// Create a request with the default [`Options`].
    pub fn new(env: Env) -> Request {
        Request::with_options(env, Options::default())
    }

    pub fn with_options(env: Env, options: Options) -> Request {
        Request {
            env,
            options,
            params: OnceCell::new(),
            headers: OnceCell::new(),
        }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn method(&self) -> Method {
        self.env.method()
    }

    pub fn path(&self) -> &str {
        self.env.path()
    }

    pub fn query_string(&self) -> Option<&str> {
        self.env.query_string()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.env.content_type()
    }

    pub fn body(&self) -> &Bytes {
        self.env.body()
    }

    /// The request parameters, built by the configured param builder.
    pub fn params(&self) -> Result<&Params, ParamsError> {
        self.params.get_or_try_init(|| {
            let raw = extract::params(&self.env, &self.options)?;
            log::debug!(
                "building {} params with the {} builder",
                raw.len(),
                self.options.build_params_with
            );
            Ok(self.options.param_builder().build(raw))
        })
    }

    /// The request headers, named according to [`Options::header_case`].
    pub fn headers(&self) -> &Headers {
        self.headers
            .get_or_init(|| Headers::from_env(&self.env, self.options.header_case))
    }

    pub fn into_env(self) -> Env {
        self.env
    }
}

impl From<Env> for Request {
    fn from(env: Env) -> Self {
        Request::new(env)
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        Request::new(Env::from_http(req))
    }
}
