//! Normalizes request environments into the params and headers route
//! handlers consume.
//!
//! ```
//! use corral::{sym, MockRequest, Options, Request};
//! use corral::params::BuildParamsWith;
//!
//! let env = MockRequest::new("/?a=123&b=xyz")
//!     .header("X-Grape-Is-Cool", "yeah")
//!     .routing_arg(sym("version"), "v1")
//!     .into_env();
//!
//! let options = Options::default().build_params_with(BuildParamsWith::Symbolized);
//! let request = Request::with_options(env, options);
//!
//! let params = request.params().unwrap();
//! assert_eq!(params.get_str(sym("a")), Some("123"));
//! assert_eq!(params.len(), 2);
//! assert_eq!(request.headers().get("x-grape-is-cool"), Some("yeah"));
//! ```

pub mod env;
pub mod extract;
pub mod http;
pub mod params;

mod config;
mod error;
mod key;
mod request;

pub use config::{MergePolicy, Options};
pub use env::{Env, MockRequest, RoutingArgs};
pub use error::{ConfigError, ParamsError};
pub use key::{sym, Key, Symbol};
pub use params::{BuildParamsWith, Mash, ParamMap, Params, Value};
pub use request::Request;
