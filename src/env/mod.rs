//! The request environment: a CGI-style key/value bag produced by the
//! transport layer.

mod mock;

pub use mock::MockRequest;

use crate::http::{ByteStr, Bytes, Method};
use crate::key::Key;
use crate::params::{ParamMap, Value};

use indexmap::{map, IndexMap};

pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub const PATH_INFO: &str = "PATH_INFO";
pub const QUERY_STRING: &str = "QUERY_STRING";
pub const CONTENT_TYPE: &str = "CONTENT_TYPE";
pub const CONTENT_LENGTH: &str = "CONTENT_LENGTH";
pub const SERVER_PROTOCOL: &str = "SERVER_PROTOCOL";

/// A request environment.
///
/// Keys may be in string or symbol form. Besides its variables, an
/// environment owns the request body and the arguments the router
/// attached to the request.
#[derive(Clone, Debug, Default)]
pub struct Env {
    vars: IndexMap<Key, ByteStr>,
    body: Bytes,
    routing_args: Option<RoutingArgs>,
}

impl Env {
    pub fn new() -> Env {
        Env::default()
    }

    /// Set a variable, returning the previous value.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<ByteStr>) -> Option<ByteStr> {
        self.vars.insert(key.into(), value.into())
    }

    /// Look up a variable. Keys must match in form as well as text.
    pub fn get(&self, key: impl Into<Key>) -> Option<&str> {
        self.vars.get(&key.into()).map(ByteStr::as_str)
    }

    /// Look up a variable stored under a string key.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.get(name)
    }

    pub fn remove(&mut self, key: impl Into<Key>) -> Option<ByteStr> {
        self.vars.shift_remove(&key.into())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> map::Iter<'_, Key, ByteStr> {
        self.vars.iter()
    }

    /// `REQUEST_METHOD`, `GET` when unset.
    pub fn method(&self) -> Method {
        self.var(REQUEST_METHOD)
            .map(Method::from_name)
            .unwrap_or_default()
    }

    /// `PATH_INFO`, `/` when unset.
    pub fn path(&self) -> &str {
        self.var(PATH_INFO).unwrap_or("/")
    }

    pub fn query_string(&self) -> Option<&str> {
        self.var(QUERY_STRING).filter(|query| !query.is_empty())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.var(CONTENT_TYPE).filter(|ty| !ty.is_empty())
    }

    /// The parsed `CONTENT_TYPE`, if it is a valid media type.
    pub fn media_type(&self) -> Option<mime::Mime> {
        self.content_type()?.parse().ok()
    }

    pub fn content_length(&self) -> Option<usize> {
        self.var(CONTENT_LENGTH)?.trim().parse().ok()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    pub fn routing_args(&self) -> Option<&RoutingArgs> {
        self.routing_args.as_ref()
    }

    pub fn set_routing_args(&mut self, args: RoutingArgs) {
        self.routing_args = Some(args);
    }

    /// Convert an HTTP request into its environment.
    ///
    /// `content-type` and `content-length` become `CONTENT_TYPE` and
    /// `CONTENT_LENGTH`, every other header becomes an `HTTP_*` variable.
    /// Repeated headers are joined with `, `. Headers whose values are not
    /// valid UTF-8 are left out.
    pub fn from_http(req: http::Request<Bytes>) -> Env {
        let (parts, body) = req.into_parts();
        let mut env = Env::new();

        env.insert(REQUEST_METHOD, Method::from_http(&parts.method).as_str());
        env.insert(PATH_INFO, parts.uri.path());
        env.insert(QUERY_STRING, parts.uri.query().unwrap_or_default());
        env.insert(SERVER_PROTOCOL, format!("{:?}", parts.version));

        for name in parts.headers.keys() {
            let values = parts
                .headers
                .get_all(name)
                .iter()
                .map(|value| value.to_str())
                .collect::<Result<Vec<_>, _>>();

            match values {
                Ok(values) => {
                    env.insert(header_key(name.as_str()), values.join(", "));
                }
                Err(_) => log::debug!("skipping header `{}` with non UTF-8 value", name),
            }
        }

        env.body = body;
        env
    }
}

/// The environment key a header is stored under.
pub(crate) fn header_key(name: &str) -> String {
    if name.eq_ignore_ascii_case("content-type") {
        CONTENT_TYPE.to_owned()
    } else if name.eq_ignore_ascii_case("content-length") {
        CONTENT_LENGTH.to_owned()
    } else {
        format!("HTTP_{}", name.to_ascii_uppercase().replace('-', "_"))
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<Key>,
    V: Into<ByteStr>,
{
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut env = Env::new();
        for (key, value) in iter {
            env.insert(key, value);
        }
        env
    }
}

impl From<http::Request<Bytes>> for Env {
    fn from(req: http::Request<Bytes>) -> Self {
        Env::from_http(req)
    }
}

/// Arguments the router attached to a matched request, such as path
/// captures.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoutingArgs(Vec<(Key, Value)>);

impl RoutingArgs {
    pub fn new() -> RoutingArgs {
        RoutingArgs::default()
    }

    /// Look up an argument by text, whatever the form of its key.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .rev()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, value)| value)
    }

    pub fn push(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.0.iter().map(|(key, value)| (key, value))
    }

    /// Collect into a string-keyed map, later arguments winning.
    pub fn to_params(&self) -> ParamMap {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for RoutingArgs
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        RoutingArgs(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
