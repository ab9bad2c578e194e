use super::{header_key, Env, RoutingArgs, CONTENT_LENGTH, CONTENT_TYPE, PATH_INFO, QUERY_STRING};
use super::{REQUEST_METHOD, SERVER_PROTOCOL};
use crate::http::{ByteStr, Bytes, Method};
use crate::key::Key;
use crate::params::Value;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Builds an [`Env`] without a transport.
///
/// Params are encoded into the query string for `GET` and `HEAD`
/// requests, and into a form body otherwise, unless a body was given
/// explicitly.
///
/// ```
/// use corral::{MockRequest, Request};
/// use corral::http::Method;
///
/// let env = MockRequest::new("/users?page=2")
///     .method(Method::Post)
///     .param("name", "bob")
///     .header("X-Request-Id", "abc")
///     .into_env();
///
/// let request = Request::new(env);
/// let params = request.params().unwrap();
/// assert_eq!(params.get_str("page"), Some("2"));
/// assert_eq!(params.get_str("name"), Some("bob"));
/// assert_eq!(request.headers().get("x-request-id"), Some("abc"));
/// ```
#[derive(Clone, Debug)]
pub struct MockRequest {
    uri: String,
    method: Method,
    params: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    content_type: Option<String>,
    body: Option<Bytes>,
    routing_args: Option<RoutingArgs>,
    vars: Vec<(Key, ByteStr)>,
}

impl MockRequest {
    pub fn new(uri: impl Into<String>) -> MockRequest {
        MockRequest {
            uri: uri.into(),
            method: Method::Get,
            params: Vec::new(),
            headers: Vec::new(),
            content_type: None,
            body: None,
            routing_args: None,
            vars: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn params<I, N, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(name, value)| (name.into(), value.into())));
        self
    }

    /// Add a header by its HTTP name, e.g. `X-Request-Id`.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Use `value` as a JSON body.
    #[cfg(feature = "json")]
    pub fn json(self, value: &serde_json::Value) -> Self {
        self.content_type("application/json")
            .body(value.to_string())
    }

    pub fn routing_arg(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.routing_args
            .get_or_insert_with(RoutingArgs::new)
            .push(key, value);
        self
    }

    /// Set a raw environment variable. Applied last, so it overrides
    /// anything derived from the other settings.
    pub fn env(mut self, key: impl Into<Key>, value: impl Into<ByteStr>) -> Self {
        self.vars.push((key.into(), value.into()));
        self
    }

    pub fn into_env(self) -> Env {
        let (path, query) = match self.uri.split_once('?') {
            Some((path, query)) => (path.to_owned(), query.to_owned()),
            None => (self.uri.clone(), String::new()),
        };

        // string pairs always encode
        let encoded = serde_urlencoded::to_string(&self.params).unwrap_or_default();

        let mut query = query;
        let mut content_type = self.content_type;
        let mut body = self.body;

        if !encoded.is_empty() {
            if self.method.is_safe() {
                if !query.is_empty() {
                    query.push('&');
                }
                query.push_str(&encoded);
            } else if body.is_none() {
                content_type.get_or_insert_with(|| FORM_URLENCODED.to_owned());
                body = Some(Bytes::from(encoded));
            } else {
                log::debug!("ignoring mock params, an explicit body was given");
            }
        }

        let mut env = Env::new();
        env.insert(REQUEST_METHOD, self.method.as_str());
        env.insert(PATH_INFO, if path.is_empty() { "/".to_owned() } else { path });
        env.insert(QUERY_STRING, query);
        env.insert(SERVER_PROTOCOL, "HTTP/1.1");

        if let Some(content_type) = content_type {
            env.insert(CONTENT_TYPE, content_type);
        }

        if let Some(body) = body {
            env.insert(CONTENT_LENGTH, body.len().to_string());
            env.set_body(body);
        }

        for (name, value) in self.headers {
            env.insert(header_key(&name), value);
        }

        if let Some(args) = self.routing_args {
            env.set_routing_args(args);
        }

        for (key, value) in self.vars {
            env.insert(key, value);
        }

        env
    }
}

impl From<MockRequest> for Env {
    fn from(mock: MockRequest) -> Self {
        mock.into_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::sym;

    #[test]
    fn get_params_go_to_query() {
        let env = MockRequest::new("/?x=1")
            .params([("a", "123"), ("b", "xyz")])
            .into_env();

        assert_eq!(env.method(), Method::Get);
        assert_eq!(env.query_string(), Some("x=1&a=123&b=xyz"));
        assert!(env.body().is_empty());
        assert_eq!(env.content_type(), None);
    }

    #[test]
    fn post_params_go_to_body() {
        let env = MockRequest::new("/things")
            .method(Method::Post)
            .param("a b", "1&2")
            .into_env();

        assert_eq!(env.path(), "/things");
        assert_eq!(env.query_string(), None);
        assert_eq!(env.content_type(), Some(FORM_URLENCODED));
        assert_eq!(&env.body()[..], b"a+b=1%262");
        assert_eq!(env.content_length(), Some(9));
    }

    #[test]
    fn headers_and_vars() {
        let env = MockRequest::new("/")
            .header("X-Grape-Is-Cool", "yeah")
            .header("Content-Type", "text/plain")
            .env(sym("HTTP_GRAPE_LIKES_SYMBOLIC"), "it is true")
            .into_env();

        assert_eq!(env.var("HTTP_X_GRAPE_IS_COOL"), Some("yeah"));
        assert_eq!(env.content_type(), Some("text/plain"));
        assert_eq!(env.get(sym("HTTP_GRAPE_LIKES_SYMBOLIC")), Some("it is true"));
    }
}
