use crate::http::ByteStr;

use std::fmt;

/// An HTTP method, as found in `REQUEST_METHOD`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Trace,
    Connect,
    Patch,
    Other(ByteStr),
}

impl Method {
    /// The string representation of this HTTP method.
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
            Method::Patch => "PATCH",
            Method::Other(method) => method,
        }
    }

    /// Parse a method name. Matching is exact: methods are case-sensitive.
    pub fn from_name(name: &str) -> Method {
        match name {
            "GET" => Method::Get,
            "PUT" => Method::Put,
            "POST" => Method::Post,
            "DELETE" => Method::Delete,
            "OPTIONS" => Method::Options,
            "HEAD" => Method::Head,
            "TRACE" => Method::Trace,
            "CONNECT" => Method::Connect,
            "PATCH" => Method::Patch,
            other => Method::Other(other.into()),
        }
    }

    /// Whether parameters for this method travel in the query string
    /// rather than the body.
    pub fn is_safe(&self) -> bool {
        matches!(self, Method::Get | Method::Head)
    }

    pub(crate) fn from_http(method: &http::Method) -> Method {
        Method::from_name(method.as_str())
    }
}

impl Default for Method {
    fn default() -> Self {
        Method::Get
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
