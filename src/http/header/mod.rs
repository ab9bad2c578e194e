//! Header name normalization and the header map handed to handlers.

mod map;

pub use map::{Headers, Iter};

use crate::error::ConfigError;
use crate::http::ByteStr;

use serde::Deserialize;

use std::str::FromStr;

/// Prefix the transport puts in front of header keys in the environment.
pub const HTTP_PREFIX: &str = "HTTP_";

/// How canonical header names are cased.
///
/// Older transports exposed title-cased names (`X-Foo`), newer ones
/// lowercase every header name (`x-foo`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum HeaderCase {
    /// `HTTP_X_FOO` becomes `X-Foo`.
    TitleCase,

    /// `HTTP_X_FOO` becomes `x-foo`.
    #[default]
    Lowercase,
}

impl FromStr for HeaderCase {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title_case" | "title" => Ok(HeaderCase::TitleCase),
            "lowercase" | "lower" => Ok(HeaderCase::Lowercase),
            other => Err(ConfigError::UnknownHeaderCase(other.to_owned())),
        }
    }
}

impl TryFrom<String> for HeaderCase {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Derive the display name of a header from its environment key.
///
/// Returns `None` for keys without the `HTTP_` prefix, and for a bare
/// prefix with nothing after it.
///
/// ```
/// use corral::http::header::{normalize_header_name, HeaderCase};
///
/// let name = normalize_header_name("HTTP_X_FOO", HeaderCase::TitleCase);
/// assert_eq!(name.as_deref(), Some("X-Foo"));
///
/// let name = normalize_header_name("HTTP_X_FOO", HeaderCase::Lowercase);
/// assert_eq!(name.as_deref(), Some("x-foo"));
///
/// assert!(normalize_header_name("HTP_X_FOO", HeaderCase::Lowercase).is_none());
/// ```
pub fn normalize_header_name(raw_key: &str, case: HeaderCase) -> Option<ByteStr> {
    let name = raw_key.strip_prefix(HTTP_PREFIX)?;

    if name.is_empty() {
        return None;
    }

    let name = match case {
        HeaderCase::Lowercase => name.to_ascii_lowercase().replace('_', "-"),
        HeaderCase::TitleCase => {
            let mut out = String::with_capacity(name.len());

            for (i, segment) in name.split('_').enumerate() {
                if i > 0 {
                    out.push('-');
                }

                let mut chars = segment.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.extend(chars.flat_map(char::to_lowercase));
                }
            }

            out
        }
    };

    Some(ByteStr::from(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case() {
        let cases = [
            ("HTTP_X_GRAPE_IS_COOL", "X-Grape-Is-Cool"),
            ("HTTP_ACCEPT", "Accept"),
            ("HTTP_user_agent", "User-Agent"),
            ("HTTP_X__DOUBLE", "X--Double"),
        ];

        for (key, expected) in cases {
            assert_eq!(
                normalize_header_name(key, HeaderCase::TitleCase).as_deref(),
                Some(expected)
            );
        }
    }

    #[test]
    fn lowercase() {
        assert_eq!(
            normalize_header_name("HTTP_X_GRAPE_IS_COOL", HeaderCase::Lowercase).as_deref(),
            Some("x-grape-is-cool")
        );
    }

    #[test]
    fn rejects_other_keys() {
        for key in ["HTP_X_GRAPE_ENTITY_TOO", "CONTENT_TYPE", "http_x_foo", "HTTP_", ""] {
            assert_eq!(normalize_header_name(key, HeaderCase::TitleCase), None, "{}", key);
            assert_eq!(normalize_header_name(key, HeaderCase::Lowercase), None, "{}", key);
        }
    }

    #[test]
    fn parse_case() {
        assert_eq!("title_case".parse::<HeaderCase>().unwrap(), HeaderCase::TitleCase);
        assert_eq!("lowercase".parse::<HeaderCase>().unwrap(), HeaderCase::Lowercase);
        assert!("upper".parse::<HeaderCase>().is_err());
    }
}
