use super::{normalize_header_name, HeaderCase};
use crate::env::Env;
use crate::http::ByteStr;

use indexmap::{map, IndexMap};

use std::fmt;

/// Request headers keyed by their canonical display name.
///
/// Entries keep the order they had in the environment. Lookups ignore
/// ASCII case, so `get("x-foo")` finds an `X-Foo` entry.
#[derive(Clone, Default, PartialEq)]
pub struct Headers {
    map: IndexMap<ByteStr, ByteStr>,
}

impl Headers {
    pub fn new() -> Headers {
        Headers {
            map: IndexMap::with_capacity(16),
        }
    }

    /// Collect every `HTTP_*` entry of the environment.
    pub fn from_env(env: &Env, case: HeaderCase) -> Headers {
        let mut headers = Headers::new();

        for (key, value) in env.iter() {
            match normalize_header_name(key.as_str(), case) {
                Some(name) => headers.insert(name, value.clone()),
                None => log::trace!("skipping non-header env key `{}`", key.as_str()),
            }
        }

        headers
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.map.get(name) {
            return Some(value);
        }

        self.map
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Insert a header, replacing any value stored under the same name.
    pub fn insert(&mut self, name: impl Into<ByteStr>, value: impl Into<ByteStr>) {
        self.map.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<ByteStr> {
        let index = self
            .map
            .get_index_of(name)
            .or_else(|| self.map.keys().position(|key| key.eq_ignore_ascii_case(name)))?;

        self.map.shift_remove_index(index).map(|(_, value)| value)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.map.iter(),
        }
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<ByteStr>,
    V: Into<ByteStr>,
{
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (N, V)>,
    {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(name, value)` pairs of [`Headers`].
pub struct Iter<'a> {
    inner: map::Iter<'a, ByteStr, ByteStr>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
