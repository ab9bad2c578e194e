use bytes::Bytes;

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::Utf8Error;

/// A UTF-8 encoded string stored as [`Bytes`].
///
/// Cloning a `ByteStr` is cheap, which matters because the same names
/// show up in the environment, the header map and the built params.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByteStr(Bytes);

impl ByteStr {
    pub fn new(str: impl Into<ByteStr>) -> ByteStr {
        str.into()
    }

    pub fn from_static(str: &'static str) -> ByteStr {
        ByteStr(Bytes::from_static(str.as_bytes()))
    }

    /// Validate `bytes` as UTF-8 without copying.
    pub fn from_utf8(bytes: Bytes) -> Result<ByteStr, Utf8Error> {
        std::str::from_utf8(&bytes)?;
        Ok(ByteStr(bytes))
    }

    pub fn as_str(&self) -> &str {
        self
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl std::ops::Deref for ByteStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        // SAFETY: constructors only accept valid UTF-8
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }
}

// Must agree with `str`'s hash for the `Borrow<str>` lookups to work.
impl Hash for ByteStr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl fmt::Debug for ByteStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for ByteStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ByteStr {
    fn as_ref(&self) -> &str {
        self
    }
}

impl Borrow<str> for ByteStr {
    fn borrow(&self) -> &str {
        self
    }
}

impl PartialEq<str> for ByteStr {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ByteStr {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<ByteStr> for str {
    fn eq(&self, other: &ByteStr) -> bool {
        self == other.as_str()
    }
}

impl From<String> for ByteStr {
    fn from(string: String) -> Self {
        ByteStr(string.into())
    }
}

impl From<&str> for ByteStr {
    fn from(str: &str) -> Self {
        ByteStr(Bytes::copy_from_slice(str.as_bytes()))
    }
}

impl From<&String> for ByteStr {
    fn from(string: &String) -> Self {
        ByteStr::from(string.as_str())
    }
}

impl From<ByteStr> for String {
    fn from(str: ByteStr) -> Self {
        str.as_str().to_owned()
    }
}
