use crate::http::ByteStr;

use std::fmt;

/// The symbol form of a name.
///
/// A symbol and a string with the same text are different keys unless a
/// [`KeyPolicy`](crate::params::KeyPolicy) says otherwise.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(ByteStr);

impl Symbol {
    pub fn new(name: impl Into<ByteStr>) -> Symbol {
        Symbol(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Shorthand for [`Symbol::new`].
pub fn sym(name: impl Into<ByteStr>) -> Symbol {
    Symbol::new(name)
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key in the environment or a params map, in string or symbol form.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Str(ByteStr),
    Sym(Symbol),
}

impl Key {
    /// The key's text, whatever its form.
    pub fn as_str(&self) -> &str {
        match self {
            Key::Str(str) => str,
            Key::Sym(sym) => sym.as_str(),
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Key::Sym(_))
    }

    /// Coerce to the string form.
    pub fn into_string_key(self) -> Key {
        match self {
            Key::Sym(Symbol(name)) => Key::Str(name),
            key => key,
        }
    }

    /// Coerce to the symbol form.
    pub fn into_symbol_key(self) -> Key {
        match self {
            Key::Str(name) => Key::Sym(Symbol(name)),
            key => key,
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(str) => fmt::Debug::fmt(str, f),
            Key::Sym(sym) => fmt::Debug::fmt(sym, f),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Key {
    fn from(str: &str) -> Self {
        Key::Str(str.into())
    }
}

impl From<String> for Key {
    fn from(string: String) -> Self {
        Key::Str(string.into())
    }
}

impl From<ByteStr> for Key {
    fn from(str: ByteStr) -> Self {
        Key::Str(str)
    }
}

impl From<Symbol> for Key {
    fn from(sym: Symbol) -> Self {
        Key::Sym(sym)
    }
}

impl From<&Symbol> for Key {
    fn from(sym: &Symbol) -> Self {
        Key::Sym(sym.clone())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forms() {
        let str = Key::from("a");
        let sym = Key::from(sym("a"));

        assert_ne!(str, sym);
        assert_eq!(str.as_str(), sym.as_str());
        assert_eq!(sym.clone().into_string_key(), str);
        assert_eq!(str.clone().into_symbol_key(), sym);
        assert_eq!(format!("{:?}", sym), ":a");
        assert_eq!(format!("{:?}", str), "\"a\"");
    }
}
