use super::{Indifferent, Mash, ParamMap, Symbolized};
use crate::error::ConfigError;
use crate::key::Key;

use serde::{Deserialize, Serialize, Serializer};

use std::fmt;
use std::str::FromStr;

/// Builds the params container handed to route handlers.
///
/// Builders receive the merged request parameters with string keys and
/// decide the container and key semantics of the result.
pub trait ParamBuilder: Send + Sync {
    fn build(&self, raw: ParamMap<Indifferent>) -> Params;
}

/// Builds a [`Params::Indifferent`] map.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndifferentBuilder;

impl ParamBuilder for IndifferentBuilder {
    fn build(&self, raw: ParamMap<Indifferent>) -> Params {
        Params::Indifferent(raw)
    }
}

/// Builds a [`Params::Symbolized`] map, with symbol keys at every level.
#[derive(Clone, Copy, Debug, Default)]
pub struct SymbolBuilder;

impl ParamBuilder for SymbolBuilder {
    fn build(&self, raw: ParamMap<Indifferent>) -> Params {
        Params::Symbolized(raw.rekey())
    }
}

/// Builds a [`Params::Mash`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MashBuilder;

impl ParamBuilder for MashBuilder {
    fn build(&self, raw: ParamMap<Indifferent>) -> Params {
        Params::Mash(raw.rekey())
    }
}

/// Which [`ParamBuilder`] a request uses.
///
/// In configuration files the builder is named by a string; unknown names
/// are rejected with [`ConfigError::UnknownParamBuilder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum BuildParamsWith {
    #[default]
    Indifferent,
    Symbolized,
    Mash,
}

impl BuildParamsWith {
    pub fn builder(self) -> &'static dyn ParamBuilder {
        match self {
            BuildParamsWith::Indifferent => &IndifferentBuilder,
            BuildParamsWith::Symbolized => &SymbolBuilder,
            BuildParamsWith::Mash => &MashBuilder,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BuildParamsWith::Indifferent => "indifferent",
            BuildParamsWith::Symbolized => "symbol",
            BuildParamsWith::Mash => "mash",
        }
    }
}

impl FromStr for BuildParamsWith {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "indifferent" | "hash_with_indifferent_access" => Ok(BuildParamsWith::Indifferent),
            "symbol" | "symbolized" | "hash" => Ok(BuildParamsWith::Symbolized),
            "mash" | "hashie_mash" => Ok(BuildParamsWith::Mash),
            other => Err(ConfigError::UnknownParamBuilder(other.to_owned())),
        }
    }
}

impl TryFrom<String> for BuildParamsWith {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl fmt::Display for BuildParamsWith {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Request parameters, in the container the configured builder chose.
#[derive(Clone, Debug, PartialEq)]
pub enum Params {
    Indifferent(ParamMap<Indifferent>),
    Symbolized(ParamMap<Symbolized>),
    Mash(Mash),
}

impl Params {
    /// The builder that produced these params.
    pub fn built_with(&self) -> BuildParamsWith {
        match self {
            Params::Indifferent(_) => BuildParamsWith::Indifferent,
            Params::Symbolized(_) => BuildParamsWith::Symbolized,
            Params::Mash(_) => BuildParamsWith::Mash,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Params::Indifferent(map) => map.len(),
            Params::Symbolized(map) => map.len(),
            Params::Mash(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_> {
        match self {
            Params::Indifferent(map) => Box::new(map.keys()),
            Params::Symbolized(map) => Box::new(map.keys()),
            Params::Mash(map) => Box::new(map.keys()),
        }
    }

    /// Look up a string value with the container's own key semantics.
    pub fn get_str(&self, key: impl Into<Key>) -> Option<&str> {
        match self {
            Params::Indifferent(map) => map.get_str(key),
            Params::Symbolized(map) => map.get_str(key),
            Params::Mash(map) => map.get_str(key),
        }
    }

    pub fn as_indifferent(&self) -> Option<&ParamMap<Indifferent>> {
        match self {
            Params::Indifferent(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_symbolized(&self) -> Option<&ParamMap<Symbolized>> {
        match self {
            Params::Symbolized(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mash(&self) -> Option<&Mash> {
        match self {
            Params::Mash(map) => Some(map),
            _ => None,
        }
    }
}

impl Serialize for Params {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Params::Indifferent(map) => map.serialize(serializer),
            Params::Symbolized(map) => map.serialize(serializer),
            Params::Mash(map) => map.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::sym;

    fn raw() -> ParamMap<Indifferent> {
        [("a", "123"), ("b", "xyz")].into_iter().collect()
    }

    #[test]
    fn builders() {
        let params = BuildParamsWith::default().builder().build(raw());
        assert_eq!(params.as_indifferent(), Some(&raw()));

        let params = BuildParamsWith::Symbolized.builder().build(raw());
        let expected: ParamMap<Symbolized> = [(sym("a"), "123"), (sym("b"), "xyz")]
            .into_iter()
            .collect();
        assert_eq!(params.as_symbolized(), Some(&expected));
        assert_eq!(params.get_str("a"), None);
        assert_eq!(params.get_str(sym("a")), Some("123"));

        let params = BuildParamsWith::Mash.builder().build(raw());
        assert!(matches!(params, Params::Mash(_)));
        assert_eq!(params.built_with(), BuildParamsWith::Mash);
    }

    #[test]
    fn names() {
        for (name, builder) in [
            ("indifferent", BuildParamsWith::Indifferent),
            ("hash_with_indifferent_access", BuildParamsWith::Indifferent),
            ("symbol", BuildParamsWith::Symbolized),
            ("hash", BuildParamsWith::Symbolized),
            ("mash", BuildParamsWith::Mash),
            ("hashie_mash", BuildParamsWith::Mash),
        ] {
            assert_eq!(name.parse::<BuildParamsWith>().unwrap(), builder);
        }

        let err = "Foo::ParamBuilder".parse::<BuildParamsWith>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParamBuilder(name) if name == "Foo::ParamBuilder"));
    }
}
