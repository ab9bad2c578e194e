//! Parameter containers.
//!
//! Every container is a [`ParamMap`]: an insertion-ordered map whose key
//! semantics are decided by a [`KeyPolicy`]. The policy normalizes keys as
//! they are stored and as they are looked up, which is all it takes to
//! express indifferent access, symbol-keyed maps and mashes with one type.

mod builder;
mod mash;

pub use builder::{
    BuildParamsWith, IndifferentBuilder, MashBuilder, ParamBuilder, Params, SymbolBuilder,
};
pub use mash::{Mash, MashKeys};

use crate::http::ByteStr;
use crate::key::Key;

use indexmap::map::{self, Entry, IndexMap};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use std::fmt;
use std::marker::PhantomData;

/// Decides how keys are stored and looked up in a [`ParamMap`].
pub trait KeyPolicy: 'static {
    /// The form a key is stored in.
    fn store(key: Key) -> Key;

    /// The form a key is looked up in.
    fn lookup(key: Key) -> Key {
        Self::store(key)
    }
}

/// String and symbol forms of a key address the same entry.
/// Keys are stored as strings.
#[derive(Debug)]
pub struct Indifferent;

impl KeyPolicy for Indifferent {
    fn store(key: Key) -> Key {
        key.into_string_key()
    }
}

/// Keys are stored as symbols and looked up exactly, so a string key
/// never matches.
#[derive(Debug)]
pub struct Symbolized;

impl KeyPolicy for Symbolized {
    fn store(key: Key) -> Key {
        key.into_symbol_key()
    }

    fn lookup(key: Key) -> Key {
        key
    }
}

/// A parameter value.
pub enum Value<P = Indifferent> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value<P>>),
    Map(ParamMap<P>),
}

impl<P: KeyPolicy> Value<P> {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(str) => Some(str),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(int) => Some(int),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(float) => Some(float),
            Value::Int(int) => Some(int as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(bool) => Some(bool),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value<P>]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ParamMap<P>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ParamMap<P>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Everything except `Null` and `false` is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    /// Name of the value's shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Int(_) => "Integer",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Map(_) => "Hash",
        }
    }

    /// Convert nested maps to another key policy.
    pub fn rekey<Q: KeyPolicy>(self) -> Value<Q> {
        match self {
            Value::Null => Value::Null,
            Value::Bool(bool) => Value::Bool(bool),
            Value::Int(int) => Value::Int(int),
            Value::Float(float) => Value::Float(float),
            Value::String(str) => Value::String(str),
            Value::Array(items) => Value::Array(items.into_iter().map(Value::rekey).collect()),
            Value::Map(map) => Value::Map(map.rekey()),
        }
    }
}

impl<P> Clone for Value<P> {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(bool) => Value::Bool(*bool),
            Value::Int(int) => Value::Int(*int),
            Value::Float(float) => Value::Float(*float),
            Value::String(str) => Value::String(str.clone()),
            Value::Array(items) => Value::Array(items.clone()),
            Value::Map(map) => Value::Map(map.clone()),
        }
    }
}

impl<P> PartialEq for Value<P> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<P> PartialEq<str> for Value<P> {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::String(str) if str == other)
    }
}

impl<P> PartialEq<&str> for Value<P> {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Value::String(str) if str == other)
    }
}

impl<P> fmt::Debug for Value<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(bool) => fmt::Debug::fmt(bool, f),
            Value::Int(int) => fmt::Debug::fmt(int, f),
            Value::Float(float) => fmt::Debug::fmt(float, f),
            Value::String(str) => fmt::Debug::fmt(str, f),
            Value::Array(items) => f.debug_list().entries(items).finish(),
            Value::Map(map) => fmt::Debug::fmt(map, f),
        }
    }
}

impl<P> Serialize for Value<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(bool) => serializer.serialize_bool(*bool),
            Value::Int(int) => serializer.serialize_i64(*int),
            Value::Float(float) => serializer.serialize_f64(*float),
            Value::String(str) => serializer.serialize_str(str),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => map.serialize(serializer),
        }
    }
}

impl<P> From<&str> for Value<P> {
    fn from(str: &str) -> Self {
        Value::String(str.to_owned())
    }
}

impl<P> From<String> for Value<P> {
    fn from(string: String) -> Self {
        Value::String(string)
    }
}

impl<P> From<ByteStr> for Value<P> {
    fn from(str: ByteStr) -> Self {
        Value::String(str.into())
    }
}

impl<P> From<bool> for Value<P> {
    fn from(bool: bool) -> Self {
        Value::Bool(bool)
    }
}

impl<P> From<i64> for Value<P> {
    fn from(int: i64) -> Self {
        Value::Int(int)
    }
}

impl<P> From<f64> for Value<P> {
    fn from(float: f64) -> Self {
        Value::Float(float)
    }
}

impl<P> From<ParamMap<P>> for Value<P> {
    fn from(map: ParamMap<P>) -> Self {
        Value::Map(map)
    }
}

impl<P, T> From<Vec<T>> for Value<P>
where
    T: Into<Value<P>>,
{
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(feature = "json")]
impl<P: KeyPolicy> From<serde_json::Value> for Value<P> {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(bool) => Value::Bool(bool),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(int) => Value::Int(int),
                None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(string) => Value::String(string),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => Value::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// An insertion-ordered parameter map with key semantics decided by `P`.
///
/// Equality ignores order, the way two request param maps with the same
/// entries are considered the same.
pub struct ParamMap<P = Indifferent> {
    map: IndexMap<Key, Value<P>>,
    _policy: PhantomData<fn() -> P>,
}

impl<P: KeyPolicy> ParamMap<P> {
    pub fn new() -> Self {
        ParamMap::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ParamMap {
            map: IndexMap::with_capacity(capacity),
            _policy: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, key: impl Into<Key>) -> Option<&Value<P>> {
        self.map.get(&P::lookup(key.into()))
    }

    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value<P>> {
        self.map.get_mut(&P::lookup(key.into()))
    }

    /// Shorthand for `get(key).and_then(Value::as_str)`.
    pub fn get_str(&self, key: impl Into<Key>) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.get(key).is_some()
    }

    /// Insert a value, returning the one previously stored under the key.
    ///
    /// Replacing an entry keeps its position.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value<P>>) -> Option<Value<P>> {
        self.map.insert(P::store(key.into()), value.into())
    }

    /// Remove an entry, preserving the order of the others.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value<P>> {
        self.map.shift_remove(&P::lookup(key.into()))
    }

    /// The value under `key`, inserting one made by `default` if absent
    /// or null.
    pub fn get_or_insert_with<F>(&mut self, key: impl Into<Key>, default: F) -> &mut Value<P>
    where
        F: FnOnce() -> Value<P>,
    {
        let slot = self
            .map
            .entry(P::store(key.into()))
            .or_insert(Value::Null);

        if slot.is_null() {
            *slot = default();
        }

        slot
    }

    pub fn keys(&self) -> map::Keys<'_, Key, Value<P>> {
        self.map.keys()
    }

    pub fn values(&self) -> map::Values<'_, Key, Value<P>> {
        self.map.values()
    }

    pub fn iter(&self) -> map::Iter<'_, Key, Value<P>> {
        self.map.iter()
    }

    /// Convert the map, and every map nested in it, to another key policy.
    ///
    /// Keys that collapse to the same stored form keep the last value.
    pub fn rekey<Q: KeyPolicy>(self) -> ParamMap<Q> {
        let mut out = ParamMap::with_capacity(self.len());
        for (key, value) in self.map {
            out.insert(key, value.rekey::<Q>());
        }
        out
    }

    /// Merge `other` into this map, recursing into maps present on both
    /// sides. Values from `other` win on conflicts.
    pub fn deep_merge(&mut self, other: ParamMap<P>) {
        self.merge_with(other, true);
    }

    /// Merge `other` into this map, recursing into maps present on both
    /// sides. Values already present win on conflicts.
    pub fn reverse_deep_merge(&mut self, other: ParamMap<P>) {
        self.merge_with(other, false);
    }

    fn merge_with(&mut self, other: ParamMap<P>, overwrite: bool) {
        for (key, value) in other.map {
            match self.map.entry(key) {
                Entry::Occupied(mut entry) => match (entry.get_mut(), value) {
                    (Value::Map(ours), Value::Map(theirs)) => ours.merge_with(theirs, overwrite),
                    (ours, theirs) => {
                        if overwrite {
                            *ours = theirs;
                        }
                    }
                },
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
            }
        }
    }
}

impl<P: KeyPolicy> Default for ParamMap<P> {
    fn default() -> Self {
        ParamMap::new()
    }
}

impl<P> Clone for ParamMap<P> {
    fn clone(&self) -> Self {
        ParamMap {
            map: self.map.clone(),
            _policy: PhantomData,
        }
    }
}

impl<P> PartialEq for ParamMap<P> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<P> fmt::Debug for ParamMap<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl<P> Serialize for ParamMap<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.map.len()))?;
        for (key, value) in &self.map {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

impl<P, K, V> FromIterator<(K, V)> for ParamMap<P>
where
    P: KeyPolicy,
    K: Into<Key>,
    V: Into<Value<P>>,
{
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut map = ParamMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<P> IntoIterator for ParamMap<P> {
    type Item = (Key, Value<P>);
    type IntoIter = map::IntoIter<Key, Value<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a, P> IntoIterator for &'a ParamMap<P> {
    type Item = (&'a Key, &'a Value<P>);
    type IntoIter = map::Iter<'a, Key, Value<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::sym;

    #[test]
    fn indifferent_access() {
        let mut map = ParamMap::<Indifferent>::new();
        map.insert(sym("a"), "123");
        map.insert("b", "xyz");

        assert_eq!(map.get("a"), Some(&Value::from("123")));
        assert_eq!(map.get(sym("b")).and_then(Value::as_str), Some("xyz"));
        assert!(map.keys().all(|key| !key.is_symbol()));

        map.insert("a", "456");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_str(sym("a")), Some("456"));
    }

    #[test]
    fn symbolized_access() {
        let map: ParamMap<Symbolized> = [("a", "123")].into_iter().collect();

        assert_eq!(map.get_str(sym("a")), Some("123"));
        assert_eq!(map.get("a"), None);
        assert!(map.keys().all(Key::is_symbol));
    }

    #[test]
    fn equality_ignores_order() {
        let a: ParamMap = [("a", "1"), ("b", "2")].into_iter().collect();
        let b: ParamMap = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn deep_merge() {
        let mut ours: ParamMap = ParamMap::new();
        ours.insert("a", "1");
        ours.insert("user", [("name", "bob"), ("age", "30")].into_iter().collect::<ParamMap>());

        let mut theirs: ParamMap = ParamMap::new();
        theirs.insert("a", "2");
        theirs.insert("user", [("name", "alice")].into_iter().collect::<ParamMap>());

        let mut merged = ours.clone();
        merged.deep_merge(theirs.clone());
        assert_eq!(merged.get_str("a"), Some("2"));
        let user = merged.get("user").and_then(Value::as_map).unwrap();
        assert_eq!(user.get_str("name"), Some("alice"));
        assert_eq!(user.get_str("age"), Some("30"));

        let mut merged = ours;
        merged.reverse_deep_merge(theirs);
        assert_eq!(merged.get_str("a"), Some("1"));
        let user = merged.get("user").and_then(Value::as_map).unwrap();
        assert_eq!(user.get_str("name"), Some("bob"));
    }

    #[test]
    fn rekey_nested() {
        let mut map: ParamMap = ParamMap::new();
        map.insert(
            "items",
            vec![Value::<Indifferent>::Map([("id", "1")].into_iter().collect())],
        );

        let map = map.rekey::<Symbolized>();
        let items = map.get(sym("items")).and_then(Value::as_array).unwrap();
        let item = items[0].as_map().unwrap();
        assert_eq!(item.get_str(sym("id")), Some("1"));
        assert_eq!(item.get_str("id"), None);
    }

    #[test]
    fn get_or_insert_replaces_null() {
        let mut map: ParamMap = ParamMap::new();
        map.insert("a", Value::<Indifferent>::Null);

        let slot = map.get_or_insert_with("a", || Value::Array(Vec::new()));
        assert_eq!(slot.kind(), "Array");
    }
}
