use super::{KeyPolicy, ParamMap, Value};
use crate::key::Key;

/// Key policy of a [`Mash`]: keys are stored as strings and both forms
/// look them up.
#[derive(Debug)]
pub struct MashKeys;

impl KeyPolicy for MashKeys {
    fn store(key: Key) -> Key {
        key.into_string_key()
    }
}

/// A map with attribute-style access.
///
/// Beyond plain lookups a mash answers attribute reads (`attr`),
/// predicate reads (`is_set`) and dotted paths (`dig`). Nested maps are
/// mashes too.
pub type Mash = ParamMap<MashKeys>;

impl ParamMap<MashKeys> {
    /// Read an attribute.
    pub fn attr(&self, name: &str) -> Option<&Value<MashKeys>> {
        self.get(name)
    }

    /// Whether the attribute is present and truthy.
    pub fn is_set(&self, name: &str) -> bool {
        self.attr(name).map_or(false, Value::is_truthy)
    }

    /// Follow a dotted path through nested maps and arrays.
    ///
    /// Numeric segments index into arrays: `dig("items.0.id")`.
    pub fn dig(&self, path: &str) -> Option<&Value<MashKeys>> {
        let mut segments = path.split('.');
        let mut current = self.attr(segments.next()?)?;

        for segment in segments {
            current = match current {
                Value::Map(map) => map.attr(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current)
    }

    /// Shorthand for `dig(path).and_then(Value::as_str)`.
    pub fn dig_str(&self, path: &str) -> Option<&str> {
        self.dig(path).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::sym;

    fn mash() -> Mash {
        let mut user = Mash::new();
        user.insert("name", "bob");
        user.insert("admin", false);

        let mut item = Mash::new();
        item.insert("id", "7");

        let mut mash = Mash::new();
        mash.insert(sym("user"), user);
        mash.insert("items", vec![Value::Map(item)]);
        mash
    }

    #[test]
    fn attributes() {
        let mash = mash();

        assert!(mash.attr("user").is_some());
        assert!(mash.is_set("user"));
        assert!(!mash.is_set("missing"));
        assert_eq!(mash.get(sym("user")), mash.get("user"));
    }

    #[test]
    fn dotted_paths() {
        let mash = mash();

        assert_eq!(mash.dig_str("user.name"), Some("bob"));
        assert_eq!(mash.dig("user.admin").and_then(Value::as_bool), Some(false));
        assert_eq!(mash.dig_str("items.0.id"), Some("7"));
        assert_eq!(mash.dig("items.1.id"), None);
        assert_eq!(mash.dig("items.first"), None);
        assert_eq!(mash.dig("user.name.first"), None);
        assert_eq!(mash.dig(""), None);
    }

    #[test]
    fn keeps_insertion_order() {
        let keys: Vec<_> = mash().keys().map(Key::as_str).map(str::to_owned).collect();
        assert_eq!(keys, ["user", "items"]);
    }
}
