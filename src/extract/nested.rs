use crate::error::ParamsError;
use crate::params::{ParamMap, Value};

/// Folds `name=value` pairs with bracketed names into nested params.
///
/// `a[b]=1` nests a map, `a[]=1` appends to an array and `a[][b]=1`
/// builds an array of maps, starting a new element whenever the last one
/// already has the key.
pub(crate) struct NestedParams {
    params: ParamMap,
    limit: usize,
}

impl NestedParams {
    pub(crate) fn new(limit: usize) -> NestedParams {
        NestedParams {
            params: ParamMap::new(),
            limit,
        }
    }

    pub(crate) fn push(&mut self, name: &str, value: String) -> Result<(), ParamsError> {
        normalize(&mut self.params, name, Value::String(value), 0, self.limit)
    }

    pub(crate) fn finish(self) -> ParamMap {
        self.params
    }
}

/// Split a name into the key at this level and the rest.
fn split(name: &str, depth: usize) -> (&str, &str) {
    if depth == 0 {
        // a leading bracket belongs to the key
        return match name.bytes().skip(1).position(|b| b == b'[') {
            Some(i) => name.split_at(i + 1),
            None => (name, ""),
        };
    }

    if let Some(after) = name.strip_prefix("[]") {
        return ("[]", after);
    }

    if name.starts_with('[') {
        if let Some(end) = name.bytes().skip(1).position(|b| b == b']') {
            let end = end + 1;
            return (&name[1..end], &name[end + 1..]);
        }
    }

    (name, "")
}

fn normalize(
    params: &mut ParamMap,
    name: &str,
    value: Value,
    depth: usize,
    limit: usize,
) -> Result<(), ParamsError> {
    if depth >= limit {
        return Err(ParamsError::TooDeep { limit });
    }

    let (key, after) = split(name, depth);

    if key.is_empty() {
        return Ok(());
    }

    if after.is_empty() {
        // a nested bare `[]` only means something as a new array element
        if key != "[]" || depth == 0 {
            params.insert(key, value);
        }
        return Ok(());
    }

    if after == "[" {
        params.insert(name, value);
        return Ok(());
    }

    if after == "[]" {
        array_at(params, key)?.push(value);
        return Ok(());
    }

    if let Some(rest) = after.strip_prefix("[]") {
        let child_key = rest
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .filter(|key| !key.is_empty() && !key.contains(|c: char| c == '[' || c == ']'))
            .unwrap_or(rest);

        let items = array_at(params, key)?;

        if let Some(Value::Map(last)) = items.last_mut() {
            if !has_key(last, child_key) {
                return normalize(last, child_key, value, depth + 1, limit);
            }
        }

        let item = element(child_key, value, depth + 1, limit)?;
        items.push(item);
        return Ok(());
    }

    let nested = map_at(params, key)?;
    normalize(nested, after, value, depth + 1, limit)
}

/// A fresh array element for `name`.
fn element(name: &str, value: Value, depth: usize, limit: usize) -> Result<Value, ParamsError> {
    if depth >= limit {
        return Err(ParamsError::TooDeep { limit });
    }

    if name == "[]" {
        return Ok(Value::Array(vec![value]));
    }

    let mut map = ParamMap::new();
    normalize(&mut map, name, value, depth, limit)?;
    Ok(Value::Map(map))
}

fn array_at<'a>(params: &'a mut ParamMap, key: &str) -> Result<&'a mut Vec<Value>, ParamsError> {
    match params.get_or_insert_with(key, || Value::Array(Vec::new())) {
        Value::Array(items) => Ok(items),
        other => Err(conflict(key, "Array", other)),
    }
}

fn map_at<'a>(params: &'a mut ParamMap, key: &str) -> Result<&'a mut ParamMap, ParamsError> {
    match params.get_or_insert_with(key, || Value::Map(ParamMap::new())) {
        Value::Map(map) => Ok(map),
        other => Err(conflict(key, "Hash", other)),
    }
}

fn conflict(name: &str, expected: &'static str, got: &Value) -> ParamsError {
    ParamsError::TypeConflict {
        name: name.to_owned(),
        expected,
        got: got.kind(),
    }
}

/// Whether the bracketed path `key` already resolves inside `map`.
fn has_key(map: &ParamMap, key: &str) -> bool {
    if key.contains("[]") {
        return false;
    }

    let mut map = map;
    let mut parts = key
        .split(|c: char| c == '[' || c == ']')
        .filter(|part| !part.is_empty())
        .peekable();

    while let Some(part) = parts.next() {
        let value = match map.get(part) {
            Some(value) => value,
            None => return false,
        };

        if parts.peek().is_none() {
            break;
        }

        match value {
            Value::Map(inner) => map = inner,
            _ => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pairs: &[(&str, &str)]) -> Result<ParamMap, ParamsError> {
        let mut nested = NestedParams::new(100);
        for (name, value) in pairs {
            nested.push(name, value.to_string())?;
        }
        Ok(nested.finish())
    }

    fn map(pairs: &[(&str, Value)]) -> Value {
        Value::Map(pairs.iter().cloned().collect())
    }

    #[test]
    fn flat() {
        let params = parse(&[("a", "1"), ("b", "2"), ("a", "3")]).unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params.get_str("a"), Some("3"));
        assert_eq!(params.get_str("b"), Some("2"));
    }

    #[test]
    fn empty_names_are_ignored() {
        let params = parse(&[("", "1")]).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn hashes() {
        let params = parse(&[("user[name]", "bob"), ("user[address][city]", "Paris")]).unwrap();

        let expected = map(&[
            ("name", "bob".into()),
            ("address", map(&[("city", "Paris".into())])),
        ]);
        assert_eq!(params.get("user"), Some(&expected));
    }

    #[test]
    fn arrays() {
        let params = parse(&[("ids[]", "1"), ("ids[]", "2")]).unwrap();
        assert_eq!(params.get("ids"), Some(&Value::from(vec!["1", "2"])));
    }

    #[test]
    fn arrays_of_hashes() {
        let params = parse(&[
            ("items[][id]", "1"),
            ("items[][name]", "a"),
            ("items[][id]", "2"),
        ])
        .unwrap();

        let expected = Value::Array(vec![
            map(&[("id", "1".into()), ("name", "a".into())]),
            map(&[("id", "2".into())]),
        ]);
        assert_eq!(params.get("items"), Some(&expected));
    }

    #[test]
    fn nested_arrays() {
        let params = parse(&[("a[][]", "1"), ("a[][]", "2")]).unwrap();

        let expected = Value::Array(vec![vec!["1"].into(), vec!["2"].into()]);
        assert_eq!(params.get("a"), Some(&expected));
    }

    #[test]
    fn leading_bracket_is_part_of_the_key() {
        let params = parse(&[("[a]", "1"), ("b[", "2")]).unwrap();

        assert_eq!(params.get_str("[a]"), Some("1"));
        assert_eq!(params.get_str("b["), Some("2"));
    }

    #[test]
    fn type_conflicts() {
        let err = parse(&[("a", "1"), ("a[b]", "2")]).unwrap_err();
        assert_eq!(err.to_string(), "expected Hash (got String) for param `a`");

        let err = parse(&[("a[b]", "1"), ("a[]", "2")]).unwrap_err();
        assert_eq!(err.to_string(), "expected Array (got Hash) for param `a`");
    }

    #[test]
    fn depth_limit() {
        let mut nested = NestedParams::new(3);
        assert!(nested.push("a[b][c]", "1".into()).is_ok());
        assert!(nested.push("y[z][]", "2".into()).is_ok());
        assert!(matches!(
            nested.push("x[b][c][d]", "1".into()),
            Err(ParamsError::TooDeep { limit: 3 })
        ));

        let params = nested.finish();
        let c = params
            .get("a")
            .and_then(Value::as_map)
            .and_then(|a| a.get("b"))
            .and_then(Value::as_map)
            .and_then(|b| b.get_str("c"));
        assert_eq!(c, Some("1"));
        assert!(params.contains_key("y"));
    }
}
