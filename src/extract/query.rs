use super::nested::NestedParams;
use crate::env::Env;
use crate::error::ParamsError;
use crate::params::ParamMap;

/// Extracts the parameters encoded in the query string.
///
/// An absent or empty query string yields an empty map.
pub fn query(env: &Env, max_depth: usize) -> Result<ParamMap, ParamsError> {
    match env.query_string() {
        Some(query) => urlencoded(query.as_bytes(), max_depth),
        None => Ok(ParamMap::new()),
    }
}

/// Decode `application/x-www-form-urlencoded` data into nested params.
pub(crate) fn urlencoded(bytes: &[u8], max_depth: usize) -> Result<ParamMap, ParamsError> {
    let pairs = serde_urlencoded::from_bytes::<Vec<(String, String)>>(bytes)?;

    let mut nested = NestedParams::new(max_depth);
    for (name, value) in pairs {
        nested.push(&name, value)?;
    }

    Ok(nested.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Value;
    use crate::MockRequest;

    #[test]
    fn decodes() {
        let env = MockRequest::new("/?name=J%C3%BCrgen+M&tags[]=a&tags[]=b&empty").into_env();
        let params = query(&env, 100).unwrap();

        assert_eq!(params.get_str("name"), Some("Jürgen M"));
        assert_eq!(params.get("tags"), Some(&Value::from(vec!["a", "b"])));
        assert_eq!(params.get_str("empty"), Some(""));
    }

    #[test]
    fn missing() {
        let env = MockRequest::new("/").into_env();
        assert!(query(&env, 100).unwrap().is_empty());
    }
}
