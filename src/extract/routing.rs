use crate::env::Env;
use crate::params::ParamMap;

/// Routing arguments the router keeps for itself. They never reach params.
pub const RESERVED_ROUTING_KEYS: [&str; 2] = ["version", "route_info"];

/// Extracts the arguments the router attached to the request, without
/// the reserved ones. Keys are coerced to strings.
pub fn routing_args(env: &Env) -> ParamMap {
    let args = match env.routing_args() {
        Some(args) => args,
        None => return ParamMap::new(),
    };

    args.iter()
        .filter(|(key, _)| {
            let reserved = RESERVED_ROUTING_KEYS.contains(&key.as_str());
            if reserved {
                log::trace!("dropping reserved routing argument `{}`", key);
            }
            !reserved
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::sym;
    use crate::MockRequest;

    #[test]
    fn drops_reserved_keys() {
        let env = MockRequest::new("/")
            .routing_arg(sym("version"), "123")
            .routing_arg(sym("route_info"), "456")
            .routing_arg(sym("c"), "ccc")
            .routing_arg("version", "v2")
            .into_env();

        let args = routing_args(&env);
        assert_eq!(args.len(), 1);
        assert_eq!(args.get_str("c"), Some("ccc"));
        assert!(!args.contains_key("version"));
        assert!(!args.contains_key("route_info"));
    }

    #[test]
    fn none() {
        let env = MockRequest::new("/").into_env();
        assert!(routing_args(&env).is_empty());
    }
}
