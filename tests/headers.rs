use corral::http::{normalize_header_name, HeaderCase, Headers};
use corral::{sym, Env, MockRequest, Options, Request};

fn request(env: Env, case: HeaderCase) -> Request {
    Request::with_options(env, Options::default().header_case(case))
}

#[test]
fn cuts_prefix_and_capitalizes_words() {
    let env = || MockRequest::new("/").env("HTTP_X_GRAPE_IS_COOL", "yeah").into_env();

    let title = request(env(), HeaderCase::TitleCase);
    assert_eq!(title.headers(), &Headers::from_iter([("X-Grape-Is-Cool", "yeah")]));

    let lower = request(env(), HeaderCase::Lowercase);
    assert_eq!(lower.headers(), &Headers::from_iter([("x-grape-is-cool", "yeah")]));
}

#[test]
fn ignores_non_header_keys() {
    let env = MockRequest::new("/")
        .env("HTP_X_GRAPE_ENTITY_TOO", "but now we are testing Grape")
        .into_env();

    for case in [HeaderCase::TitleCase, HeaderCase::Lowercase] {
        assert!(request(env.clone(), case).headers().is_empty());
    }
}

#[test]
fn symbolic_names() {
    let env = MockRequest::new("/")
        .env(sym("HTTP_GRAPE_LIKES_SYMBOLIC"), "it is true")
        .into_env();

    let title = request(env.clone(), HeaderCase::TitleCase);
    assert_eq!(
        title.headers(),
        &Headers::from_iter([("Grape-Likes-Symbolic", "it is true")])
    );

    let lower = request(env, HeaderCase::Lowercase);
    assert_eq!(
        lower.headers(),
        &Headers::from_iter([("grape-likes-symbolic", "it is true")])
    );
}

#[test]
fn content_headers_are_not_http_headers() {
    let env = MockRequest::new("/")
        .header("Content-Type", "text/plain")
        .header("Accept", "*/*")
        .into_env();

    let headers = Request::new(env).headers().clone();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("accept"), Some("*/*"));
    assert!(!headers.contains("content-type"));
}

#[test]
fn case_insensitive() {
    let mut headers = Headers::new();
    assert!(headers.is_empty());

    headers.insert("X-Foo", "a");
    headers.insert("Accept", "b");

    assert_eq!(headers.get("x-foo"), Some("a"));
    assert_eq!(headers.get("X-FOO"), Some("a"));
    assert_eq!(headers.remove("ACCEPT").as_deref(), Some("b"));
    assert_eq!(headers.get("accept"), None);

    headers.insert("X-Foo", "c");
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("x-foo"), Some("c"));
}

#[test]
fn keeps_environment_order() {
    let env = MockRequest::new("/")
        .env("HTTP_B", "2")
        .env("HTTP_A", "1")
        .env("HTTP_C", "3")
        .into_env();

    let names: Vec<_> = Request::new(env)
        .headers()
        .iter()
        .map(|(name, _)| name.to_owned())
        .collect();
    assert_eq!(names, ["b", "a", "c"]);
}

#[test]
fn normalizer_is_total() {
    for key in ["", "HTTP", "HTTP_", "_HTTP_X", "héllo", "HTTP_Ünïcode_ok"] {
        let _ = normalize_header_name(key, HeaderCase::TitleCase);
        let _ = normalize_header_name(key, HeaderCase::Lowercase);
    }

    assert_eq!(
        normalize_header_name("HTTP_Ünïcode_ok", HeaderCase::TitleCase).as_deref(),
        Some("Ünïcode-Ok")
    );
}
