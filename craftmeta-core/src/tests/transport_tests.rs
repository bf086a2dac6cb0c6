use super::*;
use httpmock::prelude::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, PartialEq)]
struct Greeting {
    message: String,
}

fn executor() -> Executor {
    Executor::new(&TransportConfig::default()).unwrap()
}

#[test]
fn test_validate_response_passes_2xx() {
    let body = validate_response(204, b"ok".to_vec()).unwrap();
    assert_eq!(body, b"ok");
}

#[test]
fn test_validate_response_keeps_error_body() {
    match validate_response(404, b"{\"error\":\"x\"}".to_vec()) {
        Err(TransportError::Http { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, b"{\"error\":\"x\"}");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[test]
fn test_validate_response_rejects_unusable_status() {
    assert!(matches!(
        validate_response(799, Vec::new()),
        Err(TransportError::InvalidResponse)
    ));
    assert!(matches!(
        validate_response(42, Vec::new()),
        Err(TransportError::InvalidResponse)
    ));
}

#[test]
fn test_validate_response_redirect_is_http_error() {
    assert_eq!(validate_response(304, Vec::new()).unwrap_err().status(), Some(304));
}

#[test]
fn test_url_with_segments_encodes_identifiers() {
    let url = url_with_segments("https://api.example.com", &["users", "a b/c"]).unwrap();
    assert_eq!(url.as_str(), "https://api.example.com/users/a%20b%2Fc");
}

#[test]
fn test_url_with_segments_rejects_dot_segments() {
    for dots in [".", ".."] {
        let result = url_with_segments(
            "https://api.mojang.com",
            &["users", "profiles", "minecraft", dots],
        );
        assert!(
            matches!(result, Err(TransportError::InvalidUrl(_))),
            "{}",
            dots
        );
    }
    let url = url_with_segments("https://api.example.com", &["users", "..a", "b."]).unwrap();
    assert_eq!(url.as_str(), "https://api.example.com/users/..a/b.");
}

#[test]
fn test_url_with_segments_keeps_base_path() {
    let url = url_with_segments("https://api.example.com/v1/", &["mods", "42"]).unwrap();
    assert_eq!(url.as_str(), "https://api.example.com/v1/mods/42");
}

#[test]
fn test_parse_url_rejects_garbage() {
    assert!(matches!(
        parse_url("not a url"),
        Err(TransportError::InvalidUrl(_))
    ));
}

#[test]
fn test_decode_json_reports_decoding_error() {
    let result: Result<Greeting, _> = decode_json(b"{\"nope\": 1}");
    assert!(matches!(result, Err(TransportError::Decoding(_))));
}

#[tokio::test]
async fn test_get_json_decodes_body_and_sends_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/hello").header("x-test", "yes");
            then.status(200).json_body(json!({ "message": "hi" }));
        })
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("x-test", HeaderValue::from_static("yes"));

    let url = parse_url(&server.url("/hello")).unwrap();
    let greeting: Greeting = executor().get_json(url, &headers).await.unwrap();

    assert_eq!(greeting.message, "hi");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_json_http_error_preserves_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("{\"errorMessage\":\"gone\"}");
        })
        .await;

    let url = parse_url(&server.url("/missing")).unwrap();
    let err = executor()
        .get_json::<Greeting>(url, &HeaderMap::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.body_text().as_deref(), Some("{\"errorMessage\":\"gone\"}"));
}

#[tokio::test]
async fn test_get_json_decode_failure_is_not_defaulted() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/hello");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let url = parse_url(&server.url("/hello")).unwrap();
    let result = executor().get_json::<Greeting>(url, &HeaderMap::new()).await;
    assert!(matches!(result, Err(TransportError::Decoding(_))));
}

#[tokio::test]
async fn test_get_bytes_returns_raw_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/list");
            then.status(200).body("aaa\nbbb\n");
        })
        .await;

    let url = parse_url(&server.url("/list")).unwrap();
    let body = executor().get_bytes(url, &HeaderMap::new()).await.unwrap();
    assert_eq!(body, b"aaa\nbbb\n");
}

#[tokio::test]
async fn test_post_json_sends_json_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lookup")
                .header("content-type", "application/json")
                .json_body(json!(["A", "b"]));
            then.status(200).body("[]");
        })
        .await;

    let url = parse_url(&server.url("/lookup")).unwrap();
    let keys = vec!["A".to_string(), "b".to_string()];
    let body = executor()
        .post_json(url, &keys, &HeaderMap::new())
        .await
        .unwrap();

    assert_eq!(body, b"[]");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_json_unencodable_body_never_sent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).body("[]");
        })
        .await;

    // JSON object keys must be strings.
    let body = std::collections::BTreeMap::from([((1, 2), "pair")]);
    let url = parse_url(&server.url("/lookup")).unwrap();
    let err = executor()
        .post_json(url, &body, &HeaderMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Encoding(_)));
    assert!(err.to_string().starts_with("Failed to encode request body"));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_reload_policy_sends_no_cache() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/fresh").header("cache-control", "no-cache");
            then.status(200).json_body(json!({ "message": "fresh" }));
        })
        .await;

    let config = TransportConfig {
        cache_policy: CachePolicy::ReloadIgnoringCache,
        ..TransportConfig::default()
    };
    let executor = Executor::new(&config).unwrap();
    let url = parse_url(&server.url("/fresh")).unwrap();
    let greeting: Greeting = executor.get_json(url, &HeaderMap::new()).await.unwrap();

    assert_eq!(greeting.message, "fresh");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    // Port 9 (discard) on localhost is not expected to accept HTTP.
    let url = parse_url("http://127.0.0.1:9/nothing").unwrap();
    let result = executor().get_bytes(url, &HeaderMap::new()).await;
    assert!(matches!(result, Err(TransportError::Network(_))));
}
