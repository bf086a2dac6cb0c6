use super::*;

fn http(status: u16) -> TransportError {
    TransportError::Http {
        status,
        body: b"{\"error\":\"nope\"}".to_vec(),
    }
}

#[test]
fn test_unauthorized() {
    assert!(matches!(
        CurseForgeError::from(http(401)),
        CurseForgeError::Unauthorized
    ));
}

#[test]
fn test_rate_limited() {
    assert!(matches!(
        CurseForgeError::from(http(429)),
        CurseForgeError::RateLimited
    ));
}

#[test]
fn test_other_statuses_keep_code() {
    for status in [403, 404, 500, 503] {
        match CurseForgeError::from(http(status)) {
            CurseForgeError::ServerError { status: s } => assert_eq!(s, status),
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[test]
fn test_non_http_kinds_map_one_to_one() {
    assert!(matches!(
        CurseForgeError::from(TransportError::InvalidResponse),
        CurseForgeError::InvalidResponse
    ));
    assert!(matches!(
        CurseForgeError::from(TransportError::invalid_url("bad")),
        CurseForgeError::InvalidUrl(u) if u == "bad"
    ));
    let json_err = serde_json::from_str::<u32>("x").unwrap_err();
    assert!(matches!(
        CurseForgeError::from(TransportError::Decoding(json_err)),
        CurseForgeError::Decoding(_)
    ));
    let encode = serde_json::from_str::<u32>("y").unwrap_err();
    assert!(matches!(
        CurseForgeError::from(TransportError::Encoding(encode)),
        CurseForgeError::Encoding(_)
    ));
}

#[test]
fn test_search_error_message() {
    let err = CurseForgeError::from(SearchRequestError::InvalidPageSize(100));
    assert_eq!(
        err.to_string(),
        "Invalid search: Invalid page size: 100 (must be between 1 and 50)"
    );
}
