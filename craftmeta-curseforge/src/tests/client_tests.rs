use super::*;
use crate::pagination::Pagination;
use crate::search::{ClassId, SearchRequestError, SortField, SortOrder};
use httpmock::prelude::*;
use serde_json::json;

const KEY: &str = "test-key";

fn client_for(server: &MockServer) -> CurseForgeClient {
    CurseForgeClient::new(CurseForgeConfig::new(KEY).with_base_url(server.url("/v1"))).unwrap()
}

fn mod_json(id: u64, name: &str, class_id: u32) -> serde_json::Value {
    json!({
        "id": id,
        "gameId": 432,
        "name": name,
        "slug": name.to_lowercase().replace(' ', "-"),
        "summary": "",
        "downloadCount": 1000,
        "classId": class_id,
        "dateCreated": "2020-01-01T00:00:00Z",
        "dateModified": "2024-06-01T12:00:00.123Z",
        "dateReleased": "2024-06-01T12:00:00.12Z"
    })
}

fn page_json(index: i64, page_size: i64, total: i64, data: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "data": data,
        "pagination": {
            "index": index,
            "pageSize": page_size,
            "resultCount": (total - index).clamp(0, page_size),
            "totalCount": total
        }
    })
}

#[test]
fn test_empty_key_rejected() {
    for key in ["", "   "] {
        assert!(matches!(
            CurseForgeClient::new(CurseForgeConfig::new(key)),
            Err(CurseForgeError::MissingApiKey)
        ));
    }
}

#[test]
fn test_default_base_url() {
    let client = CurseForgeClient::new(CurseForgeConfig::new(KEY)).unwrap();
    assert_eq!(client.config().base_url, "https://api.curseforge.com/v1");
}

#[tokio::test]
async fn test_search_sends_headers_and_params() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/mods/search")
                .header("x-api-key", KEY)
                .header("accept", "application/json")
                .query_param("gameId", "432")
                .query_param("classId", "4471")
                .query_param("sortField", "3")
                .query_param("sortOrder", "asc")
                .query_param("index", "0")
                .query_param("pageSize", "10")
                .query_param("searchFilter", "sky");
            then.status(200)
                .json_body(page_json(0, 10, 1, vec![mod_json(1, "Sky Pack", 4471)]));
        })
        .await;

    let request = SearchRequest::modpacks()
        .search_filter("sky")
        .sort_by(SortField::LastUpdated, SortOrder::Asc)
        .page_size(10);
    let response = client_for(&server).search(&request).await.unwrap();

    assert_eq!(response.len(), 1);
    assert!(response.data[0].is_modpack());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_search_never_hits_network() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let client = client_for(&server);
    let err = client
        .search(&SearchRequest::mods().page_size(100))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CurseForgeError::InvalidSearch(SearchRequestError::InvalidPageSize(100))
    ));

    let err = client.search(&SearchRequest::mods().page(-1)).await.unwrap_err();
    assert!(matches!(
        err,
        CurseForgeError::InvalidSearch(SearchRequestError::InvalidIndex(-1))
    ));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_search_mods_with_loader() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/mods/search")
                .query_param("classId", "6")
                .query_param("searchFilter", "create")
                .query_param("modLoaderType", "4");
            then.status(200).json_body(page_json(0, 25, 0, vec![]));
        })
        .await;

    let response = client_for(&server)
        .search_mods("create", Some(ModLoader::Fabric))
        .await
        .unwrap();
    assert!(response.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_modpacks_convenience() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/mods/search")
                .query_param("classId", "4471")
                .query_param("searchFilter", "atm");
            then.status(200).json_body(page_json(0, 25, 0, vec![]));
        })
        .await;

    client_for(&server).search_modpacks("atm").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_status_mapping() {
    for (status, check) in [
        (401u16, "unauthorized"),
        (429, "rate"),
        (500, "server"),
    ] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.any_request();
                then.status(status).body("{\"error\":\"x\"}");
            })
            .await;

        let err = client_for(&server)
            .search(&SearchRequest::mods())
            .await
            .unwrap_err();
        match (check, err) {
            ("unauthorized", CurseForgeError::Unauthorized) => {}
            ("rate", CurseForgeError::RateLimited) => {}
            ("server", CurseForgeError::ServerError { status: 500 }) => {}
            (check, err) => panic!("{}: unexpected {:?}", check, err),
        }
    }
}

#[tokio::test]
async fn test_malformed_body_is_decoding_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/v1/mods/search");
            then.status(200).body("{\"data\": 5}");
        })
        .await;

    let err = client_for(&server)
        .search(&SearchRequest::mods())
        .await
        .unwrap_err();
    assert!(matches!(err, CurseForgeError::Decoding(_)));
}

#[tokio::test]
async fn test_fetch_mod() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/mods/238222").header("x-api-key", KEY);
            then.status(200)
                .json_body(json!({ "data": mod_json(238222, "JEI", 6) }));
        })
        .await;

    let m = client_for(&server).fetch_mod(238222).await.unwrap();
    assert_eq!(m.id, 238222);
    assert_eq!(m.class(), Some(ClassId::Mods));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_missing_mod() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/v1/mods/1");
            then.status(404);
        })
        .await;

    let err = client_for(&server).fetch_mod(1).await.unwrap_err();
    assert!(matches!(err, CurseForgeError::ServerError { status: 404 }));
}

fn response_with(pagination: Pagination) -> ModsSearchResponse {
    ModsSearchResponse {
        data: vec![],
        pagination,
    }
}

#[test]
fn test_next_page_request() {
    let request = SearchRequest::modpacks().page_size(20).search_filter("tech");
    let response = response_with(Pagination {
        index: 20,
        page_size: 20,
        result_count: 20,
        total_count: 53,
    });

    let next = CurseForgeClient::next_page(&request, &response).unwrap();
    assert_eq!(next.index, 40);
    assert_eq!(next, request.page(40));

    let last = response_with(Pagination {
        index: 40,
        page_size: 20,
        result_count: 13,
        total_count: 53,
    });
    assert!(CurseForgeClient::next_page(&request, &last).is_none());
}

#[tokio::test]
async fn test_search_next_page() {
    let server = MockServer::start_async().await;
    let second = server
        .mock_async(|when, then| {
            when.path("/v1/mods/search").query_param("index", "2");
            then.status(200)
                .json_body(page_json(2, 2, 3, vec![mod_json(3, "Third", 6)]));
        })
        .await;

    let client = client_for(&server);
    let request = SearchRequest::mods().page_size(2);
    let first = response_with(Pagination {
        index: 0,
        page_size: 2,
        result_count: 2,
        total_count: 3,
    });

    let page = client.search_next_page(&request, &first).await.unwrap().unwrap();
    assert_eq!(page.data[0].name, "Third");
    assert!(client.search_next_page(&request, &page).await.unwrap().is_none());
    second.assert_hits_async(1).await;
}
