#![allow(clippy::unwrap_used)]
// Integration tests for `RegistryClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use terra_api::{Error, RegistryClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RegistryClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/v3.1", server.uri())).unwrap();
    let client = RegistryClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn france() -> serde_json::Value {
    json!({
        "name": { "common": "France", "official": "French Republic" },
        "cca3": "FRA",
        "region": "Europe",
        "capital": ["Paris"],
        "population": 67_391_582,
        "area": 551_695.0
    })
}

fn germany() -> serde_json::Value {
    json!({
        "name": { "common": "Germany", "official": "Federal Republic of Germany" },
        "cca3": "DEU",
        "region": "Europe",
        "capital": ["Berlin"],
        "population": 83_240_525
    })
}

// ── List / search / region ──────────────────────────────────────────

#[tokio::test]
async fn test_list_all() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([france(), germany()])))
        .mount(&server)
        .await;

    let countries = client.list_all().await.unwrap();

    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].cca3.as_deref(), Some("FRA"));
    assert_eq!(
        countries[1].name.as_ref().unwrap().common.as_deref(),
        Some("Germany")
    );
    assert_eq!(countries[1].area, None);
}

#[tokio::test]
async fn test_search_by_name_encodes_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/name/united%20kingdom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": { "common": "United Kingdom" },
            "cca3": "GBR"
        }])))
        .mount(&server)
        .await;

    let countries = client.search_by_name("united kingdom").await.unwrap();

    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].cca3.as_deref(), Some("GBR"));
}

#[tokio::test]
async fn test_search_no_match_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/name/xyzzynotacountry"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"status": 404, "message": "Not Found"})),
        )
        .mount(&server)
        .await;

    let countries = client.search_by_name("xyzzynotacountry").await.unwrap();

    assert!(countries.is_empty());
}

#[tokio::test]
async fn test_filter_by_region() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/region/Europe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([france()])))
        .mount(&server)
        .await;

    let countries = client.filter_by_region("Europe").await.unwrap();

    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].region.as_deref(), Some("Europe"));
}

#[tokio::test]
async fn test_by_code() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/alpha/DEU"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([germany()])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3.1/alpha/ZZZ"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let found = client.by_code("DEU").await.unwrap().unwrap();
    assert_eq!(found.cca3.as_deref(), Some("DEU"));

    assert!(client.by_code("ZZZ").await.unwrap().is_none());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let result = client.list_all().await;

    match result.unwrap_err() {
        Error::Registry { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("upstream down"), "got: {message}");
        }
        other => panic!("expected Registry error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_all().await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind a server, grab its address, then drop it so nothing listens.
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/v3.1", server.uri())).unwrap();
    drop(server);

    let client = RegistryClient::with_client(reqwest::Client::new(), base_url);
    let result = client.list_all().await;

    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}
