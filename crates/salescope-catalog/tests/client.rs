//! Integration tests for `CatalogClient` using wiremock HTTP mocks.

use salescope_catalog::{seed_from_catalog, CatalogClient, CatalogError, SeedError};
use salescope_core::{MemoryStore, RecordError, RecordStore};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DUMP_PATH: &str = "/product_transaction.json";

fn test_client() -> CatalogClient {
    CatalogClient::new(5, "salescope-test/0.1").expect("client construction should not fail")
}

fn catalog_item(id: i64, price: f64, date: &str, sold: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Item {id}"),
        "price": price,
        "description": "Catalog entry",
        "category": "electronics",
        "image": "https://example.com/item.jpg",
        "sold": sold,
        "dateOfSale": date
    })
}

async fn mount_body(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(DUMP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_records_returns_array_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DUMP_PATH))
        .and(header("user-agent", "salescope-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            catalog_item(1, 45.0, "2022-03-02T10:00:00+05:30", true),
            catalog_item(2, 300.5, "2021-11-27T20:29:54+05:30", false),
        ])))
        .mount(&server)
        .await;

    let items = test_client()
        .fetch_records(&format!("{}{DUMP_PATH}", server.uri()))
        .await
        .expect("fetch should succeed");

    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["title"], "Item 2");
}

#[tokio::test]
async fn fetch_records_rejects_non_array_payload() {
    let server = MockServer::start().await;
    mount_body(&server, json!({ "items": [] })).await;

    let err = test_client()
        .fetch_records(&format!("{}{DUMP_PATH}", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::MalformedPayload { found: "object" }
    ));
}

#[tokio::test]
async fn fetch_records_surfaces_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DUMP_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_records(&format!("{}{DUMP_PATH}", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::UnexpectedStatus { status: 503, .. }
    ));
}

#[tokio::test]
async fn fetch_records_rejects_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DUMP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_records(&format!("{}{DUMP_PATH}", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Deserialize { .. }));
}

#[tokio::test]
async fn seed_replaces_store_contents() {
    let server = MockServer::start().await;
    mount_body(
        &server,
        json!([
            catalog_item(1, 45.0, "2022-03-02T10:00:00Z", true),
            catalog_item(2, 45.0, "2022-03-10", false),
            catalog_item(3, 300.0, "2022-03-28T08:15:00", true),
        ]),
    )
    .await;

    let store = MemoryStore::new();
    let inserted = seed_from_catalog(
        &test_client(),
        &format!("{}{DUMP_PATH}", server.uri()),
        &store,
    )
    .await
    .expect("seed should succeed");

    assert_eq!(inserted, 3);
    let listed = store.list_all().await.expect("list");
    assert_eq!(listed.len(), 3);
    assert!(listed.iter().all(|r| r.date_of_sale.is_some()));
}

#[tokio::test]
async fn seed_with_invalid_item_leaves_store_untouched() {
    let server = MockServer::start().await;
    mount_body(
        &server,
        json!([
            catalog_item(1, 45.0, "2022-03-02T10:00:00Z", true),
            catalog_item(2, 10.0, "not a date", false),
        ]),
    )
    .await;

    let store = MemoryStore::new();
    let err = seed_from_catalog(
        &test_client(),
        &format!("{}{DUMP_PATH}", server.uri()),
        &store,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        SeedError::Invalid(RecordError::UnparseableDate { index: 1 })
    ));
    assert!(store.list_all().await.expect("list").is_empty());
}
