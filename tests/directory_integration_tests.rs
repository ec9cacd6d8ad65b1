use std::sync::Arc;

use gourmet::api::{HotPepperClient, NetworkError, RestaurantDirectory, SearchQuery};
use gourmet::core::action::{Action, Effect, FAILED_STATUS, update};
use gourmet::core::favorites::FavoritesStore;
use gourmet::core::search::{PAGE_SIZE, PageRequest};
use gourmet::core::state::App;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

const API_PATH: &str = "/hotpepper/gourmet/v1/";

fn client_for(server: &MockServer) -> HotPepperClient {
    HotPepperClient::new(
        "test-key".to_string(),
        Some(format!("{}{}", server.uri(), API_PATH)),
    )
}

fn shop(i: usize) -> Value {
    json!({
        "id": format!("J{i:03}"),
        "name": format!("Ramen {i}"),
        "logo_image": format!("https://imgfp.hotp.jp/{i}.jpg"),
        "coupon_urls": {
            "pc": format!("https://www.hotpepper.jp/strJ{i:03}/map/"),
            "sp": format!("https://www.hotpepper.jp/strJ{i:03}/scoupon/")
        },
        "address": "Tokyo"
    })
}

fn page_body(first: usize, count: usize) -> Value {
    let shops: Vec<Value> = (first..first + count).map(shop).collect();
    json!({
        "results": {
            "api_version": "1.26",
            "results_available": 23,
            "results_returned": count.to_string(),
            "results_start": first + 1,
            "shop": shops
        }
    })
}

fn query(keyword: &str, start: u32) -> SearchQuery<'_> {
    SearchQuery {
        keyword,
        start,
        count: PAGE_SIZE,
    }
}

async fn mount_page(server: &MockServer, start: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("key", "test-key"))
        .and(query_param("keyword", "ramen"))
        .and(query_param("start", start.to_string()))
        .and(query_param("count", PAGE_SIZE.to_string()))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// HotPepperClient Tests
// ============================================================================

#[tokio::test]
async fn test_search_returns_shops() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(0, 3)).await;

    let shops = client_for(&server)
        .search(query("ramen", 1))
        .await
        .expect("search should succeed");

    assert_eq!(shops.len(), 3);
    assert_eq!(shops[0].id, "J000");
    assert_eq!(shops[0].name, "Ramen 0");
    assert_eq!(shops[0].logo_image_url, "https://imgfp.hotp.jp/0.jpg");
    assert_eq!(
        shops[0].coupon_url(),
        "https://www.hotpepper.jp/strJ000/scoupon/"
    );
}

#[tokio::test]
async fn test_search_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, 21, page_body(0, 0)).await;

    let shops = client_for(&server).search(query("ramen", 21)).await.unwrap();
    assert!(shops.is_empty());
}

#[tokio::test]
async fn test_search_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(query("ramen", 1))
        .await
        .unwrap_err();
    match err {
        NetworkError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("Internal Server Error"));
        }
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_api_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {
                "api_version": "1.26",
                "error": [{ "code": 2000, "message": "invalid API key" }]
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(query("ramen", 1))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        NetworkError::Api {
            code: "2000".to_string(),
            message: "invalid API key".to_string(),
        }
    );
}

#[tokio::test]
async fn test_search_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(query("ramen", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, NetworkError::Decode(_)));
}

#[tokio::test]
async fn test_search_unreachable_server() {
    // Nothing listens on port 9 (discard) on test machines
    let client = HotPepperClient::new(
        "test-key".to_string(),
        Some("http://127.0.0.1:9/".to_string()),
    );
    let err = client.search(query("ramen", 1)).await.unwrap_err();
    assert!(matches!(err, NetworkError::Transport(_)));
}

// ============================================================================
// End-to-end pagination through the reducer
// ============================================================================

fn fetched(effect: Effect) -> PageRequest {
    match effect {
        Effect::Fetch(request) => request,
        other => panic!("Expected Effect::Fetch, got {:?}", other),
    }
}

async fn run_fetch(app: &mut App, request: PageRequest) {
    let outcome = app
        .directory
        .search(SearchQuery {
            keyword: &request.keyword,
            start: request.start,
            count: request.count,
        })
        .await;
    update(
        app,
        Action::PageLoaded {
            generation: request.generation,
            outcome,
        },
    );
}

#[tokio::test]
async fn test_paginates_until_exhausted() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(0, 20)).await;
    mount_page(&server, 21, page_body(20, 3)).await;
    mount_page(&server, 24, page_body(0, 0)).await;

    let directory: Arc<dyn RestaurantDirectory> = Arc::new(client_for(&server));
    let mut app = App::new(directory, FavoritesStore::in_memory(), "ランチ");

    let request = fetched(update(&mut app, Action::Search("ramen".to_string())));
    run_fetch(&mut app, request).await;
    assert_eq!(app.session.results().len(), 20);
    assert!(!app.session.is_exhausted());

    let request = fetched(update(&mut app, Action::LoadMore));
    assert_eq!(request.start, 21);
    run_fetch(&mut app, request).await;
    // A short page is merged but does not end the session
    assert_eq!(app.session.results().len(), 23);
    assert!(!app.session.is_exhausted());

    let request = fetched(update(&mut app, Action::LoadMore));
    assert_eq!(request.start, 24);
    run_fetch(&mut app, request).await;
    assert_eq!(app.session.results().len(), 23);
    assert!(app.session.is_exhausted());
    assert_eq!(app.session.results()[22].id, "J022");

    assert_eq!(update(&mut app, Action::LoadMore), Effect::None);
}

#[tokio::test]
async fn test_server_failure_clears_results() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(0, 20)).await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("start", "21"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let directory: Arc<dyn RestaurantDirectory> = Arc::new(client_for(&server));
    let mut app = App::new(directory, FavoritesStore::in_memory(), "ランチ");

    let request = fetched(update(&mut app, Action::Search("ramen".to_string())));
    run_fetch(&mut app, request).await;
    let request = fetched(update(&mut app, Action::LoadMore));
    run_fetch(&mut app, request).await;

    assert!(app.session.results().is_empty());
    assert!(app.session.is_exhausted());
    assert_eq!(app.status_message, FAILED_STATUS);
}
