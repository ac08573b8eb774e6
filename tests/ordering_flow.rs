//! End-to-end ordering flow
//!
//! Logs in against a mock backend, restarts the client on the same token
//! database and browses the catalog with the persisted session.

use app_core::fallback::{DataSource, FallbackCatalog};
use app_core::{PriceRange, SortBy};
use food_order::{App, AppConfig, AppError, CatalogBrowser, ClientConfig, FilterOptions, KvConfig};
use serde_json::json;
use storage::{TokenData, TokenStore};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, dir: &TempDir) -> AppConfig {
    let db = dir.path().join("tokens.db");
    AppConfig::default()
        .with_api(ClientConfig::new(server.uri()))
        .with_storage(KvConfig::new(db.to_string_lossy()))
}

async fn mount_menu(server: &MockServer) {
    let items: Vec<_> = (1..=20)
        .map(|i| {
            json!({
                "id": i,
                "name": if i % 2 == 0 { format!("Pho {}", i) } else { format!("Com {}", i) },
                "price": format!("{}.000đ", 30 + i * 5),
                "merchantId": 1,
                "categoryId": if i % 2 == 0 { "noodles" } else { "rice" },
                "isAvailable": i != 4,
                "rating": 4.0
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/api/MenuItem"))
        .and(header("Authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(items)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/Merchant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Quan Ngon", "isOpen": true}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_persists_across_restart() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/Auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"accessToken": "a1", "refreshToken": "r1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/User"))
        .and(header("Authorization", "Bearer a1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 1, "username": "an"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // First run: log in
    {
        let app = App::bootstrap(config_for(&server, &dir)).unwrap();
        assert!(!app.auth.is_logged_in().await.unwrap());
        app.auth.login("an", "secret").await.unwrap();
    }

    // Second run: session is restored from disk
    let app = App::bootstrap(config_for(&server, &dir)).unwrap();
    assert!(app.auth.is_logged_in().await.unwrap());
    assert_eq!(app.tokens().access_token().await.unwrap().as_deref(), Some("a1"));

    let user = app.user.current().await.unwrap();
    assert_eq!(user.username, "an");
}

#[tokio::test]
async fn test_browse_menu_with_persisted_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_menu(&server).await;

    {
        let app = App::bootstrap(config_for(&server, &dir)).unwrap();
        app.tokens().set(TokenData::new("a1", "r1")).await.unwrap();
    }

    let app = App::bootstrap(config_for(&server, &dir)).unwrap();
    let items = app.catalog.load_menu_items(None).await.unwrap();
    assert_eq!(items.len(), 20);
    assert!(items.iter().all(|item| item.subtitle == "Quan Ngon"));

    let mut browser = CatalogBrowser::new(items);
    assert_eq!(browser.total_pages(), 2);
    assert_eq!(browser.set_page(2), 2);

    browser.set_search_query("pho");
    assert_eq!(browser.current_page(), 1);
    assert_eq!(browser.visible_page().total_items, 10);

    browser.apply_filters(FilterOptions {
        sort_by: SortBy::PriceAsc,
        price_range: PriceRange::Under50,
        open_now: true,
        ..Default::default()
    });

    // Pho 2 is the only noodle dish under 50k
    let page = browser.visible_page();
    assert_eq!(page.ids(), vec!["2"]);
    assert_eq!(browser.total_pages(), 1);
}

#[tokio::test]
async fn test_merchants_fall_back_when_backend_unreachable() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&server, &dir);
    config.api = ClientConfig::new("http://127.0.0.1:9");

    let bundled = serde_json::from_value(json!({"id": "b1", "name": "Bundled Pho"})).unwrap();
    let app = App::bootstrap(config).unwrap();
    let loader =
        app.catalog.clone().with_fallback(FallbackCatalog::new().with_default(vec![bundled]));

    let loaded = loader.load_merchants(None).await.unwrap();
    assert_eq!(loaded.source, DataSource::Fallback);
    assert_eq!(loaded.data[0].title, "Bundled Pho");
}

#[tokio::test]
async fn test_expired_session_surfaces_unauthorized() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/User"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/Auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let app = App::bootstrap(config_for(&server, &dir)).unwrap();
    app.tokens().set(TokenData::new("stale", "r0")).await.unwrap();

    let err: AppError = app.user.current().await.unwrap_err().into();
    match err {
        AppError::Api(e) => assert!(e.is_unauthorized()),
        other => panic!("expected API error, got {}", other),
    }
    assert!(!app.auth.is_logged_in().await.unwrap());
}
