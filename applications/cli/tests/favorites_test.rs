//! Like/pin commands against a mock backend

use coogs_cli::{App, CliConfig, CliError};
use coogs_core::{ListenerId, MemorySessionStore, SongId};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, App) {
    let server = MockServer::start().await;
    let mut config = CliConfig::default();
    config.api.url = server.uri();
    let app = App::new(config, Arc::new(MemorySessionStore::new())).unwrap();
    (server, app)
}

#[tokio::test]
async fn test_toggle_like_refused_when_status_fails() {
    let (server, app) = setup().await;

    Mock::given(method("GET"))
        .and(path("/songs/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(path("/likes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = app.toggle_like(ListenerId::new(7), SongId::new(3)).await;

    assert!(matches!(
        result,
        Err(CliError::StatusUnavailable(id)) if id == SongId::new(3)
    ));
}

#[tokio::test]
async fn test_toggle_pin_refused_when_status_fails() {
    let (server, app) = setup().await;

    Mock::given(method("GET"))
        .and(path("/songs/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(path("/pin"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = app.toggle_pin(ListenerId::new(7), SongId::new(3)).await;

    assert!(matches!(result, Err(CliError::StatusUnavailable(_))));
}

#[tokio::test]
async fn test_toggle_like_unlikes_liked_song() {
    let (server, app) = setup().await;

    Mock::given(method("GET"))
        .and(path("/songs/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "favorites": [3],
            "pinnedSongId": null
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/likes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/likes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let liked = app
        .toggle_like(ListenerId::new(7), SongId::new(3))
        .await
        .unwrap();

    assert!(!liked);
}
