#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use inceptum_content::ContentStore;
use inceptum_site::{
    auth::{SessionIdentity, SessionSettings},
    config::{default_static_dir, default_templates_dir},
    create_app, AppState,
};
use serde_json::Value;
use tempfile::TempDir;

pub const SECRET: &str = "test-secret";
pub const OWNER: &str = "owner-open-id";

pub fn sessions() -> SessionSettings {
    SessionSettings::new(Some(SECRET), 30, false)
}

/// In-memory store whose owner signs in as admin.
pub fn store() -> ContentStore {
    ContentStore::open_in_memory()
        .unwrap()
        .with_owner_open_id(Some(OWNER.to_string()))
}

pub fn seeded_store() -> ContentStore {
    let store = store();
    store.seed_defaults(false).unwrap();
    store
}

pub fn app_with(store: ContentStore, sessions: SessionSettings) -> Router {
    let state = AppState::from_parts(
        store,
        sessions,
        &default_templates_dir(),
        default_static_dir(),
    )
    .unwrap();
    create_app(state)
}

/// Seeded app over a database file whose submissions table has been dropped
/// behind the store's back, so every form save fails. Keep the directory
/// alive for the duration of the test.
pub fn app_without_submissions_table() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("site.db");
    let store = ContentStore::open(&path)
        .unwrap()
        .with_owner_open_id(Some(OWNER.to_string()));
    store.seed_defaults(false).unwrap();
    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("DROP TABLE contact_submissions")
        .unwrap();
    (app_with(store, sessions()), dir)
}

/// App over a seeded store, plus a handle on that store.
pub fn seeded_app() -> (Router, ContentStore) {
    let store = seeded_store();
    (app_with(store.clone(), sessions()), store)
}

pub fn token_for(open_id: &str) -> String {
    sessions()
        .issue(&SessionIdentity {
            open_id: open_id.to_string(),
            name: Some(format!("{open_id} name")),
            ..Default::default()
        })
        .unwrap()
}

pub fn admin_token() -> String {
    token_for(OWNER)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Form post; the session rides in the cookie the way a browser sends it.
pub fn form_request(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("app_session_id={token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn cookie_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, format!("app_session_id={token}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
