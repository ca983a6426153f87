//! Integration tests for the SSO HTTP endpoints.
//!
//! Requests are driven through the full router with `oneshot`:
//! 1. The redirect leg answers with a provider redirect
//! 2. The callback accepts form posts and query strings
//! 3. Failures are reported inline as plain text

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use commentary::adapters::http::{router, SsoHandlers, CLOSE_POPUP};
use commentary::adapters::memory::InMemoryStore;
use commentary::adapters::security::RandomTokenGenerator;
use commentary::application::handlers::commenter::{
    CompleteSsoHandler, NewCommenterSessionHandler, StartSsoHandler,
};
use commentary::domain::auth::SsoSigner;
use commentary::domain::foundation::{CommenterToken, DomainName, OwnerId};
use commentary::domain::site::Domain;
use commentary::ports::DomainRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

const DOMAIN: &str = "news.example.com";
const SECRET: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f90";
const PROVIDER_URL: &str = "https://login.example.com/sso?client=news";

struct Server {
    app: Router,
    sessions: NewCommenterSessionHandler,
}

impl Server {
    async fn start() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let tokens = Arc::new(RandomTokenGenerator::default());
        let domain = Domain::new(
            DomainName::new(DOMAIN).unwrap(),
            OwnerId::new("owner-1").unwrap(),
        )
        .with_sso(SECRET, PROVIDER_URL);
        DomainRepository::save(store.as_ref(), &domain).await.unwrap();

        let start = StartSsoHandler::new(
            store.clone(),
            store.clone(),
            store.clone(),
            tokens.clone(),
            600,
        );
        let complete =
            CompleteSsoHandler::new(store.clone(), store.clone(), store.clone(), tokens.clone());

        Self {
            app: router(SsoHandlers::new(Arc::new(start), Arc::new(complete))),
            sessions: NewCommenterSessionHandler::new(store, tokens),
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<String>, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, location, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn get(&self, uri: &str) -> (StatusCode, Option<String>, String) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    /// Runs the redirect leg and returns the SSO token from the location.
    async fn redirect(&self, session: &CommenterToken) -> String {
        let (status, location, _) = self
            .get(&format!(
                "/api/oauth/sso/redirect?domain={}&commenterToken={}",
                DOMAIN, session
            ))
            .await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        let location = location.unwrap();
        let query = location.split_once("&token=").unwrap().1;
        query.split_once("&hmac=").unwrap().0.to_string()
    }
}

fn signed_callback(token: &str) -> (String, String) {
    let payload = serde_json::json!({
        "token": token,
        "email": "frank@example.com",
        "name": "Frank",
    })
    .to_string();
    let signer = SsoSigner::new(hex::decode(SECRET).unwrap());
    let hmac = signer.sign(payload.as_bytes()).unwrap();
    (hex::encode(payload.as_bytes()), hex::encode(hmac))
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_check_answers_ok() {
    let server = Server::start().await;

    let (status, _, body) = server.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn redirect_appends_token_and_hmac_to_the_provider_url() {
    let server = Server::start().await;
    let session = server.sessions.handle().await.unwrap();

    let (_, location, _) = server
        .get(&format!(
            "/api/oauth/sso/redirect?domain={}&commenterToken={}",
            DOMAIN, session
        ))
        .await;

    let location = location.unwrap();
    assert!(location.starts_with("https://login.example.com/sso?client=news&token="));
    assert!(location.contains("&hmac="));
}

#[tokio::test]
async fn form_callback_closes_the_popup() {
    let server = Server::start().await;
    let session = server.sessions.handle().await.unwrap();
    let token = server.redirect(&session).await;
    let (payload, hmac) = signed_callback(&token);

    let (status, _, body) = server
        .send(
            Request::post("/api/oauth/sso/callback")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!("payload={}&hmac={}", payload, hmac)))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, CLOSE_POPUP);
}

#[tokio::test]
async fn query_callback_is_accepted_too() {
    let server = Server::start().await;
    let session = server.sessions.handle().await.unwrap();
    let token = server.redirect(&session).await;
    let (payload, hmac) = signed_callback(&token);

    let (_, _, body) = server
        .get(&format!(
            "/api/oauth/sso/callback?payload={}&hmac={}",
            payload, hmac
        ))
        .await;

    assert_eq!(body, CLOSE_POPUP);
}

#[tokio::test]
async fn bad_hex_is_reported_inline() {
    let server = Server::start().await;

    let (status, _, body) = server
        .get("/api/oauth/sso/callback?payload=zz&hmac=00")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Error: "));
    assert!(body.ends_with('\n'));
}

#[tokio::test]
async fn missing_fields_are_named_in_the_error() {
    let server = Server::start().await;

    let (_, _, body) = server.get("/api/oauth/sso/callback").await;

    assert_eq!(body, "Error: missing field: payload\n");
}

#[tokio::test]
async fn redirect_for_unknown_domain_is_reported_inline() {
    let server = Server::start().await;
    let session = server.sessions.handle().await.unwrap();

    let (status, location, body) = server
        .get(&format!(
            "/api/oauth/sso/redirect?domain=unknown.example.com&commenterToken={}",
            session
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert_eq!(body, "Error: no such domain\n");
}
