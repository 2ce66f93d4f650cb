#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Builds the REAL kernel state and router from the sample site in
//! `faceted-test-utils`, so requests exercise the same code paths as the
//! `faceted` binary.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use faceted_kernel::registry::FilterRegistry;
use faceted_kernel::site::Site;
use faceted_kernel::state::AppState;
use faceted_kernel::theme::ThemeEngine;
use faceted_test_utils::SAMPLE_SITE_YAML;

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Application serving the sample site with built-in templates.
    pub fn new() -> Self {
        Self::with_registry(FilterRegistry::new())
    }

    /// Sample site layered over code-defined filters in `registry`.
    pub fn with_registry(registry: FilterRegistry) -> Self {
        let site = Site::from_yaml(SAMPLE_SITE_YAML, registry).expect("sample site should parse");
        let theme = ThemeEngine::new(None).expect("built-in templates should load");
        Self::from_parts(site, theme)
    }

    pub fn from_parts(site: Site, theme: ThemeEngine) -> Self {
        let state = AppState::from_parts(site, theme);
        // Must match main.rs
        let router = faceted_kernel::routes::app(state.clone());
        Self { router, state }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// GET `uri` and return the status and body text.
    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.request(request).await;
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    /// GET `uri` and parse the body as JSON.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get_text(uri).await;
        let json = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("body of {uri} is not JSON ({e}): {body}"));
        (status, json)
    }
}
