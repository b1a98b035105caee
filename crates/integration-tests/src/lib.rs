//! Integration tests for TaharLuxe.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p taharluxe-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart store properties through the public core API
//! - `storefront_cart` - Cart HTTP flow across a session
//! - `storefront_catalog` - Product listing, search, and sorting
//! - `storefront_orders` - Dashboard order endpoints
//!
//! [`TestClient`] drives the router in-process with `tower::ServiceExt`,
//! carrying the session cookie between requests like a browser would.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use taharluxe_storefront::config::StorefrontConfig;
use taharluxe_storefront::state::AppState;
use tower::ServiceExt;

/// Response captured by [`TestClient`].
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    /// Body as UTF-8 text (lossy).
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Value of a response header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// In-process client that keeps one session cookie.
///
/// A clone keeps the cookie, so it acts as the same visitor.
#[derive(Clone)]
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Client over the bundled catalog and orders.
    ///
    /// # Panics
    ///
    /// Panics if the bundled seed data fails to load.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let state =
            AppState::new(StorefrontConfig::default()).expect("bundled seed data should load");
        Self::with_state(state)
    }

    /// Client over a prepared state.
    #[must_use]
    pub fn with_state(state: AppState) -> Self {
        Self {
            app: taharluxe_storefront::app(state),
            cookie: None,
        }
    }

    /// A second client sharing the same application (and session store)
    /// but with no cookie, i.e. a different visitor.
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    /// Session cookie currently held, as `name=value`.
    #[must_use]
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send("GET", uri, None, &[]).await
    }

    /// Send a GET request with extra headers.
    pub async fn get_with_headers(&mut self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.send("GET", uri, None, headers).await
    }

    /// Send a POST request with a form-encoded body.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        self.send("POST", uri, Some(form), &[]).await
    }

    #[allow(clippy::expect_used)]
    async fn send(
        &mut self,
        method: &str,
        uri: &str,
        form: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_owned())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request should build");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(pair) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(pair.to_owned());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
