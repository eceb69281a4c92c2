//! Integration test support for Project Germany.
//!
//! Builds the full application router over an in-memory store and drives it
//! in-process with `tower::ServiceExt::oneshot`, so no database or running
//! server is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p project-germany-integration-tests
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use project_germany_server::config::{LogFormat, ServerConfig, Storage};
use project_germany_server::db::MemoryStore;
use project_germany_server::{AppState, app};

/// Credentials of the admin created by [`TestApp::admin_token`].
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const ADMIN_EMAIL: &str = "admin@projectgermany.test";

/// Configuration used by every test app.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig {
        storage: Storage::Memory,
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        jwt_secret: SecretString::from("Vq7#Lm2!Xz9@Rt4$Kp8%Wn3^Hd6&Bs1*"),
        token_ttl_hours: 24,
        allow_registration: true,
        cors_allowed_origins: vec!["http://localhost:5173".to_owned()],
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../server/static"),
        log_format: LogFormat::Text,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    /// The body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text)
            .unwrap_or_else(|e| panic!("response is not JSON ({e}): {}", self.text))
    }

    /// The `message` field of a JSON error body.
    #[must_use]
    pub fn message(&self) -> String {
        self.json()["message"].as_str().unwrap_or_default().to_owned()
    }
}

/// The application under test.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    #[must_use]
    pub fn with_config(config: ServerConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_stores(config, store.clone(), store.clone());
        Self {
            router: app(state.clone()),
            state,
            store,
        }
    }

    /// Send a request with an optional bearer token and raw body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        content_type: Option<&str>,
        body: Body,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None, Body::empty()).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, token, None, Body::empty())
            .await
    }

    /// Send `body` as JSON.
    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> TestResponse {
        self.send(
            method,
            uri,
            token,
            Some("application/json"),
            Body::from(body.to_string()),
        )
        .await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.json(Method::POST, uri, token, body).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.json(Method::PUT, uri, token, body).await
    }

    /// Submit a public enquiry and return the stored record.
    ///
    /// # Panics
    ///
    /// Panics if the submission is rejected.
    pub async fn submit_enquiry(&self, body: &Value) -> Value {
        let response = self.post("/api/enquiries", None, body).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.json()
    }

    /// Register the default admin and log in, returning a bearer token.
    ///
    /// # Panics
    ///
    /// Panics if registration or login fails.
    pub async fn admin_token(&self) -> String {
        let register = self
            .post(
                "/api/auth/register",
                None,
                &json!({
                    "username": ADMIN_USERNAME,
                    "password": ADMIN_PASSWORD,
                    "email": ADMIN_EMAIL,
                }),
            )
            .await;
        assert_eq!(register.status, StatusCode::CREATED, "{}", register.text);

        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Log in and return the token.
    ///
    /// # Panics
    ///
    /// Panics if login fails.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let login = self
            .post(
                "/api/auth/login",
                None,
                &json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.text);
        login.json()["token"]
            .as_str()
            .expect("login response has a token")
            .to_owned()
    }
}

/// A complete, valid submission body.
#[must_use]
pub fn sample_submission(name: &str) -> Value {
    json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "phone": "+49 151 0000000",
        "interest": "Visa Support",
        "message": "When should I apply for my visa?",
    })
}
