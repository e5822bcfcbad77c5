/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - In-memory test database setup (no external services)
/// - Router construction with a test configuration
/// - A cookie-carrying request helper that plays the role of a browser
///
/// The pool is capped at one connection because each in-memory SQLite
/// connection is its own database.

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use tarefas_shared::db::migrations::run_migrations;
use tarefas_shared::db::pool::{create_pool, DatabaseConfig};
use tarefas_web::app::{build_router, AppState};
use tarefas_web::config::{Config, DatabaseConfig as WebDatabaseConfig, ServerConfig, SessionConfig};
use sqlx::sqlite::SqlitePool;
use tower::Service as _;

/// Secret used to sign session tokens in tests
pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: WebDatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            session: SessionConfig {
                secret: TEST_SECRET.to_string(),
            },
        };

        let db = create_pool(DatabaseConfig {
            url: config.database.url.clone(),
            max_connections: config.database.max_connections,
            connect_timeout_seconds: 5,
        })
        .await?;

        run_migrations(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext { db, app, config })
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app
            .clone()
            .call(request)
            .await
            .expect("Router is infallible")
    }

    /// Sends a GET request, optionally carrying cookies
    pub async fn get(&self, uri: &str, cookies: &[String]) -> Response {
        self.send(build_request(Method::GET, uri, None, cookies)).await
    }

    /// Sends an urlencoded form POST, optionally carrying cookies
    pub async fn post_form(&self, uri: &str, body: &str, cookies: &[String]) -> Response {
        self.send(build_request(Method::POST, uri, Some(body), cookies))
            .await
    }
}

/// Builds a request with optional form body and cookies
pub fn build_request(
    method: Method,
    uri: &str,
    form_body: Option<&str>,
    cookies: &[String],
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies.join("; "));
    }

    match form_body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    }
}

/// Extracts all non-removal cookies set by a response, as "name=value" pairs
pub fn cookies_from(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .filter(|pair| !pair.ends_with('='))
        .map(String::from)
        .collect()
}

/// Extracts the session cookie from a response, if one was set
pub fn session_cookie_from(response: &Response) -> Option<String> {
    cookies_from(response)
        .into_iter()
        .find(|pair| pair.starts_with("tarefas_session="))
}

/// Returns the Location header of a redirect response
pub fn location_of(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Expected a Location header")
        .to_str()
        .expect("Location should be valid UTF-8")
}

/// Reads a response body into a string
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Registers a user and logs in, returning the session cookie pair
pub async fn register_and_login(
    ctx: &TestContext,
    name: &str,
    email: &str,
    password: &str,
) -> String {
    let body = format!("name={}&email={}&password={}", name, email, password);
    let response = ctx.post_form("/register", &body, &[]).await;
    assert_eq!(location_of(&response), "/login", "Registration should succeed");

    let body = format!("email={}&password={}", email, password);
    let response = ctx.post_form("/login", &body, &[]).await;
    assert_eq!(location_of(&response), "/tasks", "Login should succeed");

    session_cookie_from(&response).expect("Login should set a session cookie")
}

/// Looks up the id of the single task with the given title
pub async fn task_id_by_title(ctx: &TestContext, title: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM tasks WHERE title = ?")
        .bind(title)
        .fetch_one(&ctx.db)
        .await
        .expect("Task should exist");
    id
}

/// Counts rows in a table
pub async fn count_rows(ctx: &TestContext, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(&ctx.db)
        .await
        .expect("Count should succeed");
    count
}
