/// Application state and router builder
///
/// This module defines the shared application state and provides a function
/// to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tarefas_web::{app::AppState, config::Config};
/// use tarefas_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     max_connections: config.database.max_connections,
///     ..Default::default()
/// })
/// .await?;
/// let state = AppState::new(pool, config);
/// let app = tarefas_web::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    error::AppError,
    render::{BasicRenderer, View, ViewRenderer},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use tarefas_shared::auth::session::{self, CurrentUser};
use tarefas_shared::models::user::User;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,

    /// The view-rendering collaborator
    renderer: Arc<dyn ViewRenderer>,
}

impl AppState {
    /// Creates new application state with the built-in renderer
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self::with_renderer(db, config, Arc::new(BasicRenderer))
    }

    /// Creates application state with a custom view renderer
    pub fn with_renderer(
        db: SqlitePool,
        config: Config,
        renderer: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            renderer,
        }
    }

    /// Gets the session-signing secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }

    /// Renders a view through the configured renderer
    pub fn render(&self, view: &View) -> Result<Html<String>, AppError> {
        Ok(Html(self.renderer.render(view)?))
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                    # Landing page (public)
/// ├── GET  /health              # Liveness + database probe (public)
/// ├── GET+POST /register        # Registration form / submit (public)
/// ├── GET+POST /login           # Login form / submit (public)
/// └── session-gated:
///     ├── GET  /logout
///     ├── GET  /tasks           # Current user's task list
///     ├── GET+POST /add_tasks   # Add-task form / submit
///     ├── GET  /update_task/:id # Toggle Pendente ⇄ Concluída
///     └── GET  /delete_task/:id
/// ```
///
/// The gate resolves the session cookie to a user before any gated handler
/// runs; requests without a valid session are redirected to `/login` and
/// never reach a handler, so no store mutation can happen unauthenticated.
pub fn build_router(state: AppState) -> Router {
    // Import route handlers
    use crate::routes;

    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/", get(routes::pages::index))
        .route("/health", get(routes::health::health_check))
        .route(
            "/register",
            get(routes::auth::register_form).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::login_form).post(routes::auth::login),
        );

    // Routes behind the session gate
    let protected_routes = Router::new()
        .route("/logout", get(routes::auth::logout))
        .route("/tasks", get(routes::tasks::list_tasks))
        .route(
            "/add_tasks",
            get(routes::tasks::add_task_form).post(routes::tasks::add_task),
        )
        .route("/update_task/:id", get(routes::tasks::update_task))
        .route("/delete_task/:id", get(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_gate,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Session gate middleware
///
/// Reads the session cookie, validates the token, loads the user it names,
/// and injects [`CurrentUser`] into request extensions. Any failure short
/// of a database error redirects to the login page instead of invoking the
/// handler.
async fn session_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(req.headers());

    let Some(cookie) = jar.get(session::SESSION_COOKIE) else {
        return Redirect::to("/login").into_response();
    };

    let claims = match session::validate_token(cookie.value(), state.session_secret()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Rejected session token: {}", e);
            return Redirect::to("/login").into_response();
        }
    };

    let user = match User::find_by_id(&state.db, claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // Token outlived its account; treat like no session at all
            tracing::debug!(user_id = claims.sub, "Session for unknown user");
            return Redirect::to("/login").into_response();
        }
        Err(e) => return AppError::from(e).into_response(),
    };

    req.extensions_mut().insert(CurrentUser(user));

    next.run(req).await
}
