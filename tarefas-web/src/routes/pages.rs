/// Public pages
///
/// Just the landing page: anonymous, no store access, only drains pending
/// notices (e.g. "You have been logged out") into the view.

use crate::{
    app::AppState,
    error::AppResult,
    flash,
    render::View,
};
use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

/// Landing page handler
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, notices) = flash::take(jar);

    let view = View::new("index")
        .with_context(json!({ "app": "tarefas" }))
        .with_notices(notices);

    Ok((jar, state.render(&view)?))
}
