/// Authentication endpoints
///
/// This module provides the account endpoints:
/// - Registration (form + submit)
/// - Login (form + submit)
/// - Logout
///
/// # Endpoints
///
/// - `GET  /register` - Registration form
/// - `POST /register` - Create account, redirect to login
/// - `GET  /login`    - Login form
/// - `POST /login`    - Establish session, redirect to task list
/// - `GET  /logout`   - End session, redirect home (session-gated)
///
/// Every failure here is recovered locally as a notice plus a redirect or
/// re-rendered form; none of it surfaces as an error status.

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    flash::{self, Notice},
    render::View,
};
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tarefas_shared::auth::{password, session};
use tarefas_shared::auth::session::CurrentUser;
use tarefas_shared::models::user::{CreateUser, User};
use validator::Validate;

/// Registration form payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,

    /// Email address (the unique login key)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (hashed before it touches the database)
    pub password: String,
}

/// Login form payload
///
/// Not validated beyond deserialization: a malformed email can never match
/// an account, so it falls into the same combined invalid-credentials path.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Registration form handler
///
/// # Endpoint
///
/// ```text
/// GET /register
/// ```
pub async fn register_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, notices) = flash::take(jar);
    let view = View::new("register").with_notices(notices);
    Ok((jar, state.render(&view)?))
}

/// Registration submit handler
///
/// Creates the account and redirects to the login form. A duplicate email
/// redirects back to the registration form with a notice instead -- whether
/// it was caught by the advisory pre-check or, under a concurrent submit,
/// by the store's unique constraint.
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/x-www-form-urlencoded
///
/// name=Alice&email=a%40x.com&password=pw1
/// ```
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        let jar = flash::push(jar, Notice::danger(first_validation_message(&errors)));
        return Ok((jar, Redirect::to("/register")).into_response());
    }

    // Advisory pre-check for a friendly message; the unique constraint on
    // users.email is what actually guarantees no duplicate row
    if User::find_by_email(&state.db, &form.email).await?.is_some() {
        let jar = flash::push(jar, Notice::danger("Email already registered"));
        return Ok((jar, Redirect::to("/register")).into_response());
    }

    let password_hash = password::hash_password(&form.password)?;

    match User::create(
        &state.db,
        CreateUser {
            name: form.name,
            email: form.email,
            password_hash,
        },
    )
    .await
    {
        Ok(user) => {
            tracing::info!(user_id = user.id, "New user registered");
            let jar = flash::push(jar, Notice::success("Registration complete, please log in"));
            Ok((jar, Redirect::to("/login")).into_response())
        }
        Err(e) => match AppError::from(e) {
            // Lost the race against a concurrent submit for the same email
            AppError::Conflict(_) => {
                let jar = flash::push(jar, Notice::danger("Email already registered"));
                Ok((jar, Redirect::to("/register")).into_response())
            }
            other => Err(other),
        },
    }
}

/// Login form handler
///
/// # Endpoint
///
/// ```text
/// GET /login
/// ```
pub async fn login_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, notices) = flash::take(jar);
    let view = View::new("login").with_notices(notices);
    Ok((jar, state.render(&view)?))
}

/// Login submit handler
///
/// On success, issues a session token, sets the session cookie, and
/// redirects to the task list. On failure the login form is re-rendered
/// (no redirect) with a single combined invalid-credentials notice; the
/// response never distinguishes an unknown email from a wrong password.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/x-www-form-urlencoded
///
/// email=a%40x.com&password=pw1
/// ```
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let user = User::find_by_email(&state.db, &form.email).await?;

    let verified = match &user {
        Some(user) => password::verify_password(&form.password, &user.password_hash)?,
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        let (jar, mut notices) = flash::take(jar);
        notices.push(Notice::danger("Invalid email or password"));
        let view = View::new("login").with_notices(notices);
        return Ok((jar, state.render(&view)?).into_response());
    };

    let token = session::issue_token(user.id, state.session_secret())?;
    let jar = jar.add(session_cookie(token));

    tracing::info!(user_id = user.id, "User logged in");
    Ok((jar, Redirect::to("/tasks")).into_response())
}

/// Logout handler
///
/// Removes the session cookie, so subsequent requests from this client are
/// anonymous and the session gate sends them back to the login page.
///
/// # Endpoint
///
/// ```text
/// GET /logout
/// ```
pub async fn logout(
    Extension(current): Extension<CurrentUser>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    tracing::info!(user_id = current.0.id, "User logged out");

    let jar = jar.remove(Cookie::build(session::SESSION_COOKIE).path("/"));
    let jar = flash::push(jar, Notice::info("You have been logged out"));

    (jar, Redirect::to("/"))
}

/// Builds the session cookie around an issued token
fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(session::SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Picks the first human-readable message out of a validation failure
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(_, errors)| errors.iter())
        .filter_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Validation failed".to_string())
}
