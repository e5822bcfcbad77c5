/// One-shot notices surfaced on the next rendered page
///
/// A notice is a category-tagged message ("Task deleted", "Email already
/// registered") that survives exactly one redirect: the handler that
/// redirects pushes it into a cookie, the handler that renders next drains
/// the cookie and hands the notices to the view, and the cookie is removed
/// in the same response. Nothing is kept server-side.
///
/// The payload is JSON wrapped in URL-safe base64 so it stays within the
/// cookie value grammar.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Name of the browser cookie carrying pending notices
pub const NOTICE_COOKIE: &str = "tarefas_notices";

/// Visual category of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeCategory {
    /// Operation succeeded
    Success,

    /// Something was off but the request went through
    Warning,

    /// Operation was refused
    Danger,

    /// Neutral information
    Info,
}

impl NoticeCategory {
    /// Category as the lowercase string templates key off
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeCategory::Success => "success",
            NoticeCategory::Warning => "warning",
            NoticeCategory::Danger => "danger",
            NoticeCategory::Info => "info",
        }
    }
}

/// A single one-shot message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Visual category
    pub category: NoticeCategory,

    /// Human-readable message
    pub message: String,
}

impl Notice {
    /// Creates a success notice
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: NoticeCategory::Success,
            message: message.into(),
        }
    }

    /// Creates a danger notice
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: NoticeCategory::Danger,
            message: message.into(),
        }
    }

    /// Creates an info notice
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            category: NoticeCategory::Info,
            message: message.into(),
        }
    }
}

/// Appends a notice to the pending set in the jar
///
/// Used by handlers that redirect; the notice shows up on whatever page the
/// client lands on next.
pub fn push(jar: CookieJar, notice: Notice) -> CookieJar {
    let mut notices = peek(&jar);
    notices.push(notice);

    let payload = match serde_json::to_vec(&notices) {
        Ok(bytes) => URL_SAFE_NO_PAD.encode(bytes),
        Err(e) => {
            // A notice is cosmetic; losing one must not fail the request
            tracing::warn!("Failed to encode notices: {}", e);
            return jar;
        }
    };

    jar.add(notice_cookie(payload))
}

/// Drains all pending notices and removes the cookie
///
/// Used by handlers that render a page; returning the updated jar with the
/// response is what actually clears the cookie on the client.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Notice>) {
    let notices = peek(&jar);
    let jar = jar.remove(Cookie::build(NOTICE_COOKIE).path("/"));
    (jar, notices)
}

/// Decodes pending notices without consuming them
fn peek(jar: &CookieJar) -> Vec<Notice> {
    let Some(cookie) = jar.get(NOTICE_COOKIE) else {
        return Vec::new();
    };

    URL_SAFE_NO_PAD
        .decode(cookie.value())
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

fn notice_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(NOTICE_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}
