/// Session token generation and validation
///
/// A session is a signed HS256 token carrying the logged-in user's id,
/// transported in a browser cookie. The server keeps no session table: the
/// signature is what ties the cookie back to the user, and removing the
/// cookie on logout is what ends the session.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC-SHA256)
/// - **Expiration**: 7 days from issue
/// - **Validation**: signature, expiration, and issuer checks
/// - **Secret Management**: secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use tarefas_shared::auth::session::{issue_token, validate_token};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-secret-key-of-at-least-32-bytes!!";
///
/// let token = issue_token(42, secret)?;
/// let claims = validate_token(&token, secret)?;
/// assert_eq!(claims.sub, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// Name of the browser cookie carrying the session token
pub const SESSION_COOKIE: &str = "tarefas_session";

/// How long an issued session token stays valid
pub const SESSION_TTL_DAYS: i64 = 7;

/// Token issuer, pinned at validation time
const ISSUER: &str = "tarefas";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate session token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Session token has expired")]
    Expired,
}

/// Claims carried by a session token
///
/// # Standard Claims
///
/// - `sub`: Subject (user id)
/// - `iss`: Issuer (always "tarefas")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user id
    pub sub: i64,

    /// Issuer - always "tarefas"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl SessionClaims {
    /// Creates new claims for a user with the default session lifetime
    pub fn new(user_id: i64) -> Self {
        Self::with_lifetime(user_id, Duration::days(SESSION_TTL_DAYS))
    }

    /// Creates claims with a custom lifetime
    pub fn with_lifetime(user_id: i64, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + lifetime;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// The resolved user for the current request
///
/// Inserted into request extensions by the session gate after a successful
/// cookie-to-user resolution. Handlers behind the gate extract it with
/// Axum's `Extension` extractor.
///
/// # Example
///
/// ```ignore
/// async fn handler(Extension(current): Extension<CurrentUser>) -> String {
///     format!("Hello, {}!", current.0.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Issues a signed session token for a user
///
/// # Arguments
///
/// * `user_id` - The id of the user logging in
/// * `secret` - Secret key for signing (should be at least 32 bytes)
///
/// # Errors
///
/// Returns `SessionError::CreateError` if token encoding fails
pub fn issue_token(user_id: i64, secret: &str) -> Result<String, SessionError> {
    let claims = SessionClaims::new(user_id);
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, &claims, &key)
        .map_err(|e| SessionError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts its claims
///
/// Verifies:
/// - Signature is valid
/// - Token hasn't expired
/// - Issuer is "tarefas"
/// - Token is not used before its nbf time
///
/// # Errors
///
/// Returns `SessionError::Expired` for expired tokens and
/// `SessionError::ValidationError` for any other invalid token.
pub fn validate_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data =
        decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::ValidationError(format!("Token validation failed: {}", e)),
        })?;

    Ok(token_data.claims)
}
