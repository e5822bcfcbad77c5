/// Authentication utilities
///
/// This module provides the two authentication primitives the application
/// needs:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: signed session tokens binding a browser to a user id
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: HS256-signed, issuer-pinned, with expiry
/// - **Constant-time Comparison**: verification uses constant-time operations
///
/// # Example
///
/// ```no_run
/// use tarefas_shared::auth::password::{hash_password, verify_password};
/// use tarefas_shared::auth::session::{issue_token, validate_token};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Session token for user id 1
/// let token = issue_token(1, "secret-key-that-is-long-enough....")?;
/// let claims = validate_token(&token, "secret-key-that-is-long-enough....")?;
/// assert_eq!(claims.sub, 1);
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod session;
