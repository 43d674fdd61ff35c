//! Credential issuance and validation.
//!
//! - Password hashing (Argon2id)
//! - Signed session tokens (HS256 JWT) with a fixed one-hour lifetime
//! - A credential gate that turns a cookie value into an allow/deny decision
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password"));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Utc;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let now = Utc::now();
//! let token = handler.issue(42, "alice", now).unwrap();
//! let claims = handler.validate(&token, now).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```
//!
//! ## Gating a request
//! ```
//! use auth::{Authenticator, GateResult};
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let now = Utc::now();
//!
//! let hash = auth.hash_password("password123").unwrap();
//! let token = auth.authenticate("password123", &hash, 1, "alice", now).unwrap();
//!
//! match auth.gate().authorize(Some(&token), now) {
//!     GateResult::Authenticated(claims) => assert_eq!(claims.user_id, "1"),
//!     GateResult::Unauthenticated => unreachable!(),
//! }
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use gate::CredentialGate;
pub use gate::GateResult;
pub use gate::AUTH_COOKIE_NAME;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TOKEN_TTL_SECONDS;
pub use password::PasswordError;
pub use password::PasswordHasher;
