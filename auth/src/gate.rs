use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtHandler;

/// Name of the cookie that carries the session token.
pub const AUTH_COOKIE_NAME: &str = "Authorization";

/// Outcome of checking a request's credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    /// The cookie held a valid, unexpired token.
    Authenticated(Claims),
    /// No cookie, or a token that could not be trusted.
    Unauthenticated,
}

impl GateResult {
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            GateResult::Authenticated(claims) => Some(claims),
            GateResult::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, GateResult::Authenticated(_))
    }
}

/// Request-level credential policy.
///
/// Decides from the raw `Authorization` cookie value whether a request may
/// reach a protected handler. Missing and invalid credentials are ordinary
/// outcomes, never errors.
#[derive(Clone)]
pub struct CredentialGate {
    jwt_handler: Arc<JwtHandler>,
}

impl CredentialGate {
    pub fn new(jwt_handler: Arc<JwtHandler>) -> Self {
        Self { jwt_handler }
    }

    /// Validate the cookie value at `now`.
    ///
    /// Malformed, forged and expired tokens all resolve to `Unauthenticated`.
    /// The specific reason is only logged.
    pub fn authorize(&self, cookie: Option<&str>, now: DateTime<Utc>) -> GateResult {
        let Some(token) = cookie.filter(|value| !value.is_empty()) else {
            return GateResult::Unauthenticated;
        };

        match self.jwt_handler.validate(token, now) {
            Ok(claims) => GateResult::Authenticated(claims),
            Err(e) => {
                tracing::debug!(reason = %e, "Session token rejected");
                GateResult::Unauthenticated
            }
        }
    }

    /// Presence-only check used to steer visitors away from the login and
    /// registration forms.
    ///
    /// This does not validate the token. A stale cookie passes here and is
    /// then refused by `authorize`.
    pub fn already_authenticated(&self, cookie: Option<&str>) -> bool {
        cookie.is_some_and(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn gate(secret: &[u8]) -> CredentialGate {
        CredentialGate::new(Arc::new(JwtHandler::new(secret).unwrap()))
    }

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_missing_cookie() {
        let gate = gate(b"test_secret_key_at_least_32_bytes!");

        assert_eq!(gate.authorize(None, t0()), GateResult::Unauthenticated);
        assert_eq!(gate.authorize(Some(""), t0()), GateResult::Unauthenticated);
    }

    #[test]
    fn test_valid_cookie() {
        let handler = Arc::new(JwtHandler::new(b"test_secret_key_at_least_32_bytes!").unwrap());
        let gate = CredentialGate::new(Arc::clone(&handler));
        let token = handler.issue("42", "bob", t0()).unwrap();

        let result = gate.authorize(Some(&token), t0() + Duration::minutes(10));

        assert!(result.is_authenticated());
        let claims = result.claims().unwrap();
        assert_eq!(claims.user_id, "42");
        assert_eq!(claims.username, "bob");
    }

    #[test]
    fn test_expired_and_forged_look_the_same() {
        let handler = Arc::new(JwtHandler::new(b"test_secret_key_at_least_32_bytes!").unwrap());
        let gate = CredentialGate::new(Arc::clone(&handler));
        let forger = JwtHandler::new(b"some_other_secret_32_bytes_long!!").unwrap();

        let expired = handler.issue("42", "bob", t0()).unwrap();
        let forged = forger.issue("42", "bob", t0()).unwrap();
        let later = t0() + Duration::hours(2);

        assert_eq!(gate.authorize(Some(&expired), later), GateResult::Unauthenticated);
        assert_eq!(gate.authorize(Some(&forged), t0()), GateResult::Unauthenticated);
        assert_eq!(
            gate.authorize(Some("not-a-token"), t0()),
            GateResult::Unauthenticated
        );
    }

    #[test]
    fn test_already_authenticated_is_presence_only() {
        let gate = gate(b"test_secret_key_at_least_32_bytes!");

        assert!(!gate.already_authenticated(None));
        assert!(!gate.already_authenticated(Some("")));
        assert!(gate.already_authenticated(Some("valid_jwt_token")));
    }
}
