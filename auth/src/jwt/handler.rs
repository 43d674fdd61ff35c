use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for issuing and validating session tokens.
///
/// Tokens are compact JWS strings signed with HS256 (HMAC with SHA-256).
/// Expiry is checked against a caller-supplied instant rather than the system
/// clock, so validation is a pure function of `(token, now, secret)`.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * `MissingSecret` - The secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Issue a token for a user, valid for one hour from `now`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username to embed
    /// * `now` - Issuance instant
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        user_id: impl ToString,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.encode(&Claims::for_user(user_id, username, now))
    }

    /// Sign claims into a token.
    ///
    /// Encoding is deterministic: the same claims under the same secret always
    /// produce the same string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token at the instant `now`.
    ///
    /// The signature is checked before expiry, so a forged token reports
    /// `SignatureInvalid` even when its claimed expiry has passed.
    ///
    /// # Arguments
    /// * `token` - JWT token string to validate
    /// * `now` - Instant the token is presented
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Malformed` - Not a well-formed token, or required claims are missing
    /// * `SignatureInvalid` - Signature does not match the configured secret
    /// * `Expired` - `now` is at or past the token's expiry
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is judged below against `now`, not the system clock
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    JwtError::SignatureInvalid
                }
                _ => JwtError::Malformed(e.to_string()),
            })?
            .claims;

        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde::Serialize;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_secret() {
        assert!(matches!(JwtHandler::new(b""), Err(JwtError::MissingSecret)));
    }

    #[test]
    fn test_issue_and_validate() {
        let handler = JwtHandler::new(SECRET).unwrap();

        let token = handler.issue("user123", "alice", t0()).expect("Failed to issue token");
        assert!(!token.is_empty());

        for delta in [0, 1, 600, 3599] {
            let claims = handler
                .validate(&token, t0() + Duration::seconds(delta))
                .expect("Token should still be valid");
            assert_eq!(claims.user_id, "user123");
            assert_eq!(claims.username, "alice");
        }

        // Just under an hour, with sub-second precision
        let almost = t0() + Duration::milliseconds(3_599_999);
        assert!(handler.validate(&token, almost).is_ok());
    }

    #[test]
    fn test_issue_mid_second_lives_a_full_hour() {
        let handler = JwtHandler::new(SECRET).unwrap();
        let issued = t0() + Duration::milliseconds(900);
        let token = handler.issue("u", "alice", issued).unwrap();

        for delta_ms in [0, 500, 3_599_500, 3_599_999] {
            let claims = handler
                .validate(&token, issued + Duration::milliseconds(delta_ms))
                .expect("Token should still be valid");
            assert_eq!(claims.username, "alice");
        }

        assert_eq!(
            handler.validate(&token, issued + Duration::hours(1) + Duration::seconds(1)),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_validate_expired() {
        let handler = JwtHandler::new(SECRET).unwrap();
        let token = handler.issue("user123", "alice", t0()).unwrap();

        assert_eq!(
            handler.validate(&token, t0() + Duration::hours(1)),
            Err(JwtError::Expired)
        );
        assert_eq!(
            handler.validate(&token, t0() + Duration::hours(1) + Duration::seconds(1)),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let handler = JwtHandler::new(SECRET).unwrap();

        let first = handler.issue(7, "bob", t0()).unwrap();
        let second = handler.issue(7, "bob", t0()).unwrap();
        assert_eq!(first, second);

        let other = JwtHandler::new(SECRET).unwrap().issue(7, "bob", t0()).unwrap();
        assert_eq!(first, other);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!").unwrap();

        let token = handler1.issue("user123", "alice", t0()).unwrap();

        assert_eq!(
            handler2.validate(&token, t0()),
            Err(JwtError::SignatureInvalid)
        );
    }

    #[test]
    fn test_forged_and_expired_reports_signature() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!").unwrap();

        let token = handler1.issue("user123", "alice", t0()).unwrap();

        assert_eq!(
            handler2.validate(&token, t0() + Duration::days(1)),
            Err(JwtError::SignatureInvalid)
        );
    }

    #[test]
    fn test_any_flipped_byte_is_rejected() {
        let handler = JwtHandler::new(SECRET).unwrap();
        let token = handler.issue("user123", "alice", t0()).unwrap();

        for index in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[index] ^= 0x01;
            let tampered = String::from_utf8(bytes).unwrap();

            let result = handler.validate(&tampered, t0());
            assert!(
                matches!(
                    result,
                    Err(JwtError::Malformed(_)) | Err(JwtError::SignatureInvalid)
                ),
                "byte {} flipped gave {:?}",
                index,
                result
            );
        }
    }

    #[test]
    fn test_validate_garbage() {
        let handler = JwtHandler::new(SECRET).unwrap();

        assert!(matches!(
            handler.validate("invalid.token.here", t0()),
            Err(JwtError::Malformed(_))
        ));
        assert!(matches!(
            handler.validate("", t0()),
            Err(JwtError::Malformed(_))
        ));
        assert!(matches!(
            handler.validate("no-dots-at-all", t0()),
            Err(JwtError::Malformed(_))
        ));
    }

    #[test]
    fn test_validate_without_exp_is_malformed() {
        #[derive(Serialize)]
        struct NoExpiry {
            user_id: String,
            username: String,
        }

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &NoExpiry {
                user_id: "1".to_string(),
                username: "alice".to_string(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let handler = JwtHandler::new(SECRET).unwrap();
        assert!(matches!(
            handler.validate(&token, t0()),
            Err(JwtError::Malformed(_))
        ));
    }

    #[test]
    fn test_validate_rejects_other_algorithm() {
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &Claims::for_user("1", "alice", t0()),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let handler = JwtHandler::new(SECRET).unwrap();
        assert_eq!(
            handler.validate(&token, t0()),
            Err(JwtError::SignatureInvalid)
        );
    }
}
