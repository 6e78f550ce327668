use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    pkg::internal::adaptors::users::spec::Role,
    prelude::{AuthError, Result},
};

const TOKEN_TTL_MINUTES: i64 = 60;

/// Payload embedded in issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    pub role: Role,
    pub exp: i64,
}

/// The decoded caller identity handed to protected handlers.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            id: claims.id,
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Stateless issuer/validator for signed bearer tokens.
///
/// The signing secret is injected at construction so tests can run with
/// per-instance keys. Changing the secret invalidates every outstanding
/// token; there is no rotation or revocation support.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        TokenService {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Signs a token for the given user, valid for one hour.
    /// Returns the token together with its expiry for the client.
    pub fn issue(
        &self,
        user_id: i32,
        username: &str,
        role: Role,
    ) -> Result<(String, DateTime<Utc>)> {
        self.issue_with_ttl(user_id, username, role, Duration::minutes(TOKEN_TTL_MINUTES))
    }

    fn issue_with_ttl(
        &self,
        user_id: i32,
        username: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<(String, DateTime<Utc>)> {
        let expiry = Utc::now() + ttl;
        let claims = Claims {
            id: user_id,
            username: username.to_string(),
            role,
            exp: expiry.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok((token, expiry))
    }

    /// Validates a raw `Authorization` header value and returns the caller
    /// identity. The header must be exactly `Bearer <token>` (scheme is
    /// case-insensitive); expiry is checked with zero leeway.
    pub fn validate(&self, raw_header: Option<&str>) -> Result<Identity, AuthError> {
        let raw = raw_header.ok_or(AuthError::MissingToken)?;
        let parts: Vec<&str> = raw.split_whitespace().collect();
        if parts.len() != 2 || !parts[0].eq_ignore_ascii_case("bearer") {
            return Err(AuthError::MalformedHeader);
        }

        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(parts[1], &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;
        Ok(data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-token-tests-minimum-32-chars";

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let svc = TokenService::new(TEST_SECRET);
        let (token, expiry) = svc.issue(7, "acme_hr", Role::Employer).unwrap();
        assert!(expiry > Utc::now());

        let identity = svc.validate(Some(&bearer(&token))).unwrap();
        assert_eq!(identity.id, 7);
        assert_eq!(identity.username, "acme_hr");
        assert_eq!(identity.role, Role::Employer);
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let svc = TokenService::new(TEST_SECRET);
        let (token, _) = svc.issue(1, "seeker", Role::JobSeeker).unwrap();
        assert!(svc.validate(Some(&format!("bearer {}", token))).is_ok());
        assert!(svc.validate(Some(&format!("BEARER {}", token))).is_ok());
    }

    #[test]
    fn test_missing_header() {
        let svc = TokenService::new(TEST_SECRET);
        assert!(matches!(
            svc.validate(None),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_malformed_header() {
        let svc = TokenService::new(TEST_SECRET);
        let (token, _) = svc.issue(1, "seeker", Role::JobSeeker).unwrap();
        for raw in [
            token.as_str(),
            "Bearer",
            &format!("Bearer {} extra", token),
            &format!("Basic {}", token),
        ] {
            assert!(
                matches!(svc.validate(Some(raw)), Err(AuthError::MalformedHeader)),
                "accepted malformed header: {raw}"
            );
        }
    }

    #[test]
    fn test_expired_token() {
        let svc = TokenService::new(TEST_SECRET);
        let (token, _) = svc
            .issue_with_ttl(1, "seeker", Role::JobSeeker, Duration::minutes(-5))
            .unwrap();
        assert!(matches!(
            svc.validate(Some(&bearer(&token))),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_token_from_other_key_is_invalid() {
        let svc = TokenService::new(TEST_SECRET);
        let other = TokenService::new("another-secret-key-for-token-tests-32-chars!");
        let (token, _) = other.issue(1, "seeker", Role::JobSeeker).unwrap();
        assert!(matches!(
            svc.validate(Some(&bearer(&token))),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let svc = TokenService::new(TEST_SECRET);
        assert!(matches!(
            svc.validate(Some("Bearer not.a.token")),
            Err(AuthError::InvalidToken)
        ));
    }
}
