//! Session tokens
//!
//! A session is an HS256 JWT carried in a cookie. The token is the whole
//! session state; nothing is kept server-side.

use chrono::{DateTime, Duration, TimeZone, Utc};
use club_core::UserId;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Session claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Random session ID
    pub sid: String,
}

impl SessionClaims {
    /// Parse the subject as a user ID
    ///
    /// # Errors
    /// Returns `InvalidSession` if the subject is not numeric
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidSession)
    }
}

/// A freshly issued session
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds, for the cookie `Max-Age`
    pub max_age: i64,
}

/// Issues and validates session tokens
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl SessionService {
    #[must_use]
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a session for `user_id`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, user_id: UserId) -> Result<SessionToken, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.ttl_seconds);
        let session_id = Uuid::new_v4().to_string();

        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            sid: session_id.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode session: {e}")))?;

        Ok(SessionToken {
            token,
            session_id,
            expires_at,
            max_age: self.ttl_seconds,
        })
    }

    /// Decode and validate a session token
    ///
    /// # Errors
    /// Returns `SessionExpired` or `InvalidSession`
    pub fn validate(&self, token: &str) -> Result<SessionClaims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::SessionExpired,
                _ => AppError::InvalidSession,
            })
    }

    /// Validate a token and return the user it belongs to
    pub fn user_id(&self, token: &str) -> Result<UserId, AppError> {
        self.validate(token)?.user_id()
    }

    /// When the given claims were issued
    #[must_use]
    pub fn issued_at(claims: &SessionClaims) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(claims.iat, 0).single()
    }
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> SessionService {
        SessionService::new("test-secret-key-that-is-long-enough", 3600)
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_test_service();
        let session = service.issue(UserId::new(42)).unwrap();

        assert!(!session.token.is_empty());
        assert_eq!(session.max_age, 3600);

        let claims = service.validate(&session.token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.sid, session.session_id);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(service.user_id(&session.token).unwrap(), UserId::new(42));
        assert!(SessionService::issued_at(&claims).is_some());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let service = create_test_service();
        let a = service.issue(UserId::new(1)).unwrap();
        let b = service.issue(UserId::new(1)).unwrap();
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();
        assert!(matches!(
            service.validate("invalid.token.here"),
            Err(AppError::InvalidSession)
        ));
    }

    #[test]
    fn test_wrong_secret() {
        let session = create_test_service().issue(UserId::new(1)).unwrap();
        let other = SessionService::new("a-completely-different-secret", 3600);
        assert!(matches!(
            other.validate(&session.token),
            Err(AppError::InvalidSession)
        ));
    }

    #[test]
    fn test_expired_token() {
        let service = SessionService::new("test-secret-key-that-is-long-enough", -120);
        let session = service.issue(UserId::new(1)).unwrap();
        assert!(matches!(
            service.validate(&session.token),
            Err(AppError::SessionExpired)
        ));
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = SessionClaims {
            sub: "not-a-number".to_string(),
            iat: 0,
            exp: i64::MAX,
            sid: "sid".to_string(),
        };
        assert!(matches!(claims.user_id(), Err(AppError::InvalidSession)));
    }
}
