pub(crate) use crate::auth::dto::{AuthKeys, Claims, TokenScope};
use crate::state::AppState;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use time::{Duration, OffsetDateTime};
use tracing::warn;
use uuid::Uuid;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("stored password hash is malformed: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

impl FromRef<AppState> for AuthKeys {
    fn from_ref(state: &AppState) -> Self {
        let jwt = &state.config.jwt;
        AuthKeys {
            encoding: EncodingKey::from_secret(jwt.secret.as_bytes()),
            decoding: DecodingKey::from_secret(jwt.secret.as_bytes()),
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            session_ttl: Duration::minutes(jwt.ttl_minutes),
            renewal_ttl: Duration::minutes(jwt.refresh_ttl_minutes),
        }
    }
}

impl AuthKeys {
    fn issue(&self, user_id: Uuid, scope: TokenScope) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let ttl = match scope {
            TokenScope::Session => self.session_ttl,
            TokenScope::Renewal => self.renewal_ttl,
        };
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: (now + ttl).unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            scope,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn sign_access(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.issue(user_id, TokenScope::Session)
    }

    pub fn sign_refresh(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.issue(user_id, TokenScope::Renewal)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        Ok(decode::<Claims>(token, &self.decoding, &validation)?.claims)
    }

    pub fn verify_refresh(&self, token: &str) -> anyhow::Result<Claims> {
        let claims = self.verify(token)?;
        if claims.scope != TokenScope::Renewal {
            anyhow::bail!("refresh token required");
        }
        Ok(claims)
    }
}

fn bearer(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Extracts and validates the session JWT, yielding the owner reference
/// every owner-scoped operation requires.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthKeys: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = AuthKeys::from_ref(state);
        let token = bearer(parts).ok_or((
            StatusCode::UNAUTHORIZED,
            "Missing bearer token".to_string(),
        ))?;

        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            )
        })?;

        if claims.scope != TokenScope::Session {
            return Err((
                StatusCode::UNAUTHORIZED,
                "Access token required".to_string(),
            ));
        }

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("hunter2hunter2").expect("hashing should succeed");
        assert!(verify_password("hunter2hunter2", &hash).expect("verify should succeed"));
        assert!(!verify_password("hunter3hunter3", &hash).expect("verify should succeed"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("cook@example.com"));
        assert!(is_valid_email("a.b+tag@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
    }
}

#[cfg(test)]
mod jwt_tests {
    use super::*;

    fn keys() -> AuthKeys {
        AuthKeys::from_ref(&AppState::fake())
    }

    #[tokio::test]
    async fn session_token_roundtrip() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign_access(user_id).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.scope, TokenScope::Session);
    }

    #[tokio::test]
    async fn refresh_check_accepts_renewal_scope_only() {
        let keys = keys();
        let user_id = Uuid::new_v4();

        let refresh = keys.sign_refresh(user_id).expect("sign refresh");
        let claims = keys.verify_refresh(&refresh).expect("verify refresh");
        assert_eq!(claims.sub, user_id);

        let access = keys.sign_access(user_id).expect("sign access");
        let err = keys.verify_refresh(&access).unwrap_err();
        assert!(err.to_string().contains("refresh token required"));
    }

    #[tokio::test]
    async fn garbage_tokens_fail_verification() {
        assert!(keys().verify("not.a.jwt").is_err());
    }
}
