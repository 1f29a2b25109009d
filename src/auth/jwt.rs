use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;
use crate::users::repo::{Role, User};

/// Session token payload. The role is trusted for the token's lifetime;
/// promotions and demotions take effect at the next login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub iat: usize,
    pub exp: usize,
}

/// Single-use password-reset token payload. Verified against a composite
/// secret derived from the user's current password hash, so it stops
/// verifying the moment the password changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    secret: String,
    pub session_ttl: Duration,
    pub reset_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let jwt = &state.config.jwt;
        Self::new(&jwt.secret, jwt.ttl_minutes, jwt.reset_ttl_minutes)
    }
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_minutes: i64, reset_ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            secret: secret.to_string(),
            session_ttl: Duration::minutes(ttl_minutes),
            reset_ttl: Duration::minutes(reset_ttl_minutes),
        }
    }

    pub fn sign_session(&self, user: &User) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            name: user.name.clone(),
            iat: now.unix_timestamp() as usize,
            exp: (now + self.session_ttl).unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user.id, role = ?user.role, "session token signed");
        Ok(token)
    }

    pub fn verify_session(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.validate_aud = false;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, "session token verified");
        Ok(data.claims)
    }

    /// Server secret concatenated with the current password hash. Consuming
    /// a reset changes the hash, which retires every token signed before it.
    fn composite_secret(&self, password_hash: &str) -> Vec<u8> {
        let mut secret = self.secret.as_bytes().to_vec();
        secret.extend_from_slice(password_hash.as_bytes());
        secret
    }

    pub fn sign_reset(&self, user_id: Uuid, password_hash: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = ResetClaims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: (now + self.reset_ttl).unix_timestamp() as usize,
        };
        let key = EncodingKey::from_secret(&self.composite_secret(password_hash));
        Ok(encode(&Header::default(), &claims, &key)?)
    }

    pub fn verify_reset(&self, token: &str, password_hash: &str) -> anyhow::Result<ResetClaims> {
        let key = DecodingKey::from_secret(&self.composite_secret(password_hash));
        let mut validation = Validation::default();
        validation.validate_aud = false;
        let data = decode::<ResetClaims>(token, &key, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Date, Month};

    fn make_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            role,
            phone: "555".into(),
            blood_type: "O+".into(),
            date_of_birth: Date::from_calendar_date(1990, Month::January, 1).unwrap(),
            gender: "female".into(),
            address: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn session_roundtrip_preserves_identity_and_role() {
        let keys = JwtKeys::new("dev-secret", 60, 60);
        let user = make_user(Role::Admin);
        let token = keys.sign_session(&user).expect("sign");
        let claims = keys.verify_session(&token).expect("verify");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "ann@x.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.name, "Ann");
    }

    #[test]
    fn verify_fails_closed_on_wrong_secret() {
        let keys = JwtKeys::new("secret-a", 60, 60);
        let other = JwtKeys::new("secret-b", 60, 60);
        let token = keys.sign_session(&make_user(Role::User)).expect("sign");
        assert!(other.verify_session(&token).is_err());
    }

    #[test]
    fn verify_fails_closed_on_garbage() {
        let keys = JwtKeys::new("dev-secret", 60, 60);
        assert!(keys.verify_session("not-a-token").is_err());
        assert!(keys.verify_session("").is_err());
    }

    #[test]
    fn expired_session_is_rejected() {
        let keys = JwtKeys::new("dev-secret", 60, 60);
        let now = OffsetDateTime::now_utc();
        // Encode an already-expired token with the same secret, beyond the
        // default 60s verification leeway.
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "ann@x.com".into(),
            role: Role::User,
            name: "Ann".into(),
            iat: (now - Duration::hours(2)).unix_timestamp() as usize,
            exp: (now - Duration::hours(1)).unix_timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"dev-secret"),
        )
        .unwrap();
        assert!(keys.verify_session(&token).is_err());
    }

    #[test]
    fn reset_roundtrip_against_current_hash() {
        let keys = JwtKeys::new("dev-secret", 60, 60);
        let user_id = Uuid::new_v4();
        let token = keys.sign_reset(user_id, "hash-v1").expect("sign");
        let claims = keys.verify_reset(&token, "hash-v1").expect("verify");
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn reset_token_dies_when_the_hash_changes() {
        let keys = JwtKeys::new("dev-secret", 60, 60);
        let user_id = Uuid::new_v4();
        let token = keys.sign_reset(user_id, "hash-v1").expect("sign");
        // Password changed: the composite secret is different now.
        assert!(keys.verify_reset(&token, "hash-v2").is_err());
    }

    #[test]
    fn reset_token_is_not_a_session_token() {
        let keys = JwtKeys::new("dev-secret", 60, 60);
        let token = keys.sign_reset(Uuid::new_v4(), "hash-v1").expect("sign");
        assert!(keys.verify_session(&token).is_err());
    }
}
