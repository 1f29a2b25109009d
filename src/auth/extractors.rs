use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::jwt::{Claims, JwtKeys};
use crate::error::AppError;
use crate::users::repo::Role;

pub const SESSION_COOKIE: &str = "token";

/// Pull the session token out of the `token` cookie, falling back to an
/// `Authorization: Bearer` header. Cookie wins when both are present.
fn extract_token(parts: &Parts) -> Option<String> {
    let from_cookie = parts
        .headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header);
    if from_cookie.is_some() {
        return from_cookie;
    }

    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")))
        .map(str::to_string)
}

fn token_from_cookie_header(header: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// Any authenticated caller. Verification only; no store lookup, so the
/// embedded role is as fresh as the token.
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let token = extract_token(parts).ok_or_else(|| {
            AppError::Unauthenticated("Access denied. Please log in to continue.".into())
        })?;

        match keys.verify_session(&token) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(_) => {
                warn!("invalid or expired session token");
                Err(AppError::Unauthenticated(
                    "Invalid or expired token. Please log in again.".into(),
                ))
            }
        }
    }
}

fn require_role(claims: Claims, role: Role, label: &str) -> Result<Claims, AppError> {
    if claims.role == role {
        Ok(claims)
    } else {
        Err(AppError::Forbidden(format!(
            "Access denied. Required role: {label}"
        )))
    }
}

/// Authenticated caller whose token carries the admin role.
pub struct AdminUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        Ok(AdminUser(require_role(claims, Role::Admin, "admin")?))
    }
}

/// Authenticated caller on the donor side of the app.
pub struct DonorUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for DonorUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        Ok(DonorUser(require_role(claims, Role::User, "user")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[test]
    fn cookie_header_parsing() {
        assert_eq!(
            token_from_cookie_header("token=abc.def.ghi"),
            Some("abc.def.ghi".into())
        );
        assert_eq!(
            token_from_cookie_header("theme=dark; token=abc; other=1"),
            Some("abc".into())
        );
        assert_eq!(token_from_cookie_header("theme=dark"), None);
        assert_eq!(token_from_cookie_header("token="), None);
        // `token` must match the whole cookie name.
        assert_eq!(token_from_cookie_header("xtoken=abc"), None);
    }

    fn claims_with_role(role: Role) -> Claims {
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        Claims {
            sub: Uuid::new_v4(),
            email: "ann@x.com".into(),
            role,
            name: "Ann".into(),
            iat: now,
            exp: now + 60,
        }
    }

    #[test]
    fn role_guard_passes_matching_role() {
        assert!(require_role(claims_with_role(Role::Admin), Role::Admin, "admin").is_ok());
        assert!(require_role(claims_with_role(Role::User), Role::User, "user").is_ok());
    }

    #[test]
    fn role_guard_rejects_mismatch_with_forbidden() {
        let err = require_role(claims_with_role(Role::User), Role::Admin, "admin").unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::FORBIDDEN);
        assert!(err.to_string().contains("admin"));
    }
}
