use axum::{routing::post, Router};

use crate::state::AppState;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/requestPasswordReset", post(handlers::request_password_reset))
        .route("/resetPassword", post(handlers::reset_password))
}
