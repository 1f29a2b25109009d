use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::dashboard))
        .route("/users", get(handlers::list_users))
        .route("/users/:id", get(handlers::get_user).delete(handlers::delete_user))
        .route("/promote/:id", post(handlers::promote))
        .route("/demote/:id", post(handlers::demote))
}
