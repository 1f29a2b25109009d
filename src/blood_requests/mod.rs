use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_all))
        .route("/:id/accept", post(handlers::accept))
        .route("/:id/reject", post(handlers::reject))
}
