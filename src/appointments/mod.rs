use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_all))
        .route("/:id", delete(handlers::delete))
        .route("/:id/cancel", put(handlers::cancel))
        .route("/:id/complete", put(handlers::complete))
        .route("/:id/reschedule", put(handlers::reschedule))
}
