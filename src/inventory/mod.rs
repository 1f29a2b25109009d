use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_all).post(handlers::create))
        .route("/low-stock", get(handlers::low_stock))
        .route("/:id", put(handlers::update).delete(handlers::delete))
}
