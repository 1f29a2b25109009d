use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::dashboard))
        .route("/auth-check", get(handlers::auth_check))
        .route("/update-profile", put(handlers::update_profile))
        .route("/schedule-appointment", post(handlers::schedule_appointment))
        .route("/blood-request", post(handlers::create_blood_request))
}
