use std::collections::HashSet;
use std::net::SocketAddr;

use axum::{
    extract::OriginalUri,
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use regex::Regex;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::{admin, appointments, auth, blood_requests, inventory, users};

pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", auth::router())
                .nest("/users", users::router())
                .nest("/admin", admin::router())
                .nest("/appointments", appointments::router())
                .nest("/blood-requests", blood_requests::router())
                .nest("/inventory", inventory::router())
                .fallback(api_not_found),
        )
        .with_state(state)
        .layer(CookieManagerLayer::new())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

/// Explicit allow-list plus an optional pattern for rotating preview
/// deployments. Requests without an Origin header bypass CORS entirely.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let allowed: HashSet<String> = config.allowed_origins.iter().cloned().collect();
    let preview = config.preview_origin_pattern.as_deref().and_then(|p| {
        Regex::new(p)
            .map_err(|e| warn!(error = %e, "invalid preview origin pattern, ignoring"))
            .ok()
    });

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request_parts| {
                let Ok(origin) = origin.to_str() else {
                    return false;
                };
                if allowed.contains(origin)
                    || preview.as_ref().is_some_and(|re| re.is_match(origin))
                {
                    true
                } else {
                    warn!(%origin, "blocked unauthorized origin");
                    false
                }
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "status": "OK",
        "message": "Blood Donation Management API is running",
        "timestamp": OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
    }))
}

async fn api_not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": format!("API endpoint {uri} not found"),
        })),
    )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
