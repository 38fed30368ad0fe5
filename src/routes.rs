//! Router assembly and process-level middleware.

use crate::config;
use crate::error::AppError;
use crate::handlers;
use crate::ratelimit;
use crate::state::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Request bodies above this size are rejected before the handler runs.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn not_found() -> AppError {
    AppError::NotFound
}

fn cors_origin(origin: &str) -> HeaderValue {
    origin.parse().unwrap_or_else(|_| {
        tracing::warn!(origin, "FRONTEND_URL is not a valid origin; using the default");
        HeaderValue::from_static(config::DEFAULT_FRONTEND_URL)
    })
}

/// Full application router: the contact endpoint, health/version, a 404
/// fallback, and the process-level layers (rate limit, body limit, CORS,
/// security headers, tracing).
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin(&state.config.frontend_url))
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/contact", post(handlers::submit_contact))
        .route("/health", get(health))
        .route("/version", get(version))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ratelimit::enforce,
        ))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
