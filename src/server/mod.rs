//! HTTP surface (feature `server`): thin axum handlers over the engine.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /api/v1/health` | liveness |
//! | `GET /api/v1/question` | [`handler::get_question`] |
//! | `POST /api/v1/check` | [`handler::post_check`] |
//! | `GET /api/v1/catalog` | [`handler::get_catalog`] |

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::drill_engine::EngineConfig;

pub mod handler;

pub fn router(config: EngineConfig) -> Router {
    Router::new()
        .route("/api/v1/health",   get(handler::health))
        .route("/api/v1/question", get(handler::get_question))
        .route("/api/v1/check",    post(handler::post_check))
        .route("/api/v1/catalog",  get(handler::get_catalog))
        .with_state(Arc::new(config))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
