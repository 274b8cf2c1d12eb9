//! HTTP front for the question engine.
//!
//! Env:
//!   DRILL_CONFIG_PATH : TOML engine config (fallback policy, resample cap, port)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

use std::net::SocketAddr;

use math_drill_gen::{server, telemetry, EngineConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let config = EngineConfig::load_from_env();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!(target: "question_engine", fallback = ?config.fallback, max_attempts = config.max_resample_attempts, "Engine config ready");

    let app = server::router(config);
    let listener = TcpListener::bind(addr).await?;
    info!(target: "question_engine", %addr, "HTTP server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
