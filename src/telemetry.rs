//! Tracing setup for the binaries.
//!
//! - `LOG_LEVEL` is the filter, e.g. `debug` or
//!   `info,question_engine=debug,tower_http=info`.
//! - `LOG_FORMAT=json` switches to structured JSON lines; anything else
//!   gives the human-readable format.
//!
//! The library itself only emits events (target `question_engine`); it never
//! installs a subscriber.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,question_engine=debug,tower_http=info,axum=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
