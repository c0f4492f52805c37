// src/infra/logger.rs — Structured logging with tracing

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber. RUST_LOG takes precedence; otherwise
/// the given level applies to this crate only, with HTTP client internals
/// kept at warn so request logs stay readable.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn default_directives(level: &str) -> String {
    format!("tweetforge={level},hyper=warn,reqwest=warn")
}
