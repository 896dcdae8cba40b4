//! Structured-logging setup shared by the binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the log filter from a directives string, e.g. `info` or
/// `referral_node_api=debug,sqlx=warn`. The default from `Config` is a bare
/// level so events from every module pass regardless of crate name.
pub fn filter(directives: &str) -> EnvFilter {
    EnvFilter::new(directives)
}

/// Installs the global subscriber: env filter plus a fmt layer.
pub fn init(directives: &str) {
    tracing_subscriber::registry()
        .with(filter(directives))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
