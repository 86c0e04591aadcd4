use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// tracing 구독자 초기화 (RUST_LOG 없으면 info)
/// Initialize the tracing subscriber
pub fn init() {
    let fmt_layer = fmt::layer().with_target(false);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,sqlx=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
