//! Logging setup on top of `tracing-subscriber`.
//!
//! `RUST_LOG` wins over the configured filter. Noisy HTTP and GUI crates are
//! kept at `warn` unless the filter names them explicitly.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates that log too much at `info`/`debug` for everyday use.
const QUIET_CRATES: &[&str] = &[
    "reqwest",
    "hyper",
    "hyper_util",
    "wgpu_core",
    "wgpu_hal",
    "naga",
    "eframe",
    "egui_wgpu",
];

/// Filter for `configured` (e.g. `"info"` or `"fitscope=debug"`).
pub fn build_env_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(configured)))
}

/// Directive string: the configured filter followed by `warn` for [`QUIET_CRATES`]
/// that the configured filter does not mention.
pub fn filter_directives(configured: &str) -> String {
    let configured = configured.trim();
    let base = if configured.is_empty() { "info" } else { configured };
    let mut directives = vec![base.to_string()];
    for krate in QUIET_CRATES {
        if !base.split(',').any(|d| d.trim().starts_with(krate)) {
            directives.push(format!("{krate}=warn"));
        }
    }
    directives.join(",")
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(configured: &str) {
    let result = tracing_subscriber::registry()
        .with(build_env_filter(configured))
        .with(fmt::layer().with_target(true))
        .try_init();
    if result.is_err() {
        tracing::debug!("logging already initialised");
    }
}
