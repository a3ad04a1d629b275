//! Telemetry helpers for applications embedding `category-chart`.
//!
//! The engine only emits `tracing` events; installing a subscriber is left to
//! the host unless the `telemetry` feature is enabled and one of these helpers
//! is called.

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER_DIRECTIVE: &str = "category_chart=info";

/// Initializes a compact `tracing` subscriber filtered by `RUST_LOG`, falling
/// back to [`DEFAULT_FILTER_DIRECTIVE`].
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER_DIRECTIVE)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"category_chart=trace"` to follow every brush remap.
#[must_use]
pub fn init_tracing(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
