//! Telemetry helpers for hosts embedding `clinic-hours-rs`.
//!
//! The editor only emits `tracing` events. Hosts either call one of the
//! helpers below or install their own subscriber and filters.

/// Filter used when `RUST_LOG` is unset: editor commits at `debug`, everything else at `info`.
pub const DEFAULT_FILTER_DIRECTIVE: &str = "info,clinic_hours=debug";

/// Initializes a compact subscriber honoring `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER_DIRECTIVE`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER_DIRECTIVE)
}

/// Same as [`init_default_tracing`] with a caller-provided fallback directive.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
