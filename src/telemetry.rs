//! Opt-in `tracing` setup for hosts and demos.
//!
//! Controller and sweep code emit `debug!`/`trace!` events under the
//! `usage_chart` target; nothing is printed until a subscriber is installed.

/// Filter used when `RUST_LOG` is unset: engine decisions at `debug`, everything else at `info`.
pub const DEFAULT_FILTER: &str = "info,usage_chart=debug";

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// `false` without the `telemetry` feature or when a global subscriber exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Same as [`init_default_tracing`] with an explicit directive string such as
/// `"usage_chart::api=trace"`. Invalid directives are rejected.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        match tracing_subscriber::EnvFilter::try_new(directives) {
            Ok(filter) => install(filter),
            Err(_) => false,
        }
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
