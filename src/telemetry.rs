//! Telemetry helpers for applications embedding `ticker-chart`.
//!
//! This module keeps tracing setup explicit and opt-in.
//! Consumers can either call `init_default_tracing` or wire their own
//! `tracing` subscriber and filters.
//!
//! Timing instrumentation is injected per engine through [`TimingHook`]
//! instead of living in process-wide state.

use std::time::Instant;

use tracing::debug;

/// One measured operation reported to a [`TimingHook`].
#[derive(Debug, Clone, PartialEq)]
pub struct TimingSample {
    pub name: &'static str,
    pub duration_ms: f64,
}

/// Caller-provided sink for timing samples.
pub type TimingHook = Box<dyn FnMut(TimingSample) + Send>;

/// Runs `f`, logs its duration and forwards a sample to `hook` when present.
///
/// The sample is emitted even when `f` returns an error value.
pub fn measure<T>(name: &'static str, hook: Option<&mut TimingHook>, f: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let output = f();
    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
    debug!(operation = name, duration_ms, "timed operation finished");
    if let Some(hook) = hook {
        hook(TimingSample { name, duration_ms });
    }
    output
}

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
