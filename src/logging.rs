//! Tracing setup for the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the composition root. Output goes to stderr so stdout stays clean for
//! command output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_FILTER: &str = "warn";

/// Longest filter string accepted from the environment or config.
const MAX_FILTER_LEN: usize = 4096;

/// Parse a filter directive, ignoring blank, oversized, or invalid input.
fn parse_filter(raw: &str) -> Option<EnvFilter> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > MAX_FILTER_LEN {
        return None;
    }
    EnvFilter::try_new(raw).ok()
}

/// Build the filter: `RUST_LOG`, else `config_filter`, else [`DEFAULT_FILTER`].
#[must_use]
pub fn build_filter(env_filter: Option<&str>, config_filter: Option<&str>) -> EnvFilter {
    env_filter
        .and_then(parse_filter)
        .or_else(|| config_filter.and_then(parse_filter))
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Calling this more than once is harmless;
/// later calls leave the first subscriber in place.
pub fn init(config_filter: Option<&str>) {
    let env = std::env::var("RUST_LOG").ok();
    let filter = build_filter(env.as_deref(), config_filter);

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
