//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for router behavior that does not
//! change routing results.
//!
//! ## Environment Variables
//!
//! ### `CUPCAKE_SLOW_MATCH_US`
//!
//! Lookups taking longer than this many microseconds are logged at WARN.
//! Accepts decimal (`1000`) or hexadecimal (`0x3e8`). `0` disables lookup
//! timing entirely.
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use cupcake::router::RouterBuilder;
//! use cupcake::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! let builder: RouterBuilder<&str> = RouterBuilder::with_config(config);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_MATCH_US: u64 = 1000;

/// Router configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Lookups slower than this are logged; `None` skips timing.
    pub slow_match_threshold: Option<Duration>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            slow_match_threshold: Some(Duration::from_micros(DEFAULT_SLOW_MATCH_US)),
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let micros = env::var("CUPCAKE_SLOW_MATCH_US")
            .ok()
            .and_then(|val| parse_number(&val))
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        Self::from_micros(micros)
    }

    fn from_micros(micros: u64) -> Self {
        RouterConfig {
            slow_match_threshold: (micros > 0).then(|| Duration::from_micros(micros)),
        }
    }
}

fn parse_number(val: &str) -> Option<u64> {
    let val = val.trim();
    match val.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1000"), Some(1000));
        assert_eq!(parse_number("0x3e8"), Some(1000));
        assert_eq!(parse_number(" 250 "), Some(250));
        assert_eq!(parse_number("soon"), None);
    }

    #[test]
    fn test_zero_disables_timing() {
        assert_eq!(RouterConfig::from_micros(0).slow_match_threshold, None);
        assert_eq!(
            RouterConfig::from_micros(5).slow_match_threshold,
            Some(Duration::from_micros(5))
        );
        assert_eq!(RouterConfig::default(), RouterConfig::from_micros(1000));
    }
}
