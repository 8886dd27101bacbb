//! Scout runtime configuration.
use std::env;
use std::str::FromStr;

/// Configuration for the tick loop and the simulated hardware.
#[derive(Clone, Debug)]
pub struct ScoutConfig {
    /// Tick period in milliseconds.
    pub tick_period_ms: u64,
    /// One-time tree setup timeout in seconds.
    pub setup_timeout_secs: u64,
    /// Battery percentage below which the low-battery warning fires.
    pub battery_threshold: f64,
    /// How long a simulated rotation takes, in milliseconds.
    pub rotate_duration_ms: u64,
    /// Celebration pause after a completed scan, in seconds.
    pub pause_secs: u64,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 500,
            setup_timeout_secs: 15,
            battery_threshold: 30.0,
            rotate_duration_ms: 5000,
            pause_secs: 3,
        }
    }
}

impl ScoutConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SCOUT_TICK_PERIOD_MS` - Tick period (default: 500)
    /// - `SCOUT_SETUP_TIMEOUT_SECS` - Setup timeout (default: 15)
    /// - `SCOUT_BATTERY_THRESHOLD` - Low battery threshold (default: 30.0)
    /// - `SCOUT_ROTATE_DURATION_MS` - Simulated rotation length (default: 5000)
    /// - `SCOUT_PAUSE_SECS` - Post-scan celebration pause (default: 3)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(period) = read_env::<u64>("SCOUT_TICK_PERIOD_MS") {
            config.tick_period_ms = period.max(1);
        }
        if let Some(timeout) = read_env::<u64>("SCOUT_SETUP_TIMEOUT_SECS") {
            config.setup_timeout_secs = timeout.max(1);
        }
        if let Some(threshold) = read_env::<f64>("SCOUT_BATTERY_THRESHOLD") {
            config.battery_threshold = threshold;
        }
        if let Some(duration) = read_env::<u64>("SCOUT_ROTATE_DURATION_MS") {
            config.rotate_duration_ms = duration;
        }
        if let Some(pause) = read_env::<u64>("SCOUT_PAUSE_SECS") {
            config.pause_secs = pause;
        }

        config
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.trim().parse().ok()
}
