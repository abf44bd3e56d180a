use std::time::Duration;

/// Simulated latency between triggering an analysis and the mode becoming available.
pub const DEFAULT_ANALYZE_DELAY: Duration = Duration::from_millis(1500);

/// How long the tutorial placeholder gauge takes to fill.
pub const DEFAULT_TUTORIAL_PREVIEW: Duration = Duration::from_secs(3);

pub const ANALYZE_DELAY_ENV: &str = "BILIDOWN_ANALYZE_DELAY_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub analyze_delay: Duration,
    pub tutorial_preview: Duration,
}

impl Config {
    pub fn with_analyze_delay(mut self, delay: Duration) -> Self {
        self.analyze_delay = delay;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analyze_delay: DEFAULT_ANALYZE_DELAY,
            tutorial_preview: DEFAULT_TUTORIAL_PREVIEW,
        }
    }
}
