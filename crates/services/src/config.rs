use std::time::Duration;

use sprint_core::model::SessionRules;

/// Tunables for `GameEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub rules: SessionRules,
    /// Pause between a scored answer and the next question.
    pub advance_delay: Duration,
    pub tick_period: Duration,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: SessionRules::default(),
            advance_delay: Duration::from_millis(1500),
            tick_period: Duration::from_secs(1),
            seed: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_rules(mut self, rules: SessionRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
