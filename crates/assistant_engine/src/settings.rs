use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive range of simulated latency in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min: u64,
    pub max: u64,
}

impl DelayRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Uniform draw from the range. An inverted or empty range yields `min`.
    pub fn sample(&self) -> Duration {
        let millis = if self.min >= self.max {
            self.min
        } else {
            rand::rng().random_range(self.min..=self.max)
        };
        Duration::from_millis(millis)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Period of the upload progress timer.
    pub tick_interval_ms: u64,
    pub reply_delay_ms: DelayRange,
    pub search_delay_ms: DelayRange,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            reply_delay_ms: DelayRange::new(1500, 3500),
            search_delay_ms: DelayRange::new(1000, 2000),
        }
    }
}

impl SimulationSettings {
    pub fn tick_interval(&self) -> Duration {
        // A zero period would make tokio's interval panic.
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::{DelayRange, SimulationSettings};
    use std::time::Duration;

    #[test]
    fn samples_stay_inside_the_range() {
        let range = DelayRange::new(1500, 3500);
        for _ in 0..200 {
            let delay = range.sample();
            assert!(delay >= Duration::from_millis(1500));
            assert!(delay <= Duration::from_millis(3500));
        }
    }

    #[test]
    fn inverted_range_collapses_to_min() {
        let range = DelayRange::new(900, 100);
        assert_eq!(range.sample(), Duration::from_millis(900));
    }

    #[test]
    fn zero_tick_interval_is_clamped() {
        let settings = SimulationSettings {
            tick_interval_ms: 0,
            ..SimulationSettings::default()
        };
        assert_eq!(settings.tick_interval(), Duration::from_millis(1));
    }
}
