//! Engine-wide scheduling configuration and session limits.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Number of FSRS weights.
pub const WEIGHT_COUNT: usize = 17;

/// Default weight vector.
pub const DEFAULT_WEIGHTS: [f64; WEIGHT_COUNT] = [
    0.4, 0.6, 2.4, 5.8, // w[0-3]: initial stability for Again, Hard, Good, Easy
    4.93, // w[4]: initial difficulty base
    0.94, // w[5]: initial difficulty modifier
    0.86, // w[6]: difficulty step per rating
    0.01, // w[7]: mean reversion weight (unused)
    1.49, // w[8]: stability exp base
    0.14, // w[9]: stability decay
    0.94, // w[10]: retrievability effect
    0.94, // w[11]: lapse stability factor
    0.05, // w[12]: difficulty on forget (unused)
    0.34, // w[13]: stability on forget (unused)
    1.26, // w[14]: retrievability on forget (unused)
    0.29, // w[15]: hard penalty
    2.61, // w[16]: easy bonus
];

/// Accepted ranges for the weights that drive stability growth after recall.
///
/// Within these ranges S+ is finite and never negative, so recall can only
/// keep or raise stability.
pub const RECALL_WEIGHT_BOUNDS: [(usize, f64, f64); 5] = [
    (8, 0.0, 6.0),   // stability exp base
    (9, 0.0, 1.0),   // stability decay
    (10, 0.0, 5.0),  // retrievability effect
    (15, 0.0, 1.0),  // hard penalty
    (16, 0.0, 10.0), // easy bonus
];

pub const DEFAULT_REQUEST_RETENTION: f64 = 0.9;
pub const DEFAULT_MAXIMUM_INTERVAL: u32 = 36500;

/// FSRS parameters supplied once at engine construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub weights: [f64; WEIGHT_COUNT],
    pub request_retention: f64,
    /// Ceiling for `scheduled_days`.
    pub maximum_interval: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            request_retention: DEFAULT_REQUEST_RETENTION,
            maximum_interval: DEFAULT_MAXIMUM_INTERVAL,
        }
    }
}

impl SchedulerConfig {
    /// Check that the configuration can produce valid schedules.
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self.weights.iter().position(|w| !w.is_finite()) {
            return Err(SchedulerError::InvalidConfig(format!(
                "weight w[{index}] is not finite"
            )));
        }
        if let Some(index) = self.weights[..4].iter().position(|w| *w <= 0.0) {
            return Err(SchedulerError::InvalidConfig(format!(
                "initial stability weight w[{index}] must be positive"
            )));
        }
        for (index, min, max) in RECALL_WEIGHT_BOUNDS {
            let w = self.weights[index];
            if !(min..=max).contains(&w) {
                return Err(SchedulerError::InvalidConfig(format!(
                    "weight w[{index}] must be within [{min}, {max}], got {w}"
                )));
            }
        }
        if !(self.request_retention > 0.0 && self.request_retention < 1.0) {
            return Err(SchedulerError::InvalidConfig(format!(
                "request_retention must be in (0, 1), got {}",
                self.request_retention
            )));
        }
        if self.maximum_interval == 0 {
            return Err(SchedulerError::InvalidConfig(
                "maximum_interval must be at least 1 day".to_string(),
            ));
        }
        Ok(())
    }
}

/// Optional caps on how many due cards a session queues.
///
/// `None` means unlimited. Limits never reorder the queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_cards: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<usize>,
}

impl SessionLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = SchedulerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_retention, 0.9);
        assert_eq!(config.maximum_interval, 36500);
        assert_eq!(config.weights[11], 0.94);
    }

    #[test]
    fn rejects_retention_out_of_range() {
        for retention in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let config = SchedulerConfig {
                request_retention: retention,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(SchedulerError::InvalidConfig(_))),
                "retention {retention} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_zero_maximum_interval() {
        let config = SchedulerConfig {
            maximum_interval: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_weight() {
        let mut config = SchedulerConfig::default();
        config.weights[8] = f64::INFINITY;
        assert_eq!(
            config.validate(),
            Err(SchedulerError::InvalidConfig(
                "weight w[8] is not finite".to_string()
            ))
        );
    }

    #[test]
    fn rejects_non_positive_initial_stability() {
        let mut config = SchedulerConfig::default();
        config.weights[1] = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_recall_weights() {
        for index in [8, 9, 10, 15, 16] {
            let mut config = SchedulerConfig::default();
            config.weights[index] = -1.0;
            assert!(
                matches!(config.validate(), Err(SchedulerError::InvalidConfig(_))),
                "negative w[{index}] should be rejected"
            );
        }
    }

    #[test]
    fn rejects_oversized_growth_weights() {
        let mut config = SchedulerConfig::default();
        config.weights[8] = 50.0;
        assert_eq!(
            config.validate(),
            Err(SchedulerError::InvalidConfig(
                "weight w[8] must be within [0, 6], got 50".to_string()
            ))
        );
    }

    #[test]
    fn accepts_recall_weights_on_bounds() {
        let mut config = SchedulerConfig::default();
        for (index, min, _) in RECALL_WEIGHT_BOUNDS {
            config.weights[index] = min;
        }
        assert!(config.validate().is_ok());
        for (index, _, max) in RECALL_WEIGHT_BOUNDS {
            config.weights[index] = max;
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SchedulerConfig =
            serde_json::from_str(r#"{ "request_retention": 0.85 }"#).unwrap();
        assert_eq!(config.request_retention, 0.85);
        assert_eq!(config.maximum_interval, DEFAULT_MAXIMUM_INTERVAL);
        assert_eq!(config.weights, DEFAULT_WEIGHTS);
    }

    #[test]
    fn limits_default_to_unlimited() {
        let limits = SessionLimits::unlimited();
        assert_eq!(limits.new_cards, None);
        assert_eq!(limits.reviews, None);
    }
}
