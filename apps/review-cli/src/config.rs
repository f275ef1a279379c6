//! Configuration loaded from environment variables.

use anyhow::{anyhow, Context};
use flashcard_scheduler::config::WEIGHT_COUNT;
use flashcard_scheduler::{SchedulerConfig, SessionLimits};

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub scheduler: SchedulerConfig,
    pub limits: SessionLimits,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Recognised variables: `FSRS_REQUEST_RETENTION`, `FSRS_MAXIMUM_INTERVAL`,
    /// `FSRS_WEIGHTS` (17 comma-separated numbers), `STUDY_NEW_CARDS_LIMIT`,
    /// `STUDY_REVIEWS_LIMIT`. Unset variables keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut scheduler = SchedulerConfig::default();

        if let Some(value) = lookup("FSRS_REQUEST_RETENTION") {
            scheduler.request_retention = value
                .trim()
                .parse::<f64>()
                .with_context(|| format!("FSRS_REQUEST_RETENTION is not a number: {value}"))?;
        }
        if let Some(value) = lookup("FSRS_MAXIMUM_INTERVAL") {
            scheduler.maximum_interval = value
                .trim()
                .parse::<u32>()
                .with_context(|| format!("FSRS_MAXIMUM_INTERVAL is not a day count: {value}"))?;
        }
        if let Some(value) = lookup("FSRS_WEIGHTS") {
            scheduler.weights = parse_weights(&value)?;
        }
        scheduler.validate()?;

        let limits = SessionLimits {
            new_cards: parse_limit(&lookup, "STUDY_NEW_CARDS_LIMIT")?,
            reviews: parse_limit(&lookup, "STUDY_REVIEWS_LIMIT")?,
        };

        Ok(Self { scheduler, limits })
    }
}

fn parse_weights(value: &str) -> anyhow::Result<[f64; WEIGHT_COUNT]> {
    let weights = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid weight in FSRS_WEIGHTS: {part}"))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;

    let count = weights.len();
    weights
        .try_into()
        .map_err(|_| anyhow!("FSRS_WEIGHTS needs {WEIGHT_COUNT} values, got {count}"))
}

fn parse_limit<F>(lookup: &F, key: &str) -> anyhow::Result<Option<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{key} is not a card count: {value}"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_retention_interval_and_limits() {
        let config = config_from(&[
            ("FSRS_REQUEST_RETENTION", "0.85"),
            ("FSRS_MAXIMUM_INTERVAL", "365"),
            ("STUDY_NEW_CARDS_LIMIT", "20"),
            ("STUDY_REVIEWS_LIMIT", " 200 "),
        ])
        .unwrap();

        assert_eq!(config.scheduler.request_retention, 0.85);
        assert_eq!(config.scheduler.maximum_interval, 365);
        assert_eq!(config.limits.new_cards, Some(20));
        assert_eq!(config.limits.reviews, Some(200));
    }

    #[test]
    fn reads_weight_vector() {
        let weights = "0.5, 0.7, 2.5, 6.0, 5.0, 1.0, 0.9, 0.0, 1.5, 0.1, 1.0, 0.9, 0.0, 0.3, 1.2, 0.3, 2.5";
        let config = config_from(&[("FSRS_WEIGHTS", weights)]).unwrap();
        assert_eq!(config.scheduler.weights[0], 0.5);
        assert_eq!(config.scheduler.weights[16], 2.5);
    }

    #[test]
    fn rejects_short_weight_vector() {
        let err = config_from(&[("FSRS_WEIGHTS", "0.4, 0.6")]).unwrap_err();
        assert_eq!(err.to_string(), "FSRS_WEIGHTS needs 17 values, got 2");
    }

    #[test]
    fn rejects_invalid_retention() {
        assert!(config_from(&[("FSRS_REQUEST_RETENTION", "1.5")]).is_err());
        assert!(config_from(&[("FSRS_REQUEST_RETENTION", "high")]).is_err());
    }

    #[test]
    fn rejects_non_numeric_limit() {
        assert!(config_from(&[("STUDY_NEW_CARDS_LIMIT", "lots")]).is_err());
    }
}
