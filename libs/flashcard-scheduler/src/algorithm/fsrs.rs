//! FSRS (Free Spaced Repetition Scheduler) algorithm.
//!
//! DSR memory model:
//! - Difficulty (D): intrinsic hardness, 1-10
//! - Stability (S): days until retrievability falls to the target retention
//! - Retrievability (R): probability of recall after `t` days
//!
//! The numeric helpers take only the numbers they need so each formula can be
//! exercised on its own. Their evaluation order is fixed; changing it changes
//! the low bits of every schedule produced.

use chrono::{DateTime, Duration, Utc};

use super::CardUpdate;
use crate::config::SchedulerConfig;
use crate::error::{Result, SchedulerError};
use crate::lifecycle::next_state;
use crate::types::{Card, CardState, Rating};

/// Stability floor applied after a lapse.
pub const MIN_STABILITY: f64 = 0.1;
pub const MIN_DIFFICULTY: f64 = 1.0;
pub const MAX_DIFFICULTY: f64 = 10.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// FSRS scheduler bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct Fsrs {
    config: SchedulerConfig,
}

impl Fsrs {
    /// Build a scheduler, rejecting configurations that cannot produce valid
    /// schedules.
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            tracing::warn!(error = %err, "rejected scheduler config");
            return Err(err);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    fn w(&self, index: usize) -> f64 {
        self.config.weights[index]
    }

    /// Compute the memory state and due date after `card` is rated at `now`.
    ///
    /// Pure: the card is not modified, and identical inputs always give
    /// identical output.
    pub fn schedule(&self, card: &Card, rating: Rating, now: DateTime<Utc>) -> Result<CardUpdate> {
        validate_card(card)?;

        let state = next_state(card.state, rating);
        let (stability, difficulty, reps, lapses) = if card.is_new() {
            (
                self.initial_stability(rating),
                self.initial_difficulty(rating),
                1,
                0,
            )
        } else if rating == Rating::Again {
            (
                self.lapse_stability(card.stability),
                self.next_difficulty(card.difficulty, rating),
                card.reps,
                card.lapses + 1,
            )
        } else {
            let difficulty = self.next_difficulty(card.difficulty, rating);
            let elapsed = elapsed_days(card, now);
            let r = Self::retrievability(f64::from(elapsed), card.stability);
            (
                self.recall_stability(card.stability, difficulty, r, rating),
                difficulty,
                card.reps + 1,
                card.lapses,
            )
        };

        let scheduled_days = self.interval(stability);
        let next_review = now
            .checked_add_signed(Duration::days(i64::from(scheduled_days)))
            .ok_or_else(|| {
                SchedulerError::InvalidConfig(format!(
                    "interval of {scheduled_days} days overflows the calendar"
                ))
            })?;

        tracing::debug!(
            card_id = %card.id,
            %rating,
            from = %card.state,
            to = %state,
            stability,
            difficulty,
            scheduled_days,
            "scheduled card"
        );

        Ok(CardUpdate {
            state,
            stability,
            difficulty,
            reps,
            lapses,
            scheduled_days,
            elapsed_days: 0,
            last_review: now,
            next_review,
        })
    }

    /// Initial stability for a first rating: S0(G) = w[G-1].
    pub fn initial_stability(&self, rating: Rating) -> f64 {
        self.w(usize::from(rating.to_value()) - 1)
    }

    /// Initial difficulty for a first rating: D0(G) = w[4] - e^(w[5] * (G - 3)) + 1.
    pub fn initial_difficulty(&self, rating: Rating) -> f64 {
        let g = f64::from(rating.to_value());
        let d0 = self.w(4) - (self.w(5) * (g - 3.0)).exp() + 1.0;
        clamp_difficulty(d0)
    }

    /// Difficulty after a rating on a reviewed card: D' = D - w[6] * (G - 3).
    pub fn next_difficulty(&self, difficulty: f64, rating: Rating) -> f64 {
        let g = f64::from(rating.to_value());
        clamp_difficulty(difficulty - self.w(6) * (g - 3.0))
    }

    /// Probability of recall after `elapsed_days`: R = (1 + t / (9 * S))^-1.
    pub fn retrievability(elapsed_days: f64, stability: f64) -> f64 {
        if stability <= 0.0 {
            return 0.0;
        }
        (1.0 + elapsed_days / (9.0 * stability)).powi(-1)
    }

    /// Stability after successful recall.
    ///
    /// S+ = e^w[8] * (11 - D) * S^-w[9] * (e^((1 - R) * w[10]) - 1), scaled by
    /// w[15] for Hard and w[16] for Easy; S' = S * (1 + S+).
    ///
    /// With validated weights S+ >= 0, so S' >= S. The result saturates at
    /// `f64::MAX` instead of overflowing to infinity.
    pub fn recall_stability(
        &self,
        stability: f64,
        difficulty: f64,
        retrievability: f64,
        rating: Rating,
    ) -> f64 {
        let increase = self.w(8).exp()
            * (11.0 - difficulty)
            * stability.powf(-self.w(9))
            * (((1.0 - retrievability) * self.w(10)).exp() - 1.0);

        let scaled = match rating {
            Rating::Hard => increase * self.w(15),
            Rating::Easy => increase * self.w(16),
            Rating::Again | Rating::Good => increase,
        };

        (stability * (1.0 + scaled)).min(f64::MAX)
    }

    /// Stability after a lapse: S' = max(0.1, S * w[11]).
    pub fn lapse_stability(&self, stability: f64) -> f64 {
        (stability * self.w(11)).max(MIN_STABILITY)
    }

    /// Whole-day interval for a stability: round(9 * S * (1/R_target - 1)),
    /// clamped to [1, maximum_interval].
    pub fn interval(&self, stability: f64) -> u32 {
        let days = (9.0 * stability * (1.0 / self.config.request_retention - 1.0)).round();
        let max = f64::from(self.config.maximum_interval);
        if days.is_nan() {
            return 1;
        }
        days.clamp(1.0, max) as u32
    }

    /// Predicted probability of recall for `card` at time `at`.
    ///
    /// A card that has never been reviewed predicts 0.
    pub fn predict_retention(&self, card: &Card, at: DateTime<Utc>) -> f64 {
        if card.is_new() {
            return 0.0;
        }
        let elapsed = match card.last_review {
            Some(last) => {
                (at.signed_duration_since(last).num_seconds() as f64 / SECONDS_PER_DAY).max(0.0)
            }
            None => f64::from(card.elapsed_days),
        };
        Self::retrievability(elapsed, card.stability)
    }
}

/// Whole days since the card's last review, never negative.
///
/// Falls back to the stored `elapsed_days` when no review time is recorded.
pub fn elapsed_days(card: &Card, now: DateTime<Utc>) -> u32 {
    match card.last_review {
        Some(last) => {
            let days = now.signed_duration_since(last).num_days().max(0);
            u32::try_from(days).unwrap_or(u32::MAX)
        }
        None => card.elapsed_days,
    }
}

fn clamp_difficulty(difficulty: f64) -> f64 {
    difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Reject cards whose memory state is already invalid.
///
/// New cards carry no memory state and are always accepted.
fn validate_card(card: &Card) -> Result<()> {
    if card.state == CardState::New {
        return Ok(());
    }

    let reason = if !card.stability.is_finite() || card.stability <= 0.0 {
        Some(format!(
            "stability must be positive for a {} card, got {}",
            card.state, card.stability
        ))
    } else if !card.difficulty.is_finite()
        || !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&card.difficulty)
    {
        Some(format!(
            "difficulty must be within [1, 10], got {}",
            card.difficulty
        ))
    } else {
        None
    };

    match reason {
        Some(reason) => {
            tracing::warn!(card_id = %card.id, %reason, "rejected corrupt card");
            Err(SchedulerError::CorruptCard {
                id: card.id.clone(),
                reason,
            })
        }
        None => Ok(()),
    }
}
