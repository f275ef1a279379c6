//! Spaced repetition scheduling.

pub mod fsrs;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Card, CardState};

/// Memory state and next due date produced by one rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdate {
    pub state: CardState,
    pub stability: f64,
    pub difficulty: f64,
    pub reps: u32,
    pub lapses: u32,
    pub scheduled_days: u32,
    pub elapsed_days: u32,
    pub last_review: DateTime<Utc>,
    pub next_review: DateTime<Utc>,
}

impl CardUpdate {
    /// Write the scheduling fields into `card`, leaving its content untouched.
    pub fn apply_to(&self, card: &mut Card) {
        card.state = self.state;
        card.stability = self.stability;
        card.difficulty = self.difficulty;
        card.reps = self.reps;
        card.lapses = self.lapses;
        card.scheduled_days = self.scheduled_days;
        card.elapsed_days = self.elapsed_days;
        card.last_review = Some(self.last_review);
        card.next_review = self.next_review;
    }
}
