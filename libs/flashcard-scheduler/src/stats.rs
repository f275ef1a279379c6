//! Deck statistics, recomputed on demand from the deck's cards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::fsrs::Fsrs;
use crate::lifecycle::is_due;
use crate::types::{CardState, Deck};

/// Stability (in days) above which a card counts as mastered.
pub const MASTERED_STABILITY_DAYS: f64 = 30.0;

/// Card counts by lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub new_cards: usize,
    /// Learning and relearning cards.
    pub learning: usize,
    pub review: usize,
    pub due_today: usize,
    pub total: usize,
}

/// Memory-model aggregates over the cards that have been reviewed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionSummary {
    pub reviewed: usize,
    pub mastered: usize,
    pub average_stability: f64,
    pub average_difficulty: f64,
    pub average_retention: f64,
}

pub fn deck_stats(deck: &Deck, now: DateTime<Utc>) -> DeckStats {
    deck.cards.iter().fold(DeckStats::default(), |mut stats, card| {
        match card.state {
            CardState::New => stats.new_cards += 1,
            CardState::Learning | CardState::Relearning => stats.learning += 1,
            CardState::Review => stats.review += 1,
        }
        if is_due(card, now) {
            stats.due_today += 1;
        }
        stats.total += 1;
        stats
    })
}

pub fn retention_summary(deck: &Deck, now: DateTime<Utc>, fsrs: &Fsrs) -> RetentionSummary {
    let reviewed: Vec<_> = deck.cards.iter().filter(|card| !card.is_new()).collect();
    if reviewed.is_empty() {
        return RetentionSummary::default();
    }

    let count = reviewed.len() as f64;
    let (stability, difficulty, retention) =
        reviewed
            .iter()
            .fold((0.0, 0.0, 0.0), |(s, d, r), card| {
                (
                    s + card.stability,
                    d + card.difficulty,
                    r + fsrs.predict_retention(card, now),
                )
            });

    RetentionSummary {
        reviewed: reviewed.len(),
        mastered: reviewed
            .iter()
            .filter(|card| card.stability > MASTERED_STABILITY_DAYS)
            .count(),
        average_stability: stability / count,
        average_difficulty: difficulty / count,
        average_retention: retention / count,
    }
}
