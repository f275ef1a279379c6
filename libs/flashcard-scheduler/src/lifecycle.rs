//! Card lifecycle: state transitions and the due predicate.
//!
//! ```text
//! new ──any──▶ learning
//! learning | relearning | review ──again──▶ relearning
//! learning | relearning | review ──hard/good/easy──▶ review
//! ```

use chrono::{DateTime, Utc};

use crate::algorithm::fsrs::Fsrs;
use crate::error::Result;
use crate::types::{Card, CardState, Rating};

/// State a card moves to when `rating` is applied in state `current`.
pub fn next_state(current: CardState, rating: Rating) -> CardState {
    match (current, rating) {
        (CardState::New, _) => CardState::Learning,
        (CardState::Learning | CardState::Review | CardState::Relearning, Rating::Again) => {
            CardState::Relearning
        }
        (CardState::Learning | CardState::Review | CardState::Relearning, _) => CardState::Review,
    }
}

/// A card is due when it has never been rated or its review time has arrived.
pub fn is_due(card: &Card, now: DateTime<Utc>) -> bool {
    card.state == CardState::New || card.next_review <= now
}

/// Rate `card` at `now` and return the updated copy.
///
/// The input card is left untouched; on error nothing changes.
pub fn apply_rating(fsrs: &Fsrs, card: &Card, rating: Rating, now: DateTime<Utc>) -> Result<Card> {
    let update = fsrs.schedule(card, rating, now)?;
    let mut rated = card.clone();
    update.apply_to(&mut rated);
    Ok(rated)
}
