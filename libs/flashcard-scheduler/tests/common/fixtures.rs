//! Factory functions for cards and decks.

use chrono::Duration;
use flashcard_scheduler::{Card, CardState, Deck};

use super::now;

/// A never-reviewed card.
pub fn new_card(front: &str) -> Card {
    Card::new(front, format!("answer to {front}"), now())
}

/// A reviewed card whose next review is `due_in_days` from `now()`.
///
/// Negative values give an overdue card.
pub fn review_card(front: &str, stability: f64, difficulty: f64, due_in_days: i64) -> Card {
    Card {
        state: CardState::Review,
        stability,
        difficulty,
        elapsed_days: 0,
        scheduled_days: stability.round().max(1.0) as u32,
        reps: 3,
        lapses: 0,
        last_review: Some(now() - Duration::days(3)),
        next_review: now() + Duration::days(due_in_days),
        ..new_card(front)
    }
}

/// A card in the given non-new state, due `due_in_days` from `now()`.
pub fn card_in_state(front: &str, state: CardState, due_in_days: i64) -> Card {
    Card {
        state,
        ..review_card(front, 2.0, 5.0, due_in_days)
    }
}

/// Build a deck from cards, keeping their order.
pub fn deck_with(cards: Vec<Card>) -> Deck {
    let mut deck = Deck::new("Test deck", "mathematics", now() - Duration::days(60));
    for card in cards {
        deck.add_card(card);
    }
    deck
}

/// Deck of 5 cards: 2 new, 1 overdue, 2 scheduled in the future.
pub fn five_card_deck() -> Deck {
    deck_with(vec![
        new_card("derivative of x^2"),
        review_card("integral of 1/x", 8.0, 5.0, 4),
        review_card("pythagoras", 5.0, 4.0, -2),
        new_card("euler identity"),
        review_card("quadratic formula", 20.0, 3.0, 12),
    ])
}
