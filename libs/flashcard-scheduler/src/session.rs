//! Review sessions over a deck's due cards.
//!
//! A session never holds cards. It queues indices into the deck's card list
//! and borrows the deck for each operation, so the deck stays the single owner
//! of every card. One deck must have at most one session rating it at a time.

use chrono::{DateTime, Utc};

use crate::algorithm::fsrs::Fsrs;
use crate::config::SessionLimits;
use crate::error::{Result, SchedulerError};
use crate::lifecycle::{apply_rating, is_due};
use crate::types::{Card, Deck, Rating};

/// Ordered queue of due cards for one deck, with a cursor into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    deck_id: String,
    queue: Vec<usize>,
    cursor: usize,
    reviewed: usize,
}

impl ReviewSession {
    /// Queue every card of `deck` that is due at `now`, in deck order.
    ///
    /// An empty queue is valid; the session is then already complete.
    pub fn start(deck: &Deck, now: DateTime<Utc>) -> Self {
        Self::start_with_limits(deck, now, SessionLimits::unlimited())
    }

    /// Like [`ReviewSession::start`], but stops queueing new cards and
    /// reviewed cards once their respective limits are reached.
    pub fn start_with_limits(deck: &Deck, now: DateTime<Utc>, limits: SessionLimits) -> Self {
        let mut new_queued = 0usize;
        let mut reviews_queued = 0usize;
        let mut queue = Vec::new();

        for (index, card) in deck.cards.iter().enumerate() {
            if !is_due(card, now) {
                continue;
            }
            let (queued, limit) = if card.is_new() {
                (&mut new_queued, limits.new_cards)
            } else {
                (&mut reviews_queued, limits.reviews)
            };
            if limit.is_some_and(|limit| *queued >= limit) {
                continue;
            }
            *queued += 1;
            queue.push(index);
        }

        tracing::debug!(
            deck_id = %deck.id,
            queued = queue.len(),
            new_queued,
            reviews_queued,
            "started review session"
        );

        Self {
            deck_id: deck.id.clone(),
            queue,
            cursor: 0,
            reviewed: 0,
        }
    }

    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    /// Deck indices of the queued cards, in presentation order.
    pub fn queue(&self) -> &[usize] {
        &self.queue
    }

    /// Deck index of the card being presented.
    pub fn current_index(&self) -> Option<usize> {
        self.queue.get(self.cursor).copied()
    }

    pub fn current_card<'a>(&self, deck: &'a Deck) -> Option<&'a Card> {
        if deck.id != self.deck_id {
            return None;
        }
        self.current_index().and_then(|index| deck.card(index))
    }

    /// Rate the current card, store the result in `deck`, and advance.
    ///
    /// On error neither the deck nor the session changes.
    pub fn rate_current_card(
        &mut self,
        deck: &mut Deck,
        fsrs: &Fsrs,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Result<Card> {
        let index = self.current_index().ok_or(SchedulerError::NoCurrentCard)?;
        if deck.id != self.deck_id {
            return Err(SchedulerError::DeckMismatch {
                expected: self.deck_id.clone(),
                found: deck.id.clone(),
            });
        }
        let slot = deck
            .cards
            .get_mut(index)
            .ok_or(SchedulerError::CardMissing { index })?;

        let rated = apply_rating(fsrs, slot, rating, now)?;
        *slot = rated.clone();
        deck.last_studied = Some(now);

        self.reviewed += 1;
        self.cursor += 1;

        tracing::debug!(
            deck_id = %self.deck_id,
            card_id = %rated.id,
            %rating,
            reviewed = self.reviewed,
            remaining = self.remaining(),
            "rated card"
        );

        Ok(rated)
    }

    /// True once the cursor has moved past the last queued card.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.queue.len()
    }

    pub fn reviewed(&self) -> usize {
        self.reviewed
    }

    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.cursor)
    }

    /// (cards reviewed, cards queued)
    pub fn progress(&self) -> (usize, usize) {
        (self.reviewed, self.queue.len())
    }
}
