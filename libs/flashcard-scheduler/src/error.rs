//! Error types for flashcard-scheduler.

use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors raised by the scheduler, the card lifecycle and review sessions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    #[error("invalid rating: {value}")]
    InvalidRating { value: String },

    #[error("session has no current card")]
    NoCurrentCard,

    #[error("corrupt card {id}: {reason}")]
    CorruptCard { id: String, reason: String },

    #[error("invalid scheduler config: {0}")]
    InvalidConfig(String),

    #[error("session belongs to deck {expected}, got deck {found}")]
    DeckMismatch { expected: String, found: String },

    #[error("queued card at index {index} is no longer in the deck")]
    CardMissing { index: usize },
}
