//! Spaced repetition engine for the flashcard study tool.
//!
//! Provides:
//! - FSRS scheduler mapping (card memory state, rating) to the next review
//! - Card lifecycle (new -> learning/relearning -> review) and due predicate
//! - Review sessions that walk a deck's due cards one at a time
//! - Deck statistics
//!
//! The engine never reads the clock: every operation takes `now` explicitly.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod session;
pub mod stats;
pub mod types;

pub use algorithm::fsrs::Fsrs;
pub use algorithm::CardUpdate;
pub use config::{SchedulerConfig, SessionLimits};
pub use error::{Result, SchedulerError};
pub use lifecycle::{apply_rating, is_due, next_state};
pub use session::ReviewSession;
pub use stats::{deck_stats, retention_summary, DeckStats, RetentionSummary};
pub use types::{Card, CardState, Deck, Rating};
