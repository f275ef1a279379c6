//! CLI commands and their execution.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use flashcard_scheduler::{
    deck_stats, retention_summary, Card, Deck, Fsrs, Rating, ReviewSession,
};

use crate::config::AppConfig;
use crate::store::{load_deck, save_deck};

/// Flashcard review from JSON deck files.
#[derive(Debug, Parser)]
#[command(name = "flashcard-review", about = "Spaced repetition review for JSON flashcard decks", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Create an empty deck file
    Init {
        /// Deck file to create
        path: PathBuf,
        /// Deck name
        name: String,
        /// Subject tag
        subject: String,
    },

    /// Append a new card to a deck
    Add {
        /// Deck file
        path: PathBuf,
        /// Prompt side
        front: String,
        /// Answer side
        back: String,
    },

    /// List the cards due now
    Due {
        /// Deck file
        path: PathBuf,
    },

    /// Show deck statistics
    Stats {
        /// Deck file
        path: PathBuf,
    },

    /// Rate the session's due cards in queue order, one rating each
    Review {
        /// Deck file
        path: PathBuf,
        /// Ratings: again, hard, good or easy
        #[arg(required = true, value_parser = Rating::from_str)]
        ratings: Vec<Rating>,
    },
}

/// Run `command` at time `now` and return the text to print.
pub fn execute(command: Command, config: &AppConfig, now: DateTime<Utc>) -> anyhow::Result<String> {
    let fsrs = Fsrs::new(config.scheduler.clone())?;

    match command {
        Command::Init {
            path,
            name,
            subject,
        } => {
            if path.exists() {
                bail!("deck file {} already exists", path.display());
            }
            let deck = Deck::new(name, subject, now);
            save_deck(&path, &deck)?;
            Ok(format!("created deck {} ({})", deck.name, deck.id))
        }
        Command::Add { path, front, back } => {
            let mut deck = load_deck(&path)?;
            let card = Card::new(front, back, now);
            let id = card.id.clone();
            deck.add_card(card);
            save_deck(&path, &deck)?;
            Ok(format!("added card {id} to {} ({} cards)", deck.name, deck.len()))
        }
        Command::Due { path } => {
            let deck = load_deck(&path)?;
            let session = ReviewSession::start_with_limits(&deck, now, config.limits);
            let mut out = format!("{} cards due in {}", session.queue().len(), deck.name);
            for &index in session.queue() {
                let card = &deck.cards[index];
                write!(out, "\n  [{}] {}: {}", card.state, card.id, card.front)?;
            }
            Ok(out)
        }
        Command::Stats { path } => {
            let deck = load_deck(&path)?;
            let stats = deck_stats(&deck, now);
            let summary = retention_summary(&deck, now, &fsrs);
            Ok(format!(
                "{name}: {total} cards, {new} new, {learning} learning, {review} review, {due} due\n\
                 reviewed {reviewed}, mastered {mastered}, avg stability {stability:.1}d, \
                 avg difficulty {difficulty:.2}, avg retention {retention:.0}%",
                name = deck.name,
                total = stats.total,
                new = stats.new_cards,
                learning = stats.learning,
                review = stats.review,
                due = stats.due_today,
                reviewed = summary.reviewed,
                mastered = summary.mastered,
                stability = summary.average_stability,
                difficulty = summary.average_difficulty,
                retention = summary.average_retention * 100.0,
            ))
        }
        Command::Review { path, ratings } => {
            let mut deck = load_deck(&path)?;
            let mut session = ReviewSession::start_with_limits(&deck, now, config.limits);
            if ratings.len() > session.queue().len() {
                bail!(
                    "{} ratings given but only {} cards are due",
                    ratings.len(),
                    session.queue().len()
                );
            }

            let mut out = String::new();
            for rating in ratings {
                let card = session
                    .rate_current_card(&mut deck, &fsrs, rating, now)
                    .with_context(|| format!("failed to rate card as {rating}"))?;
                writeln!(
                    out,
                    "{} -> {} ({}), next review in {} days",
                    card.front, rating, card.state, card.scheduled_days
                )?;
            }
            save_deck(&path, &deck)?;

            let (reviewed, queued) = session.progress();
            tracing::info!(deck = %deck.name, reviewed, queued, "review saved");
            write!(out, "reviewed {reviewed} of {queued} due cards")?;
            if session.is_complete() {
                out.push_str(", session complete");
            }
            Ok(out)
        }
    }
}
