//! Deck files: one JSON document per deck.

use std::fs;
use std::path::Path;

use anyhow::Context;
use flashcard_scheduler::Deck;

pub fn load_deck(path: &Path) -> anyhow::Result<Deck> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read deck file {}", path.display()))?;
    let deck: Deck = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse deck file {}", path.display()))?;
    tracing::debug!(path = %path.display(), cards = deck.len(), "loaded deck");
    Ok(deck)
}

/// Write the deck through a sibling temp file so a failed write never leaves
/// a truncated deck behind.
pub fn save_deck(path: &Path, deck: &Deck) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(deck).context("failed to serialize deck")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)
        .with_context(|| format!("failed to write deck file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace deck file {}", path.display()))?;
    tracing::debug!(path = %path.display(), cards = deck.len(), "saved deck");
    Ok(())
}
