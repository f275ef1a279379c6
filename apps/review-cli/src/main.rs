use clap::Parser;
use flashcard_review_cli::commands::Cli;

fn main() -> anyhow::Result<()> {
    flashcard_review_cli::run(Cli::parse())
}
