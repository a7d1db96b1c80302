//! `stats` command.

use crate::config::Config;
use crate::db::SqliteStore;
use anyhow::Context;

/// Handle `pleco-import stats`.
pub fn run_stats(config: &Config, deck: &str, json: bool) -> anyhow::Result<()> {
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("opening collection {}", config.db_path.display()))?;
    let stats = store.deck_stats(deck)?;

    if json {
        return super::print_json(&stats);
    }
    println!("Deck '{}'", stats.deck);
    println!("  notes:     {:>5}", stats.notes);
    println!("  cards:     {:>5}", stats.cards);
    println!("  new cards: {:>5}", stats.new_cards);
    Ok(())
}
