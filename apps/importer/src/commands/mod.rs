//! Command handlers behind the CLI subcommands.

pub mod import;
pub mod stats;

pub use import::{import_export, run_import};
pub use stats::run_stats;

use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
