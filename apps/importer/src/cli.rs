use clap::{Args, Parser, Subcommand, ValueEnum};
use pleco_core::{ExportFormat, ImportConfig, ParseOptions, ScriptPreference};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "pleco-import",
    version,
    about = "Import Pleco flashcard exports into a local note collection"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Collection database (overrides PLECO_DB_PATH)")]
    pub db: Option<PathBuf>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(short, long, global = true, help = "Log every card")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import an XML or tab-delimited text export into a deck.
    Import(ImportArgs),
    /// Show note and card counts of a deck.
    Stats {
        #[arg(long)]
        deck: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    pub file: PathBuf,
    #[arg(long, help = "Deck to import into")]
    pub deck: String,
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,
    #[arg(long, help = "Overwrite existing notes with the same headword")]
    pub overwrite: bool,
    #[arg(long, help = "Reset scheduling of overwritten notes to new")]
    pub set_new: bool,
    #[arg(long, help = "Also create reversed cards")]
    pub reverse: bool,
    #[arg(long, value_enum, default_value_t = ScriptArg::First)]
    pub script: ScriptArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Auto,
    Xml,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptArg {
    First,
    Simplified,
    Traditional,
}

impl ImportArgs {
    pub fn export_format(&self) -> pleco_core::Result<ExportFormat> {
        match self.format {
            FormatArg::Auto => ExportFormat::from_path(Path::new(&self.file)),
            FormatArg::Xml => Ok(ExportFormat::Xml),
            FormatArg::Text => Ok(ExportFormat::DelimitedText),
        }
    }

    pub fn import_config(&self) -> ImportConfig {
        ImportConfig {
            overwrite: self.overwrite,
            set_new: self.set_new,
            reverse: self.reverse,
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            script: match self.script {
                ScriptArg::First => ScriptPreference::FirstListed,
                ScriptArg::Simplified => ScriptPreference::Simplified,
                ScriptArg::Traditional => ScriptPreference::Traditional,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import_args(args: &[&str]) -> ImportArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Import(args) => args,
            Commands::Stats { .. } => panic!("expected import"),
        }
    }

    #[test]
    fn import_defaults() {
        let args = import_args(&["pleco-import", "import", "flash.xml", "--deck", "Chinese"]);
        assert_eq!(args.export_format().unwrap(), ExportFormat::Xml);
        assert_eq!(args.import_config(), ImportConfig::default());
        assert_eq!(args.parse_options(), ParseOptions::default());
    }

    #[test]
    fn import_flags_map_to_config() {
        let args = import_args(&[
            "pleco-import",
            "import",
            "flash.dat",
            "--deck",
            "Chinese",
            "--format",
            "text",
            "--overwrite",
            "--set-new",
            "--reverse",
            "--script",
            "traditional",
        ]);
        assert_eq!(args.export_format().unwrap(), ExportFormat::DelimitedText);
        assert_eq!(
            args.import_config(),
            ImportConfig {
                overwrite: true,
                set_new: true,
                reverse: true,
            }
        );
        assert_eq!(args.parse_options().script, ScriptPreference::Traditional);
    }

    #[test]
    fn auto_format_needs_known_extension() {
        let args = import_args(&["pleco-import", "import", "flash.dat", "--deck", "Chinese"]);
        assert!(args.export_format().is_err());
    }

    #[test]
    fn deck_is_required() {
        assert!(Cli::try_parse_from(["pleco-import", "import", "flash.xml"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pleco-import", "stats", "--deck", "Chinese", "--json", "--db", "x.db"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
    }
}
