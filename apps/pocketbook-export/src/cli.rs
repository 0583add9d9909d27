//! Command line arguments

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use pocketbook_export::Config;

/// Filter used when neither flags nor `RUST_LOG` say otherwise
pub const DEFAULT_FILTER: &str = "pocketbook_export=info";

#[derive(Debug, Parser)]
#[command(
    name = "pocketbook-export",
    version,
    about = "Export PocketBook highlights, notes and bookmarks to a single HTML file"
)]
pub struct Cli {
    /// Path to the reader's annotation database (books.db)
    #[arg(value_name = "DATABASE")]
    pub database: PathBuf,

    /// Where to write the report (default: export.html)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report title
    #[arg(short, long, value_name = "TEXT")]
    pub title: Option<String>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Apply command line overrides on top of `base`
    pub fn into_config(self, base: Config) -> Config {
        let mut config = base.with_database(self.database);
        if let Some(output) = self.output {
            config = config.with_output(output);
        }
        if let Some(title) = self.title {
            config = config.with_title(title);
        }
        config
    }

    /// Log filter requested on the command line, if any
    pub fn log_directive(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("pocketbook_export=error");
        }
        match self.verbose {
            0 => None,
            1 => Some("pocketbook_export=debug"),
            _ => Some("pocketbook_export=trace,sqlx=debug"),
        }
    }
}
