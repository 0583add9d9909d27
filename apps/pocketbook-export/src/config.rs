//! Configuration management for the exporter

use std::env;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "export.html";
pub const DEFAULT_TITLE: &str = "PocketBook Annotations";

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the reader's annotation database (`books.db`)
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Report destination; an existing file is overwritten
    pub path: PathBuf,
    /// Document title and top-level heading of the report
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database: DatabaseConfig {
                path: PathBuf::new(),
            },
            output: OutputConfig {
                path: PathBuf::from(DEFAULT_OUTPUT),
                title: DEFAULT_TITLE.to_string(),
            },
        }
    }
}

impl Config {
    /// Defaults overlaid with `POCKETBOOK_EXPORT_*` environment variables.
    pub fn from_env() -> Self {
        Config {
            database: DatabaseConfig {
                path: PathBuf::new(),
            },
            output: OutputConfig {
                path: env::var("POCKETBOOK_EXPORT_OUTPUT")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT)),
                title: env::var("POCKETBOOK_EXPORT_TITLE")
                    .unwrap_or_else(|_| DEFAULT_TITLE.to_string()),
            },
        }
    }

    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database.path = path.into();
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.path = path.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.output.title = title.into();
        self
    }
}
