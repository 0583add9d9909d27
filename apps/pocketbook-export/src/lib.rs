//! PocketBook annotation exporter
//!
//! Reads the reader's tag-based annotation database and writes every
//! highlight, note and bookmark into one self-contained HTML report.
//!
//! # Modules
//!
//! - `db`: read-only access to the `Items`/`Tags`/`TagNames` store
//! - `annotations`: decoding tag values into typed annotations
//! - `library`: per-book aggregation
//! - `html`: report rendering

pub mod annotations;
pub mod config;
pub mod db;
pub mod error;
pub mod html;
pub mod library;

#[cfg(test)]
mod testing;

use std::fmt;
use std::path::PathBuf;

use tracing::info;

pub use annotations::{Book, Bookmark, Highlight, Note};
pub use config::Config;
pub use error::{DecodeError, ExportError, Result};

/// Counts describing a finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Books found in the database
    pub books: usize,
    /// Books that made it into the report
    pub rendered_books: usize,
    pub highlights: usize,
    pub notes: usize,
    pub bookmarks: usize,
    pub output: PathBuf,
}

impl ExportSummary {
    pub fn from_books(books: &[Book], output: PathBuf) -> Self {
        Self {
            books: books.len(),
            rendered_books: books.iter().filter(|b| !b.is_empty()).count(),
            highlights: books.iter().map(|b| b.highlights.len()).sum(),
            notes: books.iter().map(|b| b.notes.len()).sum(),
            bookmarks: books.iter().map(|b| b.bookmarks.len()).sum(),
            output,
        }
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exported {} highlights, {} notes and {} bookmarks from {} of {} books to {}",
            self.highlights,
            self.notes,
            self.bookmarks,
            self.rendered_books,
            self.books,
            self.output.display()
        )
    }
}

/// Run one export: open the database, load every book, render the report
/// and write it to the configured output path.
///
/// The report is rendered completely before the output file is touched.
pub async fn export(config: &Config) -> Result<ExportSummary> {
    info!(database = %config.database.path.display(), "Opening annotation database");
    let pool = db::open(&config.database.path).await?;

    let books = library::load_library(&pool).await;
    pool.close().await;
    let books = books?;

    let html = html::render_report(&books, &config.output.title)?;
    tokio::fs::write(&config.output.path, html).await?;

    let summary = ExportSummary::from_books(&books, config.output.path.clone());
    info!(
        books = summary.books,
        rendered_books = summary.rendered_books,
        highlights = summary.highlights,
        notes = summary.notes,
        bookmarks = summary.bookmarks,
        output = %summary.output.display(),
        "Export complete"
    );

    Ok(summary)
}
