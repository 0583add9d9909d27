//! Book aggregator

use sqlx::SqlitePool;
use tracing::debug;

use crate::annotations::{AnnotationBuilder, AnnotationKind, Book};
use crate::db::{BookRepository, BookRow, TagStore};
use crate::error::Result;

/// Load every book with its annotations, in storage order.
///
/// Any store error aborts the whole load; undecodable items are dropped
/// inside the builders.
pub async fn load_library(pool: &SqlitePool) -> Result<Vec<Book>> {
    let repo = BookRepository::new(pool);
    let builder = AnnotationBuilder::new(TagStore::new(pool));

    let rows = repo.list().await?;
    let mut books = Vec::with_capacity(rows.len());
    for row in rows {
        books.push(load_book(&repo, &builder, row).await?);
    }

    Ok(books)
}

/// Populate a single book row
pub async fn load_book(
    repo: &BookRepository<'_>,
    builder: &AnnotationBuilder<'_>,
    row: BookRow,
) -> Result<Book> {
    let authors = row.authors.filter(|a| !a.trim().is_empty());
    let mut book = Book::new(row.oid, row.title.unwrap_or_default(), authors);
    book.file_name = repo.file_name(book.id).await?;

    for kind in AnnotationKind::ALL {
        for annotation in builder.build(book.id, kind).await? {
            book.attach(annotation);
        }
    }

    debug!(
        book_id = book.id,
        title = %book.title,
        highlights = book.highlights.len(),
        notes = book.notes.len(),
        bookmarks = book.bookmarks.len(),
        "Loaded book"
    );

    Ok(book)
}
