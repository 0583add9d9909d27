//! Entity builders
//!
//! All three kinds share one shape: list the active items of the kind under
//! a book, fetch each item's tags, decode them into an [`Annotation`]. Items
//! that fail to decode are logged and dropped; the rest of the book is kept.

use tracing::{debug, warn};

use super::decode::{
    decode_bookmark_meta, decode_note_body, decode_quotation, decode_snapshot, SNAPSHOT_MARKER,
};
use super::types::{tag, Annotation, AnnotationKind, Bookmark, Highlight, Note, TagBag};
use crate::db::TagStore;
use crate::error::{DecodeError, Result};

impl AnnotationKind {
    /// Tag an item of this kind cannot be decoded without
    pub fn required_tag(self) -> Option<&'static str> {
        match self {
            AnnotationKind::Highlight => None,
            AnnotationKind::Note => Some(tag::NOTE),
            AnnotationKind::Bookmark => Some(tag::BOOK_MARK),
        }
    }
}

/// Builds annotations of one book from the tag store
pub struct AnnotationBuilder<'a> {
    store: TagStore<'a>,
}

impl<'a> AnnotationBuilder<'a> {
    pub fn new(store: TagStore<'a>) -> Self {
        Self { store }
    }

    /// Every decodable annotation of `kind` under `book_id`, in item order
    pub async fn build(&self, book_id: i64, kind: AnnotationKind) -> Result<Vec<Annotation>> {
        let item_ids = self.store.find_item_ids(book_id, kind.type_value()).await?;
        let mut annotations = Vec::with_capacity(item_ids.len());

        for item_id in item_ids {
            let tags = self.store.item_tags(item_id).await?;
            match decode_item(kind, tags) {
                Ok(Some(annotation)) => annotations.push(annotation),
                Ok(None) => {
                    debug!(book_id, item_id, %kind, "Skipping item without content");
                }
                Err(e) => {
                    warn!(book_id, item_id, %kind, error = %e, "Dropping undecodable annotation");
                }
            }
        }

        Ok(annotations)
    }
}

/// Decode the tags of one item of the given kind.
///
/// `Ok(None)` means the item is well-formed but has nothing to show.
pub fn decode_item(
    kind: AnnotationKind,
    mut tags: TagBag,
) -> std::result::Result<Option<Annotation>, DecodeError> {
    if let Some(required) = kind.required_tag() {
        if tags.get(required).is_none() {
            return Err(DecodeError::MissingTag(required));
        }
    }

    match kind {
        AnnotationKind::Highlight => Ok(decode_highlight(&mut tags)?.map(Annotation::Highlight)),
        AnnotationKind::Note => Ok(Some(Annotation::Note(decode_note(&tags)?))),
        AnnotationKind::Bookmark => Ok(Some(Annotation::Bookmark(decode_bookmark(&tags)?))),
    }
}

fn decode_highlight(tags: &mut TagBag) -> std::result::Result<Option<Highlight>, DecodeError> {
    let text = decode_quotation(tags.get(tag::QUOTATION))?;
    let snapshot = decode_snapshot(tags.take(tag::IMAGE));

    let highlight = match (text, snapshot) {
        // Older firmware: the quotation only marks that the content is an image.
        (Some(text), snapshot) if text == SNAPSHOT_MARKER => snapshot.map(|image| Highlight {
            text: None,
            snapshot: Some(image),
        }),
        (None, None) => None,
        (text, snapshot) => Some(Highlight { text, snapshot }),
    };

    Ok(highlight)
}

fn decode_note(tags: &TagBag) -> std::result::Result<Note, DecodeError> {
    let body = tags.get(tag::NOTE).ok_or(DecodeError::MissingTag(tag::NOTE))?;

    Ok(Note {
        quotation: decode_quotation(tags.get(tag::QUOTATION))?,
        note: decode_note_body(body)?,
    })
}

fn decode_bookmark(tags: &TagBag) -> std::result::Result<Bookmark, DecodeError> {
    let meta = tags
        .get(tag::BOOK_MARK)
        .ok_or(DecodeError::MissingTag(tag::BOOK_MARK))?;
    let (created, page) = decode_bookmark_meta(meta)?;

    Ok(Bookmark {
        page,
        text: decode_quotation(tags.get(tag::QUOTATION))?,
        created,
    })
}
