//! Annotation extraction
//!
//! Turns tag-based items into typed highlights, notes and bookmarks:
//!
//! - `types`: the typed artifacts and the raw tag bag
//! - `decode`: pure decoders for JSON, anchor URI and timestamp values
//! - `builder`: per-kind lookup, decode and construction

mod builder;
mod decode;
mod types;

pub use builder::{decode_item, AnnotationBuilder};
pub use decode::{
    decode_bookmark_meta, decode_note_body, decode_quotation, decode_snapshot, decode_timestamp,
    page_from_anchor, SNAPSHOT_MARKER,
};
pub use types::{
    tag, Annotation, AnnotationKind, Book, Bookmark, Highlight, Note, TagBag, TagValue,
};
