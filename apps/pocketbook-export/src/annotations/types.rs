//! Typed reading artifacts reconstructed from the tag store

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Tag names consumed by the exporter
pub mod tag {
    pub const TYPE: &str = "bm.type";
    pub const QUOTATION: &str = "bm.quotation";
    pub const NOTE: &str = "bm.note";
    pub const BOOK_MARK: &str = "bm.book_mark";
    pub const IMAGE: &str = "bm.image";
}

/// A book together with its annotations
#[derive(Debug, Clone)]
pub struct Book {
    /// `Books.OID` of the source row
    pub id: i64,
    pub title: String,
    pub authors: Option<String>,
    /// File backing the book on the device, if any
    pub file_name: Option<String>,
    pub highlights: Vec<Highlight>,
    pub notes: Vec<Note>,
    pub bookmarks: Vec<Bookmark>,
}

impl Book {
    pub fn new(id: i64, title: String, authors: Option<String>) -> Self {
        Self {
            id,
            title,
            authors,
            file_name: None,
            highlights: Vec::new(),
            notes: Vec::new(),
            bookmarks: Vec::new(),
        }
    }

    /// Append an annotation to the collection matching its kind
    pub fn attach(&mut self, annotation: Annotation) {
        match annotation {
            Annotation::Highlight(h) => self.highlights.push(h),
            Annotation::Note(n) => self.notes.push(n),
            Annotation::Bookmark(b) => self.bookmarks.push(b),
        }
    }

    /// True when the book has no highlights, notes or bookmarks
    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty() && self.notes.is_empty() && self.bookmarks.is_empty()
    }
}

/// A highlighted passage, an image snapshot, or both
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub text: Option<String>,
    /// Raw image bytes, embedded inline when rendered
    pub snapshot: Option<Vec<u8>>,
}

/// A user-authored note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// The passage the note refers to
    pub quotation: Option<String>,
    pub note: String,
}

/// A bookmarked page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub page: u32,
    pub text: Option<String>,
    pub created: DateTime<Utc>,
}

/// Kinds of annotation items, keyed by their `bm.type` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Highlight,
    Note,
    Bookmark,
}

impl AnnotationKind {
    /// Every kind, in the order builders run
    pub const ALL: [AnnotationKind; 3] = [
        AnnotationKind::Highlight,
        AnnotationKind::Note,
        AnnotationKind::Bookmark,
    ];

    /// Value of the `bm.type` tag identifying this kind
    pub fn type_value(self) -> &'static str {
        match self {
            AnnotationKind::Highlight => "highlight",
            AnnotationKind::Note => "note",
            AnnotationKind::Bookmark => "bookmark",
        }
    }
}

impl std::fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_value())
    }
}

/// One decoded annotation of any kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Highlight(Highlight),
    Note(Note),
    Bookmark(Bookmark),
}

/// Raw value of a tag as stored, before any decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagValue(pub Vec<u8>);

impl TagValue {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> std::result::Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.0)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for TagValue {
    fn from(bytes: Vec<u8>) -> Self {
        TagValue(bytes)
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue(s.as_bytes().to_vec())
    }
}

/// All tags attached to one item, by tag name
///
/// When a tag name occurs more than once the first value wins.
#[derive(Debug, Clone, Default)]
pub struct TagBag {
    values: BTreeMap<String, TagValue>,
}

impl TagBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value unless the tag already has one
    pub fn insert(&mut self, name: impl Into<String>, value: TagValue) {
        self.values.entry(name.into()).or_insert(value);
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.values.get(name)
    }

    pub fn take(&mut self, name: &str) -> Option<TagValue> {
        self.values.remove(name)
    }
}
