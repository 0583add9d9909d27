//! Decoders for raw tag values
//!
//! Quotations, notes and bookmark metadata are stored as small JSON objects;
//! bookmark positions are URIs whose query string carries the page number;
//! snapshots are raw image bytes.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::form_urlencoded;

use super::types::TagValue;
use crate::error::DecodeError;

type Result<T> = std::result::Result<T, DecodeError>;

/// Quotation text used by older firmware to mark an image-only highlight
pub const SNAPSHOT_MARKER: &str = "Snapshot";

#[derive(Debug, Deserialize)]
struct TextPayload {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BookmarkPayload {
    created: i64,
    anchor: String,
}

fn parse_json<'a, T: Deserialize<'a>>(raw: &'a TagValue) -> Result<T> {
    Ok(serde_json::from_str(raw.as_str()?)?)
}

/// Decode a `bm.quotation` value into its quoted text.
///
/// An absent tag yields `None`; a present but malformed one is an error.
pub fn decode_quotation(raw: Option<&TagValue>) -> Result<Option<String>> {
    match raw {
        Some(raw) => Ok(parse_json::<TextPayload>(raw)?.text),
        None => Ok(None),
    }
}

/// Decode a `bm.note` value; the `text` field is required.
pub fn decode_note_body(raw: &TagValue) -> Result<String> {
    parse_json::<TextPayload>(raw)?
        .text
        .ok_or(DecodeError::MissingField("text"))
}

/// Decode a `bm.book_mark` value into its creation time and page number.
pub fn decode_bookmark_meta(raw: &TagValue) -> Result<(DateTime<Utc>, u32)> {
    let payload: BookmarkPayload = parse_json(raw)?;
    let created = decode_timestamp(payload.created)?;
    let page = page_from_anchor(&payload.anchor)?;
    Ok((created, page))
}

/// Convert epoch seconds to a UTC timestamp
pub fn decode_timestamp(seconds: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0).ok_or(DecodeError::InvalidTimestamp(seconds))
}

/// Extract the first `page` query parameter of an anchor URI.
///
/// Anchors look like `pbr:/word?page=42&offs=118`; other parameters and
/// their order are irrelevant.
pub fn page_from_anchor(anchor: &str) -> Result<u32> {
    let query = anchor
        .split_once('?')
        .map(|(_, query)| query)
        .unwrap_or_default();
    let query = query.split('#').next().unwrap_or_default();

    let page = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| DecodeError::MissingPage(anchor.to_string()))?;

    page.trim()
        .parse::<u32>()
        .map_err(|_| DecodeError::InvalidPage(page))
}

/// Snapshot bytes of a `bm.image` value; empty blobs count as absent.
pub fn decode_snapshot(raw: Option<TagValue>) -> Option<Vec<u8>> {
    raw.map(TagValue::into_bytes).filter(|bytes| !bytes.is_empty())
}
