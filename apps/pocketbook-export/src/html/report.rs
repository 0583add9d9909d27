//! Report renderer

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::io::{Cursor, Write};

use crate::annotations::{Book, Bookmark, Highlight, Note};
use crate::error::Result;

const STYLESHEET: &str = "body{font-family:Georgia,serif;max-width:48em;margin:2em auto;padding:0 1em;line-height:1.5}\
section.book{border-top:1px solid #ccc;margin-top:2em}\
p.authors{font-style:italic}\
p.file{color:#666;font-size:0.9em}\
blockquote{margin:0.25em 0 0.25em 1em;color:#444}\
li{margin-bottom:0.75em}\
img{max-width:100%}";

/// Render the books into a single HTML document.
///
/// Books without any annotation are left out.
pub fn render_report(books: &[Book], title: &str) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;
    writer.write_event(Event::Start(BytesStart::new("html")))?;

    writer.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "utf-8"));
    writer.write_event(Event::Empty(meta))?;
    write_simple_element(&mut writer, "title", title)?;
    writer.write_event(Event::Start(BytesStart::new("style")))?;
    writer.write_event(Event::Text(BytesText::from_escaped(STYLESHEET)))?;
    writer.write_event(Event::End(BytesEnd::new("style")))?;
    writer.write_event(Event::End(BytesEnd::new("head")))?;

    writer.write_event(Event::Start(BytesStart::new("body")))?;
    write_simple_element(&mut writer, "h1", title)?;

    for book in books.iter().filter(|book| !book.is_empty()) {
        write_book(&mut writer, book)?;
    }

    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("html")))?;

    let result = writer.into_inner().into_inner();
    Ok(String::from_utf8(result)?)
}

/// `data:` URI embedding an image; the MIME type is sniffed from the bytes.
pub fn image_data_uri(bytes: &[u8]) -> String {
    let mime = image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("image/jpeg");
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

fn write_book<W: Write>(writer: &mut Writer<W>, book: &Book) -> Result<()> {
    let mut section = BytesStart::new("section");
    section.push_attribute(("class", "book"));
    writer.write_event(Event::Start(section))?;

    write_simple_element(writer, "h2", &book.title)?;
    if let Some(ref authors) = book.authors {
        write_classed_element(writer, "p", "authors", authors)?;
    }
    if let Some(ref file_name) = book.file_name {
        write_classed_element(writer, "p", "file", file_name)?;
    }

    if !book.bookmarks.is_empty() {
        write_list(writer, "Bookmarks", "bookmarks", &book.bookmarks, write_bookmark)?;
    }
    if !book.highlights.is_empty() {
        write_list(writer, "Highlights", "highlights", &book.highlights, write_highlight)?;
    }
    if !book.notes.is_empty() {
        write_list(writer, "Notes", "notes", &book.notes, write_note)?;
    }

    writer.write_event(Event::End(BytesEnd::new("section")))?;
    Ok(())
}

fn write_list<W: Write, T>(
    writer: &mut Writer<W>,
    heading: &str,
    class: &str,
    items: &[T],
    write_item: fn(&mut Writer<W>, &T) -> Result<()>,
) -> Result<()> {
    write_simple_element(writer, "h3", heading)?;

    let mut list = BytesStart::new("ol");
    list.push_attribute(("class", class));
    writer.write_event(Event::Start(list))?;
    for item in items {
        write_item(writer, item)?;
    }
    writer.write_event(Event::End(BytesEnd::new("ol")))?;
    Ok(())
}

fn write_bookmark<W: Write>(writer: &mut Writer<W>, bookmark: &Bookmark) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("li")))?;
    write_classed_element(writer, "span", "page", &format!("Page {}", bookmark.page))?;
    writer.write_event(Event::Text(BytesText::new(" ")))?;
    write_classed_element(
        writer,
        "span",
        "created",
        &bookmark.created.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )?;
    if let Some(ref text) = bookmark.text {
        write_simple_element(writer, "blockquote", text)?;
    }
    writer.write_event(Event::End(BytesEnd::new("li")))?;
    Ok(())
}

fn write_highlight<W: Write>(writer: &mut Writer<W>, highlight: &Highlight) -> Result<()> {
    match (&highlight.snapshot, &highlight.text) {
        (Some(snapshot), text) => {
            writer.write_event(Event::Start(BytesStart::new("li")))?;
            let src = image_data_uri(snapshot);
            let mut img = BytesStart::new("img");
            img.push_attribute(("src", src.as_str()));
            if let Some(text) = text {
                img.push_attribute(("alt", text.as_str()));
            }
            writer.write_event(Event::Empty(img))?;
            writer.write_event(Event::End(BytesEnd::new("li")))?;
        }
        (None, Some(text)) => write_simple_element(writer, "li", text)?,
        (None, None) => {}
    }
    Ok(())
}

fn write_note<W: Write>(writer: &mut Writer<W>, note: &Note) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("li")))?;
    if let Some(ref quotation) = note.quotation {
        write_simple_element(writer, "blockquote", quotation)?;
    }
    write_simple_element(writer, "p", &note.note)?;
    writer.write_event(Event::End(BytesEnd::new("li")))?;
    Ok(())
}

fn write_simple_element<W: Write>(writer: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_classed_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    class: &str,
    value: &str,
) -> Result<()> {
    let mut elem = BytesStart::new(name);
    elem.push_attribute(("class", class));
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
