//! Paragraph extraction from .docx documents.
//!
//! Fiches are Word documents, and the fiche format is line-oriented: blank
//! paragraphs separate fields and continuation lines extend them. So unlike a
//! plain-text dump, this reader keeps one string per `<w:p>` element and
//! preserves empty paragraphs.

use std::io::Read;

/// Maximum decompressed bytes read from word/document.xml (zip-bomb guard).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug)]
pub enum DocxError {
    Archive(String),
    Xml(String),
    MissingDocument,
    EntryTooLarge,
}

impl std::fmt::Display for DocxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocxError::Archive(e) => write!(f, "not a readable docx archive: {}", e),
            DocxError::Xml(e) => write!(f, "malformed document XML: {}", e),
            DocxError::MissingDocument => write!(f, "word/document.xml not found"),
            DocxError::EntryTooLarge => write!(f, "word/document.xml exceeds size limit"),
        }
    }
}

impl std::error::Error for DocxError {}

/// Returns the document's paragraphs in order, one string per `<w:p>`.
pub fn paragraphs(bytes: &[u8]) -> Result<Vec<String>, DocxError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| DocxError::Archive(e.to_string()))?;
    let mut doc_xml = Vec::new();
    let mut found = false;
    for i in 0..archive.len() {
        let entry = archive
            .by_index(i)
            .map_err(|e| DocxError::Archive(e.to_string()))?;
        if entry.name() == "word/document.xml" {
            entry
                .take(MAX_XML_ENTRY_BYTES)
                .read_to_end(&mut doc_xml)
                .map_err(|e| DocxError::Archive(e.to_string()))?;
            if doc_xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
                return Err(DocxError::EntryTooLarge);
            }
            found = true;
            break;
        }
    }
    if !found {
        return Err(DocxError::MissingDocument);
    }
    collect_paragraphs(&doc_xml)
}

fn collect_paragraphs(xml: &[u8]) -> Result<Vec<String>, DocxError> {
    let mut out = Vec::new();
    // The reader is left untrimmed: spacing inside a <w:t> run is content,
    // and text outside <w:t> is never captured anyway.
    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    // Some while inside a <w:p> element.
    let mut current: Option<String> = None;
    let mut in_text = false;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => current = Some(String::new()),
                b"t" if current.is_some() => in_text = true,
                _ => {}
            },
            Ok(quick_xml::events::Event::Empty(e)) => match e.local_name().as_ref() {
                // A self-closing <w:p/> is an intentionally blank line.
                b"p" => out.push(String::new()),
                b"br" => {
                    if let Some(p) = current.as_mut() {
                        p.push('\n');
                    }
                }
                b"tab" => {
                    if let Some(p) = current.as_mut() {
                        p.push('\t');
                    }
                }
                _ => {}
            },
            Ok(quick_xml::events::Event::Text(te)) if in_text => {
                if let Some(p) = current.as_mut() {
                    p.push_str(te.unescape().unwrap_or_default().as_ref());
                }
            }
            Ok(quick_xml::events::Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push(current.take().unwrap_or_default()),
                _ => {}
            },
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(DocxError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}
