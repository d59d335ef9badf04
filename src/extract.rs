//! Fiche extraction: turning a paragraph sequence into a typed [`Plant`].
//!
//! A fiche is a line-oriented document. One paragraph declares the kind
//! (`Type: Plante brute`), the rest are `Label: value` lines, continuation
//! text for the field opened above, or blank separators. Extraction runs two
//! passes over the paragraphs: first find the kind, which selects the label
//! dictionary, then segment the document into fields with that dictionary.

use std::collections::HashMap;
use std::path::Path;

use crate::docx;
use crate::labels;
use crate::models::{Plant, PlantKind};

#[derive(Debug)]
pub enum ExtractError {
    /// The file could not be read or parsed at all.
    DocumentUnreadable(String),
    /// No `Type:` paragraph resolved to a known kind.
    TypeUnresolved,
    /// The fiche has no non-empty common name, so the record is unusable.
    NameMissing,
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::DocumentUnreadable(e) => write!(f, "unreadable document: {}", e),
            ExtractError::TypeUnresolved => write!(f, "no recognizable Type declaration"),
            ExtractError::NameMissing => write!(f, "missing or empty Nom commun field"),
        }
    }
}

impl std::error::Error for ExtractError {}

/// A successfully extracted record plus anything worth telling the operator:
/// text that was silently dropped, or labels the dictionaries know but the
/// record's kind does not carry.
#[derive(Debug)]
pub struct Extraction {
    pub plant: Plant,
    pub warnings: Vec<String>,
}

/// Extracts a fiche from a document on disk. `.docx` goes through the Word
/// reader; `.txt` and `.md` are treated as one paragraph per line.
pub fn from_file(path: &Path) -> Result<Extraction, ExtractError> {
    let paragraphs = read_document(path)?;
    from_paragraphs(&paragraphs)
}

fn read_document(path: &Path) -> Result<Vec<String>, ExtractError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "docx" => {
            let bytes =
                std::fs::read(path).map_err(|e| ExtractError::DocumentUnreadable(e.to_string()))?;
            docx::paragraphs(&bytes).map_err(|e| ExtractError::DocumentUnreadable(e.to_string()))
        }
        "txt" | "md" => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| ExtractError::DocumentUnreadable(e.to_string()))?;
            Ok(text.lines().map(str::to_string).collect())
        }
        other => Err(ExtractError::DocumentUnreadable(format!(
            "unsupported file extension {:?}",
            other
        ))),
    }
}

/// Extracts a fiche from raw paragraphs.
pub fn from_paragraphs(paragraphs: &[String]) -> Result<Extraction, ExtractError> {
    let kind = detect_kind(paragraphs).ok_or(ExtractError::TypeUnresolved)?;
    let mut warnings = Vec::new();
    let fields = segment_fields(kind, paragraphs, &mut warnings);

    let mut plant = Plant::new(kind);
    for (attr, value) in &fields {
        if !plant.set_field(attr, value) {
            // Dictionary and model disagree about this kind's fields.
            warnings.push(format!(
                "field '{}' is not part of kind '{}', value dropped",
                attr,
                kind.as_tag()
            ));
        }
    }
    if plant.name.trim().is_empty() {
        return Err(ExtractError::NameMissing);
    }
    Ok(Extraction { plant, warnings })
}

/// Scans for the first `Type:` paragraph whose value resolves to a kind.
/// Declarations that do not resolve are skipped, so a typo in one fiche line
/// does not mask a valid declaration further down.
fn detect_kind(paragraphs: &[String]) -> Option<PlantKind> {
    for para in paragraphs {
        if let Some((label, value)) = para.trim().split_once(':') {
            if labels::is_type_label(label) {
                if let Some(kind) = labels::resolve_kind(value) {
                    return Some(kind);
                }
            }
        }
    }
    None
}

/// Segments paragraphs into `attr -> value` pairs using the dictionary for
/// `kind`. At most one field is open at a time; a recognized label closes the
/// previous field and opens its own. Blank paragraphs and unrecognized text
/// extend the open field, which is how multi-line values survive. When the
/// same label appears twice the later occurrence wins.
fn segment_fields(
    kind: PlantKind,
    paragraphs: &[String],
    warnings: &mut Vec<String>,
) -> HashMap<&'static str, String> {
    let mut fields = HashMap::new();
    let mut open: Option<(&'static str, Vec<String>)> = None;

    for para in paragraphs {
        let text = para.trim();
        if text.is_empty() {
            if let Some((_, lines)) = open.as_mut() {
                lines.push(String::new());
            }
            continue;
        }
        if let Some((label, value)) = text.split_once(':') {
            // The kind scan consumed the header type declaration. Once a
            // field is open, a type-like line is ordinary continuation text.
            if open.is_none()
                && labels::is_type_label(label)
                && labels::resolve_kind(value).is_some()
            {
                continue;
            }
            if let Some(attr) = labels::resolve_attribute(kind, label) {
                flush(&mut fields, open.take());
                open = Some((attr, vec![value.trim().to_string()]));
                continue;
            }
        }
        match open.as_mut() {
            Some((_, lines)) => lines.push(text.to_string()),
            None => warnings.push(format!("ignored text before any field: {:?}", text)),
        }
    }
    flush(&mut fields, open.take());
    fields
}

fn flush(fields: &mut HashMap<&'static str, String>, open: Option<(&'static str, Vec<String>)>) {
    if let Some((attr, lines)) = open {
        let value = lines.join("\n");
        fields.insert(attr, value.trim().to_string());
    }
}
