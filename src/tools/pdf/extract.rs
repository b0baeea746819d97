use super::load_document;
use crate::utils::error::Result;
use lopdf::{Document, Object};
use serde::Serialize;
use std::collections::BTreeMap;

const METADATA_KEYS: &[&[u8]] = &[
    b"Title",
    b"Author",
    b"Subject",
    b"Keywords",
    b"Creator",
    b"Producer",
    b"CreationDate",
    b"ModDate",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageText {
    pub page: u32,
    pub text: String,
    pub words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedDocument {
    pub page_count: u32,
    pub pages: Vec<PageText>,
    pub total_words: usize,
    pub total_characters: usize,
    pub metadata: BTreeMap<String, String>,
}

impl ExtractedDocument {
    /// All page text joined with blank lines, the way the copy button works.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.trim_end())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Extracts text from every page, or only `pages` (1-based) when given.
pub fn extract_text(bytes: &[u8], pages: Option<&[u32]>) -> Result<ExtractedDocument> {
    let doc = load_document(bytes)?;
    let page_map = doc.get_pages();
    let page_count = page_map.len() as u32;

    let selected: Vec<u32> = match pages {
        Some(list) => {
            super::split::check_pages_exist(list, page_count)?;
            list.to_vec()
        }
        None => page_map.keys().copied().collect(),
    };

    let mut extracted = Vec::with_capacity(selected.len());
    for page in selected {
        let text = match doc.extract_text(&[page]) {
            Ok(text) => text,
            Err(e) => {
                // 單頁失敗(例如缺字型)不影響其他頁
                tracing::warn!("Could not extract text from page {}: {}", page, e);
                String::new()
            }
        };
        let words = text.split_whitespace().count();
        extracted.push(PageText { page, text, words });
    }

    let total_words = extracted.iter().map(|p| p.words).sum();
    let total_characters = extracted
        .iter()
        .map(|p| p.text.chars().filter(|c| !c.is_control()).count())
        .sum();

    tracing::debug!(
        "Extracted {} words from {} of {} pages",
        total_words,
        extracted.len(),
        page_count
    );

    Ok(ExtractedDocument {
        page_count,
        pages: extracted,
        total_words,
        total_characters,
        metadata: metadata(&doc),
    })
}

fn metadata(doc: &Document) -> BTreeMap<String, String> {
    let mut meta = BTreeMap::new();

    let info = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Dictionary(dict)) => dict,
            _ => return meta,
        },
        Ok(Object::Dictionary(dict)) => dict,
        _ => return meta,
    };

    for key in METADATA_KEYS {
        let value = match info.get(key) {
            Ok(Object::String(bytes, _)) => decode_pdf_string(bytes),
            Ok(Object::Name(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
            _ => continue,
        };
        if !value.is_empty() {
            meta.insert(String::from_utf8_lossy(key).into_owned(), value);
        }
    }
    meta
}

/// Text strings are either UTF-16BE with a BOM or PDFDocEncoding, which
/// agrees with Latin-1 for printable characters.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}
