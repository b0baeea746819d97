//! PDF splitting.
//!
//! Every output is built by cloning the loaded document and deleting the
//! pages that were not asked for, then pruning objects nothing references.

use super::load_document;
use crate::utils::error::{Result, ToolError};
use lopdf::Document;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Upper bound on any page number a selection may name.
pub const MAX_PAGE: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    /// Selected pages into a single document.
    Extract(Vec<u32>),
    /// One document per comma-separated group.
    Ranges(Vec<Vec<u32>>),
    EveryPage,
    /// One document per `n` consecutive pages.
    Chunks(u32),
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitOutput {
    pub file_name: String,
    pub pages: Vec<u32>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

fn parse_page(token: &str) -> Result<u32> {
    let page: u32 = token
        .trim()
        .parse()
        .map_err(|_| ToolError::PageRangeError(format!("Invalid page: {}", token.trim())))?;
    if page == 0 {
        return Err(ToolError::PageRangeError("Page numbers start at 1".into()));
    }
    if page > MAX_PAGE {
        return Err(ToolError::PageRangeError(format!(
            "Page {} is beyond the supported maximum of {}",
            page, MAX_PAGE
        )));
    }
    Ok(page)
}

fn parse_group(part: &str) -> Result<Vec<u32>> {
    match part.split_once('-') {
        Some((start, end)) => {
            let start = parse_page(start)?;
            let end = parse_page(end)?;
            if start > end {
                return Err(ToolError::PageRangeError(format!(
                    "Start {} > end {}",
                    start, end
                )));
            }
            Ok((start..=end).collect())
        }
        None => Ok(vec![parse_page(part)?]),
    }
}

/// Parses input like `"1-3, 5, 8-10"` keeping each comma group separate.
pub fn parse_range_groups(input: &str) -> Result<Vec<Vec<u32>>> {
    let groups: Vec<Vec<u32>> = input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_group)
        .collect::<Result<_>>()?;

    if groups.is_empty() {
        return Err(ToolError::PageRangeError("No pages specified".into()));
    }
    Ok(groups)
}

/// Parses a page selection into a sorted, deduplicated page list.
pub fn parse_ranges(input: &str) -> Result<Vec<u32>> {
    let pages: BTreeSet<u32> = parse_range_groups(input)?.into_iter().flatten().collect();
    Ok(pages.into_iter().collect())
}

pub(crate) fn check_pages_exist(pages: &[u32], page_count: u32) -> Result<()> {
    if pages.is_empty() {
        return Err(ToolError::PageRangeError("No pages specified".into()));
    }
    if let Some(&page) = pages.iter().find(|&&p| p == 0 || p > page_count) {
        return Err(ToolError::PageRangeError(format!(
            "Page {} does not exist (document has {} pages)",
            page, page_count
        )));
    }
    Ok(())
}

fn extract_pages(doc: &Document, pages: &[u32]) -> Result<Vec<u8>> {
    let page_count = doc.get_pages().len() as u32;
    check_pages_exist(pages, page_count)?;

    let mut new_doc = doc.clone();
    let keep: HashSet<u32> = pages.iter().copied().collect();
    // 從後往前刪，頁碼才不會位移
    let to_delete: Vec<u32> = (1..=page_count).rev().filter(|p| !keep.contains(p)).collect();
    for page in to_delete {
        new_doc.delete_pages(&[page]);
    }

    new_doc.prune_objects();
    new_doc.compress();

    let mut buffer = Vec::new();
    new_doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Builds a new PDF containing only `pages` (1-based) of `bytes`.
pub fn split_document(bytes: &[u8], pages: &[u32]) -> Result<Vec<u8>> {
    let doc = load_document(bytes)?;
    extract_pages(&doc, pages)
}

fn is_contiguous(first: u32, last: u32, len: usize) -> bool {
    last.checked_sub(first).map(|span| span as usize + 1) == Some(len)
}

fn group_label(pages: &[u32]) -> String {
    match pages {
        [single] => single.to_string(),
        [first, .., last] if is_contiguous(*first, *last, pages.len()) => {
            format!("{}-{}", first, last)
        }
        _ => pages.iter().map(u32::to_string).collect::<Vec<_>>().join("_"),
    }
}

fn plan_groups(mode: &SplitMode, page_count: u32) -> Result<Vec<Vec<u32>>> {
    Ok(match mode {
        SplitMode::Extract(pages) => vec![pages.clone()],
        SplitMode::Ranges(groups) => groups.clone(),
        SplitMode::EveryPage => (1..=page_count).map(|p| vec![p]).collect(),
        SplitMode::Chunks(0) => {
            return Err(ToolError::invalid_input("chunk_size", 0, "Chunk size must be at least 1"));
        }
        SplitMode::Chunks(size) => (1..=page_count)
            .collect::<Vec<_>>()
            .chunks(*size as usize)
            .map(<[u32]>::to_vec)
            .collect(),
    })
}

pub fn split(bytes: &[u8], mode: &SplitMode, base_name: &str) -> Result<Vec<SplitOutput>> {
    let doc = load_document(bytes)?;
    let page_count = doc.get_pages().len() as u32;
    let groups = plan_groups(mode, page_count)?;

    if groups.is_empty() {
        return Err(ToolError::PageRangeError("No pages specified".into()));
    }
    for group in &groups {
        check_pages_exist(group, page_count)?;
    }

    let mut outputs = Vec::with_capacity(groups.len());
    for pages in groups {
        let label = group_label(&pages);
        let file_name = if pages.len() == 1 {
            format!("{}_page_{}.pdf", base_name, label)
        } else {
            format!("{}_pages_{}.pdf", base_name, label)
        };
        tracing::debug!("Writing {} ({} pages)", file_name, pages.len());
        let bytes = extract_pages(&doc, &pages)?;
        outputs.push(SplitOutput {
            file_name,
            pages,
            bytes,
        });
    }

    tracing::info!("Split {} pages into {} files", page_count, outputs.len());
    Ok(outputs)
}

/// Packs split outputs into one ZIP archive.
pub fn bundle_zip(outputs: &[SplitOutput]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for output in outputs {
        zip.start_file::<_, ()>(output.file_name.as_str(), FileOptions::default())?;
        zip.write_all(&output.bytes)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
