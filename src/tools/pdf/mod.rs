pub mod extract;
pub mod split;

use crate::utils::error::{pdf_message_for, Result, ToolError};
use crate::utils::validation::validate_file_extension;
use lopdf::Document;

/// 與網頁版相同的上傳上限
pub const MAX_PDF_BYTES: usize = 50 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Checks an uploaded file before handing it to the PDF library.
pub fn validate_pdf(name: &str, bytes: &[u8]) -> Result<()> {
    validate_file_extension("file", name, &["pdf"])?;

    if bytes.is_empty() {
        return Err(ToolError::invalid_input("file", name, "File is empty"));
    }
    if bytes.len() > MAX_PDF_BYTES {
        return Err(ToolError::invalid_input(
            "file",
            name,
            format!(
                "File is {:.1} MB, the limit is {} MB",
                bytes.len() as f64 / (1024.0 * 1024.0),
                MAX_PDF_BYTES / (1024 * 1024)
            ),
        ));
    }
    // 部分產生器會在檔頭前放幾個垃圾位元組
    let head = &bytes[..bytes.len().min(1024)];
    if !head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC) {
        return Err(ToolError::invalid_input("file", name, "Missing %PDF- header"));
    }
    Ok(())
}

pub(crate) fn load_document(bytes: &[u8]) -> Result<Document> {
    let doc = Document::load_mem(bytes).map_err(|e| {
        let raw = e.to_string();
        tracing::debug!("PDF load failed: {}", raw);
        if pdf_message_for(&raw).contains("password") {
            ToolError::EncryptedPdfError
        } else {
            ToolError::InvalidPdfError { message: raw }
        }
    })?;

    if doc.trailer.get(b"Encrypt").is_ok() {
        return Err(ToolError::EncryptedPdfError);
    }
    Ok(doc)
}

pub fn page_count(bytes: &[u8]) -> Result<u32> {
    Ok(load_document(bytes)?.get_pages().len() as u32)
}
