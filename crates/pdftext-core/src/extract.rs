use crate::backend::PdfBackend;
use crate::error::ExtractError;
use crate::request::decode_payload;

/// Extract the text of a PDF held in memory.
///
/// Each page's text is appended in document order followed by `\n`, then
/// the whole string is trimmed. A document whose pages all come back blank
/// (scanned or image-only) is [`ExtractError::EmptyText`], never an empty
/// success.
pub fn extract_text_from_pdf(data: &[u8], backend: &dyn PdfBackend) -> Result<String, ExtractError> {
    let pages = backend.page_texts(data)?;
    tracing::debug!(pages = pages.len(), "extracted page texts");

    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in &pages {
        text.push_str(page);
        text.push('\n');
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::EmptyText);
    }
    Ok(trimmed.to_string())
}

/// Decode a base64 payload and extract its text.
///
/// `max_input_bytes` caps the decoded document size; `None` means no cap.
pub fn extract_text_from_base64(
    payload: &str,
    backend: &dyn PdfBackend,
    max_input_bytes: Option<usize>,
) -> Result<String, ExtractError> {
    let data = decode_payload(payload)?;
    if let Some(limit) = max_input_bytes
        && data.len() > limit
    {
        return Err(ExtractError::InputTooLarge {
            size: data.len(),
            limit,
        });
    }
    extract_text_from_pdf(&data, backend)
}
