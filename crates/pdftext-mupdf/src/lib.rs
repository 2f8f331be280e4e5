use mupdf::{Document, TextPageFlags};

use pdftext_core::{BackendError, PdfBackend};

const PDF_MIME: &str = "application/pdf";

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the request and reporting code does not
/// transitively depend on it.
#[derive(Debug, Clone, Default)]
pub struct MupdfBackend {
    /// Reject documents with more pages than this. `None` accepts any length.
    max_pages: Option<usize>,
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse documents longer than `max_pages` pages without reading any
    /// text. `None` or `Some(0)` disables the check.
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages.filter(|n| *n > 0);
        self
    }
}

impl PdfBackend for MupdfBackend {
    fn page_texts(&self, data: &[u8]) -> Result<Vec<String>, BackendError> {
        let document = Document::from_bytes(data, PDF_MIME)
            .map_err(|e| BackendError::Open(e.to_string()))?;

        if document
            .needs_password()
            .map_err(|e| BackendError::Open(e.to_string()))?
        {
            return Err(BackendError::Encrypted);
        }

        if let Some(limit) = self.max_pages {
            let pages = document
                .page_count()
                .map_err(|e| BackendError::Open(e.to_string()))?;
            let pages = usize::try_from(pages).unwrap_or(0);
            if pages > limit {
                return Err(BackendError::TooManyPages { pages, limit });
            }
        }

        let mut pages_text = Vec::new();

        for (index, page_result) in document
            .pages()
            .map_err(|e| BackendError::Open(e.to_string()))?
            .enumerate()
        {
            let page_number = index + 1;
            let extraction_error = |e: mupdf::Error| BackendError::Extraction {
                page: page_number,
                message: e.to_string(),
            };

            let page = page_result.map_err(extraction_error)?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(extraction_error)?;

            let mut lines = Vec::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    lines.push(line_text);
                }
            }
            pages_text.push(lines.join("\n"));
        }

        tracing::debug!(pages = pages_text.len(), "read PDF pages with mupdf");
        Ok(pages_text)
    }
}
