use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("document is encrypted")]
    Encrypted,
    #[error("failed to extract text from page {page}: {message}")]
    Extraction { page: usize, message: String },
    #[error("document has {pages} pages, limit is {limit}")]
    TooManyPages { pages: usize, limit: usize },
}

/// Trait for PDF text extraction backends.
///
/// A backend only opens the buffer and reads each page's text in document
/// order; joining, trimming and the empty-text check live in
/// [`crate::extract::extract_text_from_pdf`].
pub trait PdfBackend: Send + Sync {
    /// Return the text of every page, first page first. Pages without a text
    /// layer yield an empty string rather than an error.
    fn page_texts(&self, data: &[u8]) -> Result<Vec<String>, BackendError>;
}
