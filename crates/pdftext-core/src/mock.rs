//! Mock PDF backend for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{BackendError, PdfBackend};

/// A hand-rolled mock implementing [`PdfBackend`] for tests.
///
/// Returns the same page texts (or the same error) on every call, whatever
/// bytes it is handed, and counts calls via [`call_count()`](MockBackend::call_count).
pub struct MockBackend {
    response: Result<Vec<String>, BackendError>,
    call_count: AtomicUsize,
}

impl MockBackend {
    /// Create a mock whose document has the given pages.
    pub fn with_pages(pages: Vec<String>) -> Self {
        Self {
            response: Ok(pages),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Create a mock that fails every call with `error`.
    pub fn failing(error: BackendError) -> Self {
        Self {
            response: Err(error),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Number of times [`PdfBackend::page_texts`] has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl PdfBackend for MockBackend {
    fn page_texts(&self, _data: &[u8]) -> Result<Vec<String>, BackendError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}
