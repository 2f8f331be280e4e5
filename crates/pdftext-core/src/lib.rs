//! Text extraction for base64-encoded PDFs delivered as JSON.
//!
//! [`run`] takes the raw request bytes and a [`PdfBackend`] and returns the
//! JSON line and exit status to report; it does no process I/O itself.

pub mod backend;
pub mod config_file;
pub mod error;
pub mod extract;
pub mod mock;
pub mod pipeline;
pub mod report;
pub mod request;

pub use backend::{BackendError, PdfBackend};
pub use error::ExtractError;
pub use extract::{extract_text_from_base64, extract_text_from_pdf};
pub use pipeline::{Outcome, run, run_with};
pub use report::Report;
pub use request::{Request, decode_payload};

/// Runtime settings resolved from config files and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Largest decoded PDF accepted. `None` disables the check.
    pub max_input_bytes: Option<usize>,
    /// Documents with more pages than this fail without any text being
    /// read. `None` disables the check.
    pub max_pages: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            max_input_bytes: None,
            max_pages: None,
        }
    }
}
