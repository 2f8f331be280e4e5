use crate::backend::PdfBackend;
use crate::extract::extract_text_from_base64;
use crate::report::Report;
use crate::request::Request;
use crate::{ExtractError, Settings};

/// Bytes to write to standard output and the status to exit with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: Vec<u8>,
    pub exit_code: i32,
}

impl From<Report> for Outcome {
    fn from(report: Report) -> Self {
        Self {
            exit_code: report.exit_code(),
            output: report.to_json_line(),
        }
    }
}

/// Run one request end to end with default settings.
pub fn run(input: &[u8], backend: &dyn PdfBackend) -> Outcome {
    run_with(input, backend, &Settings::default())
}

/// Run one request end to end: parse the JSON request, decode the payload,
/// extract text and render the report. Performs no process I/O.
pub fn run_with(input: &[u8], backend: &dyn PdfBackend, settings: &Settings) -> Outcome {
    let result = Request::from_json(input).and_then(|request| {
        extract_text_from_base64(&request.pdf_base64, backend, settings.max_input_bytes)
    });
    log_result(&result);
    Report::from(result).into()
}

fn log_result(result: &Result<String, ExtractError>) {
    match result {
        Ok(text) => tracing::debug!(chars = text.chars().count(), "extraction succeeded"),
        Err(err @ ExtractError::MissingPayload) => tracing::warn!(error = %err, "empty request"),
        Err(err) if err.is_extraction_failure() => {
            tracing::warn!(error = %err, "extraction failed")
        }
        Err(err) => tracing::warn!(error = %err, "rejected request"),
    }
}
