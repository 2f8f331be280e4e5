use thiserror::Error;

use crate::backend::BackendError;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No PDF data provided")]
    MissingPayload,
    #[error("PDF extraction failed: invalid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("PDF extraction failed: {0}")]
    Parse(#[from] BackendError),
    #[error("PDF extraction failed: No text extracted from PDF")]
    EmptyText,
    #[error("PDF extraction failed: decoded PDF is {size} bytes, limit is {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },
}

impl ExtractError {
    /// True for failures that happen once a payload is in hand (decode, parse,
    /// empty text, size limit), as opposed to problems with the request itself.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            ExtractError::Decode(_)
                | ExtractError::Parse(_)
                | ExtractError::EmptyText
                | ExtractError::InputTooLarge { .. }
        )
    }
}
