use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use serde_json::{Map, Value};

use crate::error::ExtractError;

/// Name of the request field holding the base64-encoded PDF.
pub const PAYLOAD_FIELD: &str = "pdf_base64";

/// Standard padded alphabet that, like most decoders in the wild, ignores
/// non-zero bits left over in the final symbol.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// A decoded extraction request. Only [`PAYLOAD_FIELD`] is read; any other
/// keys in the incoming object are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub pdf_base64: String,
}

impl Request {
    /// Parse the raw standard-input blob.
    ///
    /// A missing or falsy payload (`null`, `false`, `0`, `""`, `[]`, `{}`) is
    /// [`ExtractError::MissingPayload`]; anything that is not a JSON object,
    /// or any other non-string payload, is [`ExtractError::InvalidInput`].
    pub fn from_json(input: &[u8]) -> Result<Self, ExtractError> {
        let object: Map<String, Value> = serde_json::from_slice(input)
            .map_err(|e| ExtractError::InvalidInput(e.to_string()))?;

        match object.get(PAYLOAD_FIELD) {
            None => Err(ExtractError::MissingPayload),
            Some(value) if is_falsy(value) => Err(ExtractError::MissingPayload),
            Some(Value::String(s)) => Ok(Self {
                pdf_base64: s.clone(),
            }),
            Some(_) => Err(ExtractError::InvalidInput(format!(
                "{PAYLOAD_FIELD} must be a string"
            ))),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Decode a standard (padded) base64 payload into raw bytes.
///
/// ASCII whitespace is dropped first so line-wrapped encodings decode.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, ExtractError> {
    let compact: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let bytes = PAYLOAD_ENGINE.decode(compact)?;
    tracing::debug!(bytes = bytes.len(), "decoded base64 payload");
    Ok(bytes)
}
