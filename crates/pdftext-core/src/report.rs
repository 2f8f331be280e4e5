use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

use crate::error::ExtractError;

/// The single JSON line written for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Success {
        success: bool,
        text: String,
        length: usize,
    },
    Failure {
        success: bool,
        error: String,
    },
    /// The request had no payload; this shape carries no `success` key.
    MissingPayload { error: String },
}

impl Report {
    pub fn success(text: String) -> Self {
        let length = text.chars().count();
        Report::Success {
            success: true,
            text,
            length,
        }
    }

    pub fn failure(err: &ExtractError) -> Self {
        match err {
            ExtractError::MissingPayload => Report::MissingPayload {
                error: err.to_string(),
            },
            _ => Report::Failure {
                success: false,
                error: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Report::Success { .. })
    }

    /// Process exit status for this report: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    /// Render as one JSON line terminated by `\n`.
    pub fn to_json_line(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64);
        let mut ser = Serializer::with_formatter(&mut out, SpacedAsciiFormatter::default());
        // Serializing owned strings and integers into a Vec cannot fail.
        if self.serialize(&mut ser).is_err() {
            out.clear();
            out.extend_from_slice(br#"{"success": false, "error": "failed to serialize result"}"#);
        }
        out.push(b'\n');
        out
    }
}

impl From<Result<String, ExtractError>> for Report {
    fn from(result: Result<String, ExtractError>) -> Self {
        match result {
            Ok(text) => Report::success(text),
            Err(err) => Report::failure(&err),
        }
    }
}

/// Single-line JSON with `", "` and `": "` separators and every non-ASCII
/// character (and DEL) escaped as `\uXXXX`, the layout consumers of this
/// tool parse.
#[derive(Debug, Default)]
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.begin_object_key(writer, first)
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}
