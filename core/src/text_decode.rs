//! Text and JSON decoding for documents stored inside a template archive.
//!
//! Template entries are UTF-16LE JSON. Every failure on this path is
//! reported as a [`DecodeError`] by [`try_decode`]. Only [`decode`] and
//! [`decode_embedded`] collapse a failure into an empty document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    #[default]
    Utf16Le,
    Utf8,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("document entry is missing")]
    MissingEntry,
    #[error("invalid UTF-16LE byte length: {len}")]
    OddByteLength { len: usize },
    #[error("invalid UTF-16LE text")]
    InvalidUtf16,
    #[error("invalid UTF-8 text: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn empty_document() -> Value {
    Value::Object(Map::new())
}

pub fn decode_text(bytes: &[u8], encoding: TextEncoding) -> Result<String, DecodeError> {
    let text = match encoding {
        TextEncoding::Utf16Le => decode_utf16le(bytes)?,
        TextEncoding::Utf8 => std::str::from_utf8(bytes)?.to_string(),
    };
    Ok(match text.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

pub fn try_decode(bytes: Option<&[u8]>, encoding: TextEncoding) -> Result<Value, DecodeError> {
    let bytes = bytes.ok_or(DecodeError::MissingEntry)?;
    let text = decode_text(bytes, encoding)?;
    Ok(serde_json::from_str(&text)?)
}

/// Decodes a document, falling back to `{}` on any failure.
///
/// An empty object produced here is indistinguishable from a template whose
/// document really is empty.
pub fn decode(bytes: Option<&[u8]>, encoding: TextEncoding) -> Value {
    match try_decode(bytes, encoding) {
        Ok(value) => value,
        Err(DecodeError::MissingEntry) => {
            log::debug!("document missing, using empty document");
            empty_document()
        }
        Err(err) => {
            log::warn!("failed to decode document, using empty document: {err}");
            empty_document()
        }
    }
}

/// Decodes JSON that a document embeds as a string value, such as a visual
/// container's `config`. Malformed text yields `{}`.
pub fn decode_embedded(raw: &str) -> Value {
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("failed to decode embedded JSON, using empty document: {err}");
            empty_document()
        }
    }
}

fn decode_utf16le(bytes: &[u8]) -> Result<String, DecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::OddByteLength { len: bytes.len() });
    }

    let code_units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    String::from_utf16(&code_units).map_err(|_| DecodeError::InvalidUtf16)
}
