//! File content encoding.
//!
//! File bodies are stored as data URLs (`data:<mime>;base64,<payload>`) so
//! that content survives as plain text in the store and can be handed to
//! clients directly.

use base64::{engine::general_purpose, Engine as _};

use crate::{CloudStoreError, Result};

/// Encode raw bytes into a data URL with the given MIME type.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Decode a data URL into its MIME type and raw bytes.
///
/// Fails with `MalformedContent` when the value is not of the form
/// `data:<mime>;base64,<payload>` or the payload is not valid base64.
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>)> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(malformed_content)?;

    let (mime_type, payload) = rest.split_once(";base64,").ok_or_else(malformed_content)?;

    if mime_type.is_empty() || payload.is_empty() {
        return Err(malformed_content());
    }

    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| malformed_content())?;

    Ok((mime_type.to_string(), bytes))
}

fn malformed_content() -> CloudStoreError {
    CloudStoreError::MalformedContent("invalid data URL".to_string())
}
