use crate::services::StylistError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::Path;

/// Encode raw image bytes with the standard padded base64 alphabet
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Read a file fully into memory and base64-encode it
pub fn encode_file(path: &Path) -> Result<String, StylistError> {
    let bytes = fs::read(path).map_err(|source| StylistError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::trace!("Encoded {} ({} bytes)", path.display(), bytes.len());

    Ok(encode_bytes(&bytes))
}

/// Decode an image payload received from the backend
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, StylistError> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| StylistError::Decode(format!("invalid base64 image: {}", e)))
}
