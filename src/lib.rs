//! Stylist Client - typed binding for the Stylist clothing similarity service
//!
//! This library wraps the Stylist HTTP API: uploading clothing images,
//! listing and deleting stored items, image similarity search and
//! triggering store persistence on the backend.

pub mod cli;
pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::encoding::{decode_image, encode_bytes};
pub use models::{ClothingItem, Confirmation, Gender, SimilarityMatch, SimilarityResponse, SimilarityResult};
pub use services::{ClientConfig, StylistClient, StylistError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let encoded = encode_bytes(b"stylist");
        assert_eq!(decode_image(&encoded).unwrap(), b"stylist");
    }
}
