// Payload encoding
pub mod encoding;

pub use encoding::{decode_image, encode_bytes, encode_file};
