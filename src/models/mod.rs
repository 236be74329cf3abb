// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ClothingItem, Gender, SimilarityMatch, SimilarityResult};
pub use requests::{BatchItem, SimilarityRequest, UploadRequest, DEFAULT_TOP_N};
pub use responses::{Confirmation, SimilarityResponse};
