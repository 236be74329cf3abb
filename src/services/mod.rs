// Service exports
pub mod batch;
pub mod stylist;

pub use batch::{load_manifest, upload_batch, BatchOutcome, BatchReport};
pub use stylist::{ClientConfig, StylistClient, StylistError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
