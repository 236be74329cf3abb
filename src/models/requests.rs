use crate::models::domain::Gender;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Number of matches requested when the caller does not choose
pub const DEFAULT_TOP_N: i64 = 5;

/// Body of `POST /api/clothes/upload`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub gender: Gender,
    /// Base64-encoded image bytes
    pub image: String,
}

impl UploadRequest {
    pub fn new(name: impl Into<String>, gender: Gender, image: String) -> Self {
        Self {
            name: name.into(),
            gender,
            image,
        }
    }
}

/// Body of `POST /api/similarity/calculate`
///
/// `top_n` is forwarded as given; the backend decides what non-positive values mean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityRequest {
    pub user_image: String,
    #[serde(default = "default_top_n")]
    pub top_n: i64,
}

fn default_top_n() -> i64 {
    DEFAULT_TOP_N
}

/// One line of a batch upload manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub name: String,
    /// Accepts the same spellings as the command line (`male`, `Female`, ...)
    #[serde(deserialize_with = "deserialize_gender")]
    pub gender: Gender,
    pub path: PathBuf,
}

fn deserialize_gender<'de, D>(deserializer: D) -> Result<Gender, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(de::Error::custom)
}
