use crate::models::{BatchItem, ClothingItem};
use crate::services::stylist::{StylistClient, StylistError};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of uploading one manifest entry
#[derive(Debug)]
pub struct BatchOutcome {
    pub name: String,
    pub path: PathBuf,
    pub result: Result<ClothingItem, StylistError>,
}

/// Per-item outcomes of a batch upload, in manifest order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Upload every item once, continuing past failures.
///
/// Entries without a name are rejected locally and never reach the backend.
pub fn upload_batch(client: &StylistClient, items: &[BatchItem]) -> BatchReport {
    let mut report = BatchReport::default();

    for (idx, item) in items.iter().enumerate() {
        let result = if item.name.is_empty() {
            Err(StylistError::InvalidRequest(format!(
                "item {} ({}) has no name",
                idx + 1,
                item.path.display()
            )))
        } else {
            client.upload_clothes(&item.name, item.gender, &item.path)
        };

        match &result {
            Ok(created) => tracing::info!("Uploaded {} as {}", item.name, created.id),
            Err(e) => tracing::warn!("Error uploading {}: {}", item.name, e),
        }

        report.outcomes.push(BatchOutcome {
            name: item.name.clone(),
            path: item.path.clone(),
            result,
        });
    }

    tracing::info!(
        "Batch upload finished: {} succeeded, {} failed",
        report.succeeded().count(),
        report.failed().count()
    );

    report
}

/// Read a JSON manifest: an array of `{name, gender, path}` objects.
///
/// Relative image paths are resolved against the manifest's directory.
pub fn load_manifest(path: &Path) -> Result<Vec<BatchItem>, StylistError> {
    let content = fs::read_to_string(path).map_err(|source| StylistError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut items: Vec<BatchItem> = serde_json::from_str(&content).map_err(|e| {
        StylistError::InvalidRequest(format!("invalid manifest {}: {}", path.display(), e))
    })?;

    if let Some(dir) = path.parent() {
        for item in &mut items {
            if item.path.is_relative() {
                item.path = dir.join(&item.path);
            }
        }
    }

    Ok(items)
}
