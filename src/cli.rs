//! Command-line front end for the Stylist service.

use crate::config::{LoggingSettings, Settings};
use crate::models::{ClothingItem, Gender, SimilarityMatch, DEFAULT_TOP_N};
use crate::services::{load_manifest, upload_batch, StylistClient};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stylist", version, about = "Manage clothes and find similar items on a Stylist server")]
pub struct Cli {
    /// Stylist server URL (overrides configuration)
    #[arg(long, global = true, env = "STYLIST_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides configuration)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Configuration file to load instead of config/default.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print raw JSON responses
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a single clothing image
    Upload {
        #[arg(long)]
        name: String,
        /// Male or Female
        #[arg(long)]
        gender: Gender,
        path: PathBuf,
    },
    /// Upload every entry of a JSON manifest
    Batch { manifest: PathBuf },
    /// List stored clothes
    List {
        /// Write each item's image into this directory
        #[arg(long)]
        save_images: Option<PathBuf>,
    },
    /// Delete a clothing item by id
    Delete { id: String },
    /// Find clothes similar to an image
    Similar {
        path: PathBuf,
        #[arg(long, default_value_t = DEFAULT_TOP_N, value_parser = clap::value_parser!(i64).range(1..))]
        top_n: i64,
    },
    /// Persist or reload the backend store
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum StoreAction {
    Save,
    Load,
}

impl Cli {
    /// Load settings and apply command-line overrides
    pub fn settings(&self) -> Result<Settings, config::ConfigError> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::load()?,
        };

        if let Some(base_url) = &self.base_url {
            settings.client.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            settings.client.timeout_secs = timeout;
        }

        Ok(settings)
    }
}

/// Initialize logging on stderr. `RUST_LOG` wins over the configured level.
pub fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.init(),
    }
}

/// Execute a parsed command against the configured server
pub fn run(cli: &Cli, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let client = StylistClient::new(settings.client.to_client_config())?;

    tracing::debug!("Using Stylist server at {}", client.base_url());

    match &cli.command {
        Command::Upload { name, gender, path } => {
            let item = client.upload_clothes(name, *gender, path)?;
            if cli.json {
                print_json(&item)?;
            } else {
                println!("Uploaded {} (id {})", item.name, item.id);
            }
        }
        Command::Batch { manifest } => {
            let items = load_manifest(manifest)?;
            let report = upload_batch(&client, &items);

            for outcome in &report.outcomes {
                match &outcome.result {
                    Ok(item) => println!("ok    {} -> {}", outcome.name, item.id),
                    Err(e) => println!("error {}: {}", outcome.name, e),
                }
            }

            if !report.all_succeeded() {
                return Err(format!(
                    "{} of {} uploads failed",
                    report.failed().count(),
                    report.outcomes.len()
                )
                .into());
            }
            println!("All items uploaded successfully!");
        }
        Command::List { save_images } => {
            let clothes = client.get_clothes()?;

            if let Some(dir) = save_images {
                let written = save_item_images(&clothes, dir)?;
                tracing::info!("Wrote {} images to {}", written, dir.display());
            }

            if cli.json {
                print_json(&clothes)?;
            } else if clothes.is_empty() {
                println!("No clothes found in the database.");
            } else {
                for item in &clothes {
                    println!("{}\t{}\t{}", item.id, item.name, item.descriptions.join(", "));
                }
            }
        }
        Command::Delete { id } => {
            let confirmation = client.delete_clothes(id)?;
            if cli.json {
                print_json(&confirmation)?;
            } else {
                println!("Deleted {}", id);
            }
        }
        Command::Similar { path, top_n } => {
            let response = client.calculate_similarity(path, *top_n)?;
            if cli.json {
                print_json(&response)?;
            } else if response.is_empty() {
                println!("No similar items found.");
            } else {
                for (rank, entry) in response.data.iter().enumerate() {
                    println!("{}", describe_match(rank + 1, entry));
                }
            }
        }
        Command::Store { action } => {
            let (confirmation, verb) = match action {
                StoreAction::Save => (client.save_store()?, "saved"),
                StoreAction::Load => (client.load_store()?, "loaded"),
            };
            if cli.json {
                print_json(&confirmation)?;
            } else {
                println!("Store {}", verb);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One display line for a ranked similarity entry
pub fn describe_match(rank: usize, entry: &SimilarityMatch) -> String {
    let item = entry.item();
    let mut line = format!("{}. {} (id {})", rank, item.name, item.id);
    if let Some(score) = entry.score() {
        line.push_str(&format!(" score {:.2}", score));
    }
    if !item.descriptions.is_empty() {
        line.push_str(&format!(" - {}", item.descriptions.join(", ")));
    }
    line
}

/// Decode item images into `dir`, one `<id>.img` file per item that has one
fn save_item_images(items: &[ClothingItem], dir: &Path) -> Result<usize, Box<dyn Error>> {
    fs::create_dir_all(dir)?;

    let mut written = 0;
    for item in items {
        if let Some(bytes) = item.image_bytes()? {
            let file = dir.join(format!("{}.img", urlencoding::encode(&item.id)));
            fs::write(&file, bytes)?;
            written += 1;
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SimilarityResult;

    fn item(id: &str, name: &str) -> ClothingItem {
        ClothingItem {
            id: id.to_string(),
            name: name.to_string(),
            descriptions: vec!["cotton".to_string()],
            image: None,
        }
    }

    #[test]
    fn test_parse_similar_defaults() {
        let cli = Cli::try_parse_from(["stylist", "similar", "query.jpg"]).unwrap();
        match cli.command {
            Command::Similar { path, top_n } => {
                assert_eq!(path, PathBuf::from("query.jpg"));
                assert_eq!(top_n, 5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_connection_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "stylist", "list", "--timeout-secs", "5", "--base-url", "http://stylist.test",
            "--config", "alt.toml",
        ])
        .unwrap();
        assert_eq!(cli.timeout_secs, Some(5));
        assert_eq!(cli.base_url.as_deref(), Some("http://stylist.test"));
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn test_parse_rejects_zero_top_n() {
        assert!(Cli::try_parse_from(["stylist", "similar", "q.jpg", "--top-n", "0"]).is_err());
    }

    #[test]
    fn test_parse_upload_gender() {
        let cli = Cli::try_parse_from([
            "stylist", "--json", "upload", "--name", "Parka", "--gender", "female", "parka.png",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::Upload {
                gender: Gender::Female,
                ..
            }
        ));
    }

    #[test]
    fn test_describe_match() {
        let scored = SimilarityMatch::Scored(SimilarityResult {
            score: 0.876,
            data_entry: item("7", "Blazer"),
        });
        assert_eq!(describe_match(1, &scored), "1. Blazer (id 7) score 0.88 - cotton");

        let flat = SimilarityMatch::Item(item("8", "Loafers"));
        assert_eq!(describe_match(2, &flat), "2. Loafers (id 8) - cotton");
    }

    #[test]
    fn test_save_item_images() {
        let dir = tempfile::tempdir().unwrap();
        let mut with_image = item("a/1", "Cap");
        with_image.image = Some(crate::encode_bytes(b"cap-bytes"));
        let items = vec![with_image, item("2", "Belt")];

        let written = save_item_images(&items, dir.path()).unwrap();
        assert_eq!(written, 1);
        assert_eq!(fs::read(dir.path().join("a%2F1.img")).unwrap(), b"cap-bytes");
    }
}
