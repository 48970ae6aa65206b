//! # Store
//!
//! Flat file holding every feedback entry.
//!
//! ## Requirements
//!
//! - Small dataset, read in full and rewritten in full on every mutation
//! - Pretty printed so the file can be inspected by hand
//! - Corrupt or missing file means "no data yet", never an error
//! - One odd entry never costs the rest of the collection
//!
//! ## Implementation
//!
//! - One JSON array, newest entry first
//! - Only content that is not a JSON array counts as malformed. Inside the array each entry is
//!   read leniently (see [`crate::feedback`]), anything that is not an object is skipped with a warning
//! - Writes go to a sibling `.tmp` file which is then renamed over the data file,
//!   so a concurrent reader sees either the old or the new collection
//! - No locking here, callers serialize mutations (see [`crate::state::State`])
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tokio::fs;
use tracing::{info, warn};

use crate::{error::StoreError, feedback::FeedbackEntry};

const EMPTY_COLLECTION: &str = "[]";

pub struct Store {
    path: PathBuf,
}

impl Store {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        if !fs::try_exists(&path).await? {
            info!("Creating empty feedback file at {}", path.display());
            fs::write(&path, EMPTY_COLLECTION).await?;
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load_all(&self) -> Vec<FeedbackEntry> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Failed to read {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        let values = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(values)) => values,
            Ok(_) => {
                warn!("Ignoring {}: not a JSON array", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Ignoring malformed {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                serde_json::from_value::<FeedbackEntry>(value)
                    .map_err(|e| warn!("Skipping stored entry {index}: {e}"))
                    .ok()
            })
            .collect()
    }

    pub async fn save_all(&self, entries: &[FeedbackEntry]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(entries)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}
