//! Record loader
//!
//! Reads a flat directory of JSON sample reports into a [`Dataset`]. Only
//! regular files directly inside the directory are read; sub-directories and
//! dot-files are skipped. Files are processed in file-name order.

use crate::core::dataset::Dataset;
use crate::core::transform::{parse_sample, ParsedSample};
use crate::domain::ids::SampleKey;
use crate::domain::{CardLiveError, Result};
use crate::{log_load_complete, log_load_start};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Loads sample reports from a directory
#[derive(Debug, Clone)]
pub struct RecordLoader {
    directory: PathBuf,
}

impl RecordLoader {
    /// Create a loader for `directory`; nothing is read until asked
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Directory this loader reads from
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// List the sample files currently in the directory, keyed by file name
    ///
    /// # Errors
    ///
    /// Returns [`CardLiveError::DirectoryNotFound`] if the directory does not
    /// exist, or [`CardLiveError::Io`] if it cannot be listed.
    pub fn list_files(&self) -> Result<BTreeMap<SampleKey, PathBuf>> {
        if !self.directory.is_dir() {
            return Err(CardLiveError::DirectoryNotFound(self.directory.clone()));
        }

        let mut files = BTreeMap::new();
        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            // Follows symlinks
            if !entry.path().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            match SampleKey::new(name) {
                Ok(key) => {
                    // Lossy names may collide; last one listed wins
                    if let Some(previous) = files.insert(key, entry.path()) {
                        tracing::warn!(path = %previous.display(), "Sample key collides with another file name");
                    }
                }
                Err(reason) => {
                    tracing::warn!(path = %entry.path().display(), %reason, "Skipping file");
                }
            }
        }

        Ok(files)
    }

    /// Load every sample file into a new dataset
    ///
    /// Any malformed file fails the whole load.
    ///
    /// # Errors
    ///
    /// Returns [`CardLiveError::DirectoryNotFound`] if the directory is missing
    /// and [`CardLiveError::MalformedRecord`] for the first file that is not a
    /// valid sample report.
    pub fn read_data(&self) -> Result<Dataset> {
        let started = Instant::now();
        let files = self.list_files()?;
        log_load_start!(self.directory.display(), files.len());

        let parsed = files
            .into_iter()
            .map(|(key, path)| read_sample(key, &path))
            .collect::<Result<Vec<ParsedSample>>>()?;

        let dataset = Dataset::from_parsed(parsed)?;
        log_load_complete!(dataset.samples_count(), started.elapsed());

        Ok(dataset)
    }
}

fn read_sample(key: SampleKey, path: &Path) -> Result<ParsedSample> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CardLiveError::malformed(key.as_str(), format!("unreadable file: {e}")))?;
    let document: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| CardLiveError::malformed(key.as_str(), format!("invalid JSON: {e}")))?;

    tracing::trace!(file = %key, "Parsed sample file");
    parse_sample(key, &document)
}
