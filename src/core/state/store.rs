//! Shared holder of the active dataset

use crate::core::dataset::Dataset;
use crate::core::state::DatasetRefresher;
use crate::domain::Result;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

/// What a refresh did to the active dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// First load into an empty store
    Loaded,
    /// New files were found and the dataset was replaced
    Reloaded,
    /// Nothing new on disk; the same dataset stays active
    Unchanged,
}

impl fmt::Display for RefreshOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded => write!(f, "loaded"),
            Self::Reloaded => write!(f, "reloaded"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Holds the dataset served to readers
///
/// Readers take a cheap [`Arc`] snapshot with [`current`](Self::current) and
/// keep using it for as long as they like. A refresh builds the next dataset
/// without holding the read/write lock and then swaps the pointer, so readers
/// see either the old or the new dataset and never a partial one. Refreshes
/// are serialized.
#[derive(Debug, Default)]
pub struct DatasetStore {
    current: RwLock<Option<Arc<Dataset>>>,
    refresh_lock: Mutex<()>,
}

impl DatasetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `data`
    pub fn with_dataset(data: Dataset) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(data))),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Snapshot of the active dataset, `None` before the first load
    pub fn current(&self) -> Option<Arc<Dataset>> {
        self.current.read().clone()
    }

    /// Bring the active dataset up to date
    ///
    /// # Errors
    ///
    /// Returns the refresher's error; the previously active dataset stays in
    /// place.
    pub fn refresh(&self, refresher: &DatasetRefresher) -> Result<RefreshOutcome> {
        let _guard = self.refresh_lock.lock();

        let previous = self.current();
        let next = refresher.update_data(previous.as_ref())?;

        let outcome = match &previous {
            None => RefreshOutcome::Loaded,
            Some(previous) if Arc::ptr_eq(previous, &next) => RefreshOutcome::Unchanged,
            Some(_) => RefreshOutcome::Reloaded,
        };

        if outcome != RefreshOutcome::Unchanged {
            *self.current.write() = Some(next);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataConfig;
    use crate::domain::CardLiveError;
    use std::fs;
    use tempfile::TempDir;

    fn write_sample(dir: &TempDir, name: &str) {
        fs::write(
            dir.path().join(name),
            r#"{"timestamp": "2020-06-01", "geo_area_code": 124}"#,
        )
        .unwrap();
    }

    fn refresher(dir: &TempDir) -> DatasetRefresher {
        DatasetRefresher::from_config(&DataConfig {
            directory: dir.path().to_path_buf(),
            ..DataConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_refresh_outcomes() {
        let dir = TempDir::new().unwrap();
        write_sample(&dir, "s1");
        let refresher = refresher(&dir);
        let store = DatasetStore::new();
        assert!(store.current().is_none());

        assert_eq!(store.refresh(&refresher).unwrap(), RefreshOutcome::Loaded);
        let snapshot = store.current().unwrap();

        assert_eq!(store.refresh(&refresher).unwrap(), RefreshOutcome::Unchanged);
        assert!(Arc::ptr_eq(&snapshot, &store.current().unwrap()));

        write_sample(&dir, "s2");
        assert_eq!(store.refresh(&refresher).unwrap(), RefreshOutcome::Reloaded);
        assert_eq!(store.current().unwrap().samples_count(), 2);
        // Readers holding the old snapshot are unaffected
        assert_eq!(snapshot.samples_count(), 1);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_dataset() {
        let dir = TempDir::new().unwrap();
        write_sample(&dir, "s1");
        let refresher = refresher(&dir);
        let store = DatasetStore::new();
        store.refresh(&refresher).unwrap();

        fs::write(dir.path().join("s2"), "{not json").unwrap();
        let err = store.refresh(&refresher).unwrap_err();

        assert!(matches!(err, CardLiveError::MalformedRecord { .. }));
        assert_eq!(store.current().unwrap().samples_count(), 1);
    }

    #[test]
    fn test_with_dataset() {
        let dir = TempDir::new().unwrap();
        write_sample(&dir, "s1");
        let data = refresher(&dir).update_data(None).unwrap();

        let store = DatasetStore::with_dataset((*data).clone());
        assert_eq!(store.current().unwrap().samples_count(), 1);
    }
}
