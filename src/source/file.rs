use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::BillSource;
use crate::bill::RawOverdueRecord;
use crate::error::{OverdueError, Result};

/// Reads the overdue view from a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<Vec<RawOverdueRecord>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            OverdueError::Fetch(format!("{}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| OverdueError::Decode {
            origin: self.path.display().to_string(),
            source: e,
        })
    }
}

impl BillSource for JsonFileSource {
    fn fetch_overdue(&self) -> Result<Vec<RawOverdueRecord>> {
        let records = self.read_all()?;
        info!(path = %self.path.display(), count = records.len(), "read bills from file");
        Ok(records)
    }

    fn fetch_by_id(&self, id: &str) -> Result<Option<RawOverdueRecord>> {
        Ok(self.read_all()?.into_iter().find(|r| r.id == id))
    }
}
