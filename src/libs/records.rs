//! Loading raw incident logs from JSON files.
//!
//! Stands in for the document store: reads an array of
//! [`RawActivityRecord`] documents and applies the storage-side filter
//! (matching asset, `downtime > 0` or both clock values present). Filtering
//! and counting happen in a single pass over the one loaded collection.

use crate::libs::incident::RawActivityRecord;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<RawActivityRecord>,
}

/// Records selected for one asset, with the size of the collection they
/// were selected from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetRecords {
    pub fetched: usize,
    pub records: Vec<RawActivityRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<RawActivityRecord>) -> Self {
        Self { records }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| msg_error_anyhow!(Message::RecordsFileReadFailed(display.clone(), e.to_string())))?;
        let records: Vec<RawActivityRecord> = serde_json::from_str(&content)
            .map_err(|e| msg_error_anyhow!(Message::RecordsFileParseFailed(display, e.to_string())))?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn for_asset(&self, asset_id: &str) -> AssetRecords {
        let asset_id = asset_id.trim();
        let records = self
            .records
            .iter()
            .filter(|record| record.asset_id.trim() == asset_id && record.is_downtime_candidate())
            .cloned()
            .collect();

        AssetRecords {
            fetched: self.records.len(),
            records,
        }
    }
}
