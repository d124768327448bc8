use crate::adapters::memory::next_timestamp;
use crate::domain::model::{BoxRecord, NewBox};
use crate::domain::ports::{sort_newest_first, BoxStore};
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keeps every record in a single JSON array file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<BoxRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read(&self.path)?;
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&data)?)
    }

    fn write_records(&self, records: &[BoxRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_vec_pretty(records)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl BoxStore for JsonFileStore {
    async fn insert(&self, payload: NewBox) -> Result<BoxRecord> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records()?;

        // Timestamps never repeat within a file, so they double as ids.
        let created_at = next_timestamp(records.iter().map(|r| r.created_at).max());
        let id = format!("box-{}", created_at.timestamp_micros());
        let record = BoxRecord::from_new(payload, id, created_at);

        records.push(record.clone());
        self.write_records(&records)?;

        tracing::debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<BoxRecord>> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records()?;
        sort_newest_first(&mut records);
        Ok(records)
    }
}
