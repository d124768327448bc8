use crate::domain::model::{BoxRecord, NewBox};
use crate::domain::ports::{sort_newest_first, BoxStore};
use crate::utils::error::Result;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<BoxRecord>,
    next_id: u64,
    last_created: Option<DateTime<Utc>>,
}

/// In-process store. Ids are sequential and timestamps strictly increase.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl BoxStore for MemoryStore {
    async fn insert(&self, payload: NewBox) -> Result<BoxRecord> {
        let mut state = self.state.lock().await;

        state.next_id += 1;
        let id = format!("box-{:06}", state.next_id);
        let created_at = next_timestamp(state.last_created);
        state.last_created = Some(created_at);

        let record = BoxRecord::from_new(payload, id, created_at);
        state.records.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<BoxRecord>> {
        let mut records = self.state.lock().await.records.clone();
        sort_newest_first(&mut records);
        Ok(records)
    }
}

// Microsecond resolution, strictly after `last`.
pub(crate) fn next_timestamp(last: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now().trunc_subsecs(6);
    match last {
        Some(previous) if now <= previous => previous + Duration::microseconds(1),
        _ => now,
    }
}
