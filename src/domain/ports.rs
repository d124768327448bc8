use crate::domain::model::{BoxRecord, NewBox};
use crate::utils::error::Result;

/// Record store the shipping service persists boxes into.
///
/// Stores own identity and timestamps: `insert` assigns both, and
/// `list_all` returns records newest first.
pub trait BoxStore: Send + Sync {
    fn insert(&self, payload: NewBox) -> impl std::future::Future<Output = Result<BoxRecord>> + Send;
    fn list_all(&self) -> impl std::future::Future<Output = Result<Vec<BoxRecord>>> + Send;
}

/// Orders records by creation time, most recent first.
pub fn sort_newest_first(records: &mut [BoxRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
