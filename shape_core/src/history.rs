//! Per-user analysis history.

use crate::{AnalysisRecord, Error, Result};
use std::path::Path;
use uuid::Uuid;

/// Load one user's records, newest first
///
/// `limit` caps the number of records returned.
pub fn load_history(path: &Path, user: &str, limit: Option<usize>) -> Result<Vec<AnalysisRecord>> {
    let mut records: Vec<AnalysisRecord> = crate::store::read_records(path)?
        .into_iter()
        .filter(|r| r.user == user)
        .collect();

    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if let Some(limit) = limit {
        records.truncate(limit);
    }

    tracing::info!("Loaded {} records for user {}", records.len(), user);
    Ok(records)
}

/// Find a single record by id
pub fn find_record(path: &Path, id: Uuid) -> Result<AnalysisRecord> {
    crate::store::read_records(path)?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| Error::NotFound(format!("analysis {}", id)))
}
