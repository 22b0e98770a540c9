//! CSV export of analysis history.
//!
//! The file is written to a temp file in the target directory and renamed
//! into place, so a reader never sees a half-written export.

use crate::{AnalysisRecord, Error, Result};
use std::path::Path;
use tempfile::NamedTempFile;

/// Column names of `CsvRow`, in field order
const CSV_HEADERS: [&str; 15] = [
    "id",
    "user",
    "created_at",
    "age",
    "gender",
    "activity_level",
    "weight",
    "height",
    "bust",
    "waist",
    "hip",
    "bmi",
    "bmi_status",
    "whr",
    "body_shape",
];

/// A row in the CSV output (workout plan omitted)
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    user: String,
    created_at: String,
    age: u32,
    gender: String,
    activity_level: String,
    weight: f64,
    height: f64,
    bust: f64,
    waist: f64,
    hip: f64,
    bmi: f64,
    bmi_status: String,
    whr: f64,
    body_shape: String,
}

impl From<&AnalysisRecord> for CsvRow {
    fn from(record: &AnalysisRecord) -> Self {
        let m = &record.measurement;
        let r = &record.result;
        CsvRow {
            id: record.id.to_string(),
            user: record.user.clone(),
            created_at: record.created_at.to_rfc3339(),
            age: m.age,
            gender: enum_name(&m.gender),
            activity_level: enum_name(&m.activity_level),
            weight: m.weight,
            height: m.height,
            bust: m.bust,
            waist: m.waist,
            hip: m.hip,
            bmi: r.bmi,
            bmi_status: r.bmi_status.to_string(),
            whr: r.whr,
            body_shape: r.body_shape.to_string(),
        }
    }
}

/// Serde name of a unit enum variant
fn enum_name<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Write records to `path` as CSV, replacing any existing file
///
/// Returns the number of rows written.
pub fn export_csv(records: &[AnalysisRecord], path: &Path) -> Result<usize> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::Writer::from_writer(temp.as_file());
        // serialize() only emits headers alongside the first row
        if records.is_empty() {
            writer.write_record(CSV_HEADERS)?;
        }
        for record in records {
            writer.serialize(CsvRow::from(record))?;
        }
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} records to {:?}", records.len(), path);
    Ok(records.len())
}
