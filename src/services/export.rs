// src/services/export.rs

//! CSV export of the current result set.

use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::FacultyRecord;

/// Fixed column order.
pub const HEADER: [&str; 8] = [
    "Name",
    "Designation",
    "School",
    "Department",
    "Email",
    "Phone",
    "Cabin Location",
    "Experience",
];

/// Render records as CSV: every field double-quoted, rows joined by `\n`.
///
/// The dataset carries no experience data, so that column is always empty.
pub fn to_csv(records: &[&FacultyRecord]) -> String {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(row(HEADER));

    for record in records {
        let designation = record.designation.to_string();
        rows.push(row([
            record.name.as_str(),
            designation.as_str(),
            record.school.as_str(),
            record.department.as_str(),
            record.email.as_str(),
            record.phone.as_str(),
            record.cabin_location.as_str(),
            "",
        ]));
    }

    rows.join("\n")
}

fn row<const N: usize>(fields: [&str; N]) -> String {
    fields
        .iter()
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write records as CSV to `path` (temp file, then rename). Returns the
/// number of data rows written.
pub async fn write_csv(path: impl AsRef<Path>, records: &[&FacultyRecord]) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = path.with_extension("tmp");
    if let Err(e) = write_then_rename(&tmp, path, to_csv(records).as_bytes()).await {
        if tokio::fs::remove_file(&tmp).await.is_ok() {
            log::debug!("Removed partial export {}", tmp.display());
        }
        return Err(e);
    }
    log::info!("Exported {} records to {}", records.len(), path.display());
    Ok(records.len())
}

async fn write_then_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = tokio::fs::File::create(tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);
    tokio::fs::rename(tmp, path).await?;
    Ok(())
}
