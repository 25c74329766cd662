//! Wanted Record Commands
//!
//! User actions against the local store: browse, edit details, delete.
//! Errors come back as display strings for the front-end.

use crate::domain::{filter_records, WantedRecord};
use crate::repository::Repository;

/// List records, optionally filtered by a search term
pub async fn list_wanted<R>(repo: &R, search: Option<&str>) -> Result<Vec<WantedRecord>, String>
where
    R: Repository<WantedRecord> + ?Sized,
{
    let records = repo.list().await.map_err(|e| e.to_string())?;
    Ok(match search {
        Some(term) => filter_records(&records, term).into_iter().cloned().collect(),
        None => records,
    })
}

/// Get record by ID
pub async fn get_wanted<R>(repo: &R, id: &str) -> Result<Option<WantedRecord>, String>
where
    R: Repository<WantedRecord> + ?Sized,
{
    repo.find_by_id(&id.to_string()).await.map_err(|e| e.to_string())
}

/// Apply `(field, value)` edits to a record and save the whole record
pub async fn update_wanted<R>(
    repo: &R,
    id: &str,
    edits: &[(String, String)],
) -> Result<WantedRecord, String>
where
    R: Repository<WantedRecord> + ?Sized,
{
    // First get existing record
    let mut record = repo
        .find_by_id(&id.to_string())
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Record {} not found", id))?;

    for (field, value) in edits {
        record.apply_edit(field, value).map_err(|e| e.to_string())?;
    }

    repo.update(&record).await.map_err(|e| e.to_string())
}

/// Delete record
pub async fn delete_wanted<R>(repo: &R, id: &str) -> Result<(), String>
where
    R: Repository<WantedRecord> + ?Sized,
{
    repo.delete(&id.to_string()).await.map_err(|e| e.to_string())
}

/// Split `field=value` into its parts
pub fn parse_edit(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Expected field=value, got '{}'", raw)),
    }
}
