//! Sync State
//!
//! The local store remembers the calendar day of its last successful sync.
//! A populated store is re-synced at most once per day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::snapshot::StoreSnapshot;

/// Id of the synthetic record that carries the sync date in collection layout
pub const SYNC_MARKER_ID: &str = "check";

/// Date format used on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Body written to the store after a sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncState {
    #[serde(rename = "lastUpdated")]
    pub last_updated: NaiveDate,
}

impl SyncState {
    pub fn new(last_updated: NaiveDate) -> Self {
        Self { last_updated }
    }
}

/// A stored date that is missing or not today is stale
pub fn is_stale(stored: Option<NaiveDate>, today: NaiveDate) -> bool {
    stored != Some(today)
}

/// An empty store always syncs, whatever its date says
pub fn needs_sync(snapshot: &StoreSnapshot, today: NaiveDate) -> bool {
    snapshot.persons.is_empty() || is_stale(snapshot.last_updated, today)
}

/// Parse a stored date. Full timestamps are cut to their day.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.split('T').next().unwrap_or(raw).trim();
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}
