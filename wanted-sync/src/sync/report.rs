//! Sync results handed back to callers instead of only being logged.

use serde::Serialize;

use crate::domain::WantedRecord;

/// A record the local store did not accept
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulateFailure {
    pub title: String,
    pub error: String,
}

/// Outcome of populating one page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PopulateReport {
    pub succeeded: Vec<WantedRecord>,
    pub failed: Vec<PopulateFailure>,
}

impl PopulateReport {
    pub fn push(&mut self, result: Result<WantedRecord, PopulateFailure>) {
        match result {
            Ok(record) => self.succeeded.push(record),
            Err(failure) => self.failed.push(failure),
        }
    }
}

/// Outcome of a full sync run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    /// Pages that answered, in fetch order
    pub pages_fetched: Vec<u32>,
    /// Pages that failed and contributed nothing
    pub skipped_pages: Vec<u32>,
    pub succeeded: Vec<WantedRecord>,
    pub failed: Vec<PopulateFailure>,
    pub sync_date_recorded: bool,
}

impl SyncReport {
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub(crate) fn absorb(&mut self, page: PopulateReport) {
        self.succeeded.extend(page.succeeded);
        self.failed.extend(page.failed);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Store was populated and synced today; nothing written
    UpToDate { records: usize },
    Synced(SyncReport),
    /// The store could not be read, so no sync was attempted
    Aborted { reason: String },
}

impl SyncOutcome {
    pub fn report(&self) -> Option<&SyncReport> {
        match self {
            SyncOutcome::Synced(report) => Some(report),
            _ => None,
        }
    }
}

/// What bootstrap hands to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapReport {
    pub outcome: SyncOutcome,
    pub records: Vec<WantedRecord>,
}
