//! In-memory repository and scripted remote source used by the sync tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};

use super::traits::{RemoteSource, Repository, SnapshotRepository};
use crate::domain::{
    DomainError, DomainResult, RemotePage, StoreSnapshot, WantedFields, WantedRecord,
};
use crate::http::FetchError;

#[derive(Default)]
struct MemoryState {
    records: Vec<WantedRecord>,
    last_updated: Option<NaiveDate>,
    next_id: u32,
}

/// Store that keeps records in a Vec and counts every call
#[derive(Default)]
pub struct MemoryWantedStore {
    state: Mutex<MemoryState>,
    /// Titles whose create request fails
    reject_titles: Vec<String>,
    pub snapshot_reads: AtomicUsize,
    pub writes: AtomicUsize,
    /// Keep answering with an empty snapshot whatever was written
    always_empty: bool,
    fail_snapshot: bool,
}

impl MemoryWantedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(records: Vec<WantedRecord>, last_updated: Option<NaiveDate>) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            state.next_id = records.len() as u32;
            state.records = records;
            state.last_updated = last_updated;
        }
        store
    }

    pub fn always_empty(mut self) -> Self {
        self.always_empty = true;
        self
    }

    pub fn failing_snapshot(mut self) -> Self {
        self.fail_snapshot = true;
        self
    }

    pub fn rejecting(mut self, title: &str) -> Self {
        self.reject_titles.push(title.to_string());
        self
    }

    pub fn records(&self) -> Vec<WantedRecord> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn last_updated(&self) -> Option<NaiveDate> {
        self.state.lock().unwrap().last_updated
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Repository<WantedRecord> for MemoryWantedStore {
    async fn create(&self, draft: &WantedFields) -> DomainResult<WantedRecord> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.reject_titles.contains(&draft.title) {
            return Err(DomainError::Internal(format!("store refused {}", draft.title)));
        }
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let record = WantedRecord::new(state.next_id.to_string(), draft.clone());
        state.records.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<WantedRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state.records.iter().find(|r| &r.id == id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<WantedRecord>> {
        Ok(self.snapshot().await?.persons)
    }

    async fn update(&self, entity: &WantedRecord) -> DomainResult<WantedRecord> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        let slot = state
            .records
            .iter_mut()
            .find(|r| r.id == entity.id)
            .ok_or_else(|| DomainError::NotFound(format!("record {}", entity.id)))?;
        *slot = entity.clone();
        Ok(entity.clone())
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        let before = state.records.len();
        state.records.retain(|r| &r.id != id);
        if state.records.len() == before {
            return Err(DomainError::NotFound(format!("record {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotRepository for MemoryWantedStore {
    async fn snapshot(&self) -> DomainResult<StoreSnapshot> {
        self.snapshot_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_snapshot {
            return Err(FetchError::Network {
                url: "memory://wanted".to_string(),
                message: "connection refused".to_string(),
            }
            .into());
        }
        let state = self.state.lock().unwrap();
        if self.always_empty {
            return Ok(StoreSnapshot::default());
        }
        Ok(StoreSnapshot {
            last_updated: state.last_updated,
            persons: state.records.clone(),
            has_marker: state.last_updated.is_some(),
        })
    }

    async fn record_sync_date(&self, date: NaiveDate, _previous: &StoreSnapshot) -> DomainResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap().last_updated = Some(date);
        Ok(())
    }
}

/// Remote source answering from a fixed script; pages not in the script
/// cannot be fetched
#[derive(Default)]
pub struct ScriptedRemote {
    pages: HashMap<u32, Vec<Option<RemotePage>>>,
    pub requests: Mutex<Vec<u32>>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page `page` answers with `count` items titled "P<page>-<n>"
    pub fn with_items(mut self, page: u32, count: usize) -> Self {
        let items = (1..=count)
            .map(|n| {
                json!({
                    "uid": format!("uid-{}-{}", page, n),
                    "title": format!("P{}-{}", page, n),
                    "url": format!("https://www.fbi.gov/wanted/p{}-{}", page, n),
                })
            })
            .collect();
        self.push(page, Some(page_of(items)));
        self
    }

    pub fn with_raw(mut self, page: u32, items: Vec<Value>) -> Self {
        self.push(page, Some(page_of(items)));
        self
    }

    pub fn with_failure(mut self, page: u32) -> Self {
        self.push(page, None);
        self
    }

    /// Answer `page` with each result in turn, repeating the last one
    fn push(&mut self, page: u32, result: Option<RemotePage>) {
        self.pages.entry(page).or_default().push(result);
    }

    pub fn requested(&self) -> Vec<u32> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for ScriptedRemote {
    async fn fetch_page(&self, page: u32) -> Option<RemotePage> {
        let attempt = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(page);
            requests.iter().filter(|p| **p == page).count() - 1
        };
        let results = self.pages.get(&page)?;
        results.get(attempt).or_else(|| results.last()).cloned().flatten()
    }
}

fn page_of(items: Vec<Value>) -> RemotePage {
    RemotePage {
        total: Some(items.len() as u64),
        items: Some(items),
        page: None,
    }
}
