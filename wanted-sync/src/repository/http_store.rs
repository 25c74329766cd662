//! HTTP Repositories
//!
//! json-server backed local store and the FBI list endpoint.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use url::Url;

use super::traits::{RemoteSource, Repository, SnapshotRepository};
use crate::domain::{
    is_marker_id, DomainError, DomainResult, RemotePage, StoreSnapshot, SyncState, WantedFields,
    WantedRecord, SYNC_MARKER_ID,
};
use crate::http;

/// Local store reached over HTTP.
///
/// The collection also holds the sync marker; record operations never
/// read or write it.
#[derive(Clone)]
pub struct HttpWantedRepository {
    client: Client,
    base: Url,
}

impl HttpWantedRepository {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    /// `{base}/{id}` with the id percent-encoded as a path segment
    fn record_url(&self, id: &str) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url.to_string()
    }
}

#[async_trait]
impl Repository<WantedRecord> for HttpWantedRepository {
    async fn create(&self, draft: &WantedFields) -> DomainResult<WantedRecord> {
        let created = http::send_json(&self.client, Method::POST, self.base.as_str(), draft).await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<WantedRecord>> {
        if is_marker_id(id) {
            return Ok(None);
        }
        match http::try_fetch_json(&self.client, &self.record_url(id)).await {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> DomainResult<Vec<WantedRecord>> {
        Ok(self.snapshot().await?.persons)
    }

    async fn update(&self, entity: &WantedRecord) -> DomainResult<WantedRecord> {
        if is_marker_id(&entity.id) {
            return Err(DomainError::NotFound(format!("record {}", entity.id)));
        }
        let url = self.record_url(&entity.id);
        match http::send_json(&self.client, Method::PUT, &url, entity).await {
            Ok(updated) => Ok(updated),
            Err(e) if e.is_not_found() => Err(DomainError::NotFound(format!("record {}", entity.id))),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        if is_marker_id(id) {
            return Err(DomainError::NotFound(format!("record {}", id)));
        }
        match http::send_empty(&self.client, Method::DELETE, &self.record_url(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Err(DomainError::NotFound(format!("record {}", id))),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SnapshotRepository for HttpWantedRepository {
    async fn snapshot(&self) -> DomainResult<StoreSnapshot> {
        let payload: Value = http::try_fetch_json(&self.client, self.base.as_str()).await?;
        Ok(StoreSnapshot::decode(payload)?)
    }

    async fn record_sync_date(&self, date: NaiveDate, previous: &StoreSnapshot) -> DomainResult<()> {
        let state = SyncState::new(date);
        let marker = json!({
            "id": SYNC_MARKER_ID,
            "lastUpdated": state.last_updated,
        });

        let _: Value = if previous.has_marker {
            let url = self.record_url(SYNC_MARKER_ID);
            http::send_json(&self.client, Method::PUT, &url, &marker).await?
        } else {
            http::send_json(&self.client, Method::POST, self.base.as_str(), &marker).await?
        };

        Ok(())
    }
}

/// The FBI Wanted list endpoint
#[derive(Clone)]
pub struct HttpRemoteSource {
    client: Client,
    base: Url,
}

impl HttpRemoteSource {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    /// `{base}?page=N`, replacing any `page` already in the base query
    pub fn page_url(&self, page: u32) -> String {
        let mut url = self.base.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "page")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("page", &page.to_string());
        url.to_string()
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch_page(&self, page: u32) -> Option<RemotePage> {
        http::fetch_json(&self.client, &self.page_url(page)).await
    }
}
