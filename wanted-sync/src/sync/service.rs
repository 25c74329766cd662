//! Sync Service
//!
//! Check-then-sync against the local store:
//! 1. read the store snapshot (failure aborts the attempt)
//! 2. stop if the store is populated and was synced today
//! 3. walk the remote pages one at a time with a fixed delay between them
//! 4. remember today's date once something was created

use std::time::Duration;

use chrono::NaiveDate;

use super::populate::populate_page;
use super::report::{BootstrapReport, SyncOutcome, SyncReport};
use crate::config::{AppConfig, PopulateMode};
use crate::domain::{needs_sync, RemotePage, StoreSnapshot};
use crate::repository::{RemoteSource, SnapshotRepository};

/// How a sync walks the remote source
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPolicy {
    pub page_count: u32,
    pub page_delay: Duration,
    /// Extra attempts for a failed page; 0 skips it straight away
    pub page_retries: u32,
    pub populate_mode: PopulateMode,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for SyncPolicy {
    fn from(config: &AppConfig) -> Self {
        Self {
            page_count: config.page_count,
            page_delay: config.page_delay(),
            page_retries: config.page_retries,
            populate_mode: config.populate_mode,
        }
    }
}

pub struct SyncService<S, R> {
    store: S,
    remote: R,
    policy: SyncPolicy,
}

impl<S, R> SyncService<S, R>
where
    S: SnapshotRepository,
    R: RemoteSource,
{
    pub fn new(store: S, remote: R, policy: SyncPolicy) -> Self {
        Self {
            store,
            remote,
            policy,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &SyncPolicy {
        &self.policy
    }

    /// Sync from the remote source unless the store is populated and fresh
    pub async fn sync_if_stale(&self, today: NaiveDate) -> SyncOutcome {
        let snapshot = match self.store.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("Could not read the local store, sync aborted: {}", e);
                return SyncOutcome::Aborted {
                    reason: e.to_string(),
                };
            }
        };

        if !needs_sync(&snapshot, today) {
            log::info!(
                "{} items loaded from the database, up to date",
                snapshot.persons.len()
            );
            return SyncOutcome::UpToDate {
                records: snapshot.persons.len(),
            };
        }

        log::info!("fetching data from FBI API...");
        SyncOutcome::Synced(self.run_sync(&snapshot, today).await)
    }

    /// Fetch every configured page and populate the store, without any
    /// staleness check. Records already in the store are not deduplicated.
    pub async fn run_sync(&self, snapshot: &StoreSnapshot, today: NaiveDate) -> SyncReport {
        let mut report = SyncReport::default();

        for page in 1..=self.policy.page_count {
            if page > 1 {
                self.pause().await;
            }

            let Some(remote_page) = self.fetch_page(page).await else {
                report.skipped_pages.push(page);
                continue;
            };
            report.pages_fetched.push(page);

            match remote_page.items {
                Some(items) => {
                    log::debug!("Page {}: {} items", page, items.len());
                    let page_report =
                        populate_page(&self.store, items, self.policy.populate_mode).await;
                    report.absorb(page_report);
                }
                None => log::warn!("Page {} has no items list", page),
            }
        }

        if report.success_count() > 0 {
            match self.store.record_sync_date(today, snapshot).await {
                Ok(()) => report.sync_date_recorded = true,
                Err(e) => log::error!("Could not record sync date: {}", e),
            }
        }

        log::info!(
            "{} items added to the database ({} failed, {} pages skipped)",
            report.success_count(),
            report.failed.len(),
            report.skipped_pages.len()
        );
        report
    }

    /// Check-then-sync, then load what the view should show
    pub async fn bootstrap(&self, today: NaiveDate) -> BootstrapReport {
        let outcome = self.sync_if_stale(today).await;

        let records = match self.store.list().await {
            Ok(records) => records,
            Err(e) => {
                log::error!("There has been a problem loading wanted people: {}", e);
                Vec::new()
            }
        };

        BootstrapReport { outcome, records }
    }

    /// `None` once every attempt came back empty
    async fn fetch_page(&self, page: u32) -> Option<RemotePage> {
        let attempts = self.policy.page_retries + 1;

        for attempt in 1..=attempts {
            if let Some(remote_page) = self.remote.fetch_page(page).await {
                return Some(remote_page);
            }
            if attempt < attempts {
                log::warn!("Page {} attempt {}/{} failed, retrying", page, attempt, attempts);
                self.pause().await;
            }
        }

        log::warn!("Skipping page {}", page);
        None
    }

    async fn pause(&self) {
        if !self.policy.page_delay.is_zero() {
            tokio::time::sleep(self.policy.page_delay).await;
        }
    }
}
