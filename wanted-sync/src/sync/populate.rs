//! Populate Routine
//!
//! Turns external items into create requests against the local store. A
//! failing item is logged and reported; it never stops the rest of the page.

use futures::future::join_all;
use serde_json::Value;

use super::report::{PopulateFailure, PopulateReport};
use crate::config::PopulateMode;
use crate::domain::{RemoteItem, WantedRecord};
use crate::repository::Repository;

const UNTITLED: &str = "<untitled>";

/// Map one external item and create it in the store
pub async fn populate<S>(store: &S, raw: Value) -> Result<WantedRecord, PopulateFailure>
where
    S: Repository<WantedRecord> + ?Sized,
{
    let title = raw
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(UNTITLED)
        .to_string();

    let item = RemoteItem::decode(raw).map_err(|e| {
        log::error!("Skipping malformed item {}: {}", title, e);
        PopulateFailure {
            title: title.clone(),
            error: e.to_string(),
        }
    })?;

    store.create(&item.into_draft()).await.map_err(|e| {
        log::error!("Error sending data for {}: {}", title, e);
        PopulateFailure {
            title,
            error: e.to_string(),
        }
    })
}

/// Populate every item of one page
pub async fn populate_page<S>(store: &S, items: Vec<Value>, mode: PopulateMode) -> PopulateReport
where
    S: Repository<WantedRecord> + ?Sized,
{
    let mut report = PopulateReport::default();

    match mode {
        PopulateMode::Sequential => {
            for raw in items {
                report.push(populate(store, raw).await);
            }
        }
        PopulateMode::Concurrent => {
            let results = join_all(items.into_iter().map(|raw| populate(store, raw))).await;
            for result in results {
                report.push(result);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory_store::MemoryWantedStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_populate_drops_external_id() {
        let store = MemoryWantedStore::new();
        let record = populate(
            &store,
            json!({"uid": "fbi-1", "id": "fbi-1", "title": "A", "url": "u"}),
        )
        .await
        .unwrap();

        assert_eq!(record.id, "1");
        assert_eq!(record.fields.title, "A");
    }

    #[tokio::test]
    async fn test_failed_item_does_not_stop_page() {
        let store = MemoryWantedStore::new().rejecting("B");
        let items = vec![
            json!({"title": "A"}),
            json!({"title": "B"}),
            json!({"title": "C"}),
        ];

        for mode in [PopulateMode::Sequential, PopulateMode::Concurrent] {
            let report = populate_page(&store, items.clone(), mode).await;
            let titles: Vec<_> = report.succeeded.iter().map(|r| r.fields.title.as_str()).collect();
            assert_eq!(titles, vec!["A", "C"]);
            assert_eq!(report.failed.len(), 1);
            assert_eq!(report.failed[0].title, "B");
        }
    }

    #[tokio::test]
    async fn test_malformed_item_is_reported_without_write() {
        let store = MemoryWantedStore::new();
        let report = populate_page(
            &store,
            vec![json!({"title": "Bad", "images": "not-a-list"}), json!(42)],
            PopulateMode::Sequential,
        )
        .await;

        assert!(report.succeeded.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].title, "Bad");
        assert_eq!(report.failed[1].title, UNTITLED);
        assert_eq!(store.write_count(), 0);
    }
}
