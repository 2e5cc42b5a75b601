//! Launch record store
//!
//! The store is an explicitly constructed, dependency-injected handle; the
//! keeper assumes a single writer with read-after-write consistency. The
//! processed set grows monotonically and is never pruned here.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use launchpad_types::{LaunchRecord, LaunchResult};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upsert a record keyed by its source event id.
    async fn save(&self, record: LaunchRecord) -> LaunchResult<()>;

    async fn get(&self, event_id: &str) -> LaunchResult<Option<LaunchRecord>>;

    /// Records for a wallet (case-insensitive), optionally bounded below by
    /// creation time.
    async fn by_wallet(
        &self,
        wallet: &str,
        since: Option<DateTime<Utc>>,
    ) -> LaunchResult<Vec<LaunchRecord>>;

    async fn all(&self) -> LaunchResult<Vec<LaunchRecord>>;

    /// Add an event id to the processed set. Must complete before any side
    /// effect of processing that event.
    async fn mark_processed(&self, event_id: &str) -> LaunchResult<()>;

    async fn is_processed(&self, event_id: &str) -> LaunchResult<bool>;
}

#[derive(Default)]
struct MemoryStoreInner {
    launches: HashMap<String, LaunchRecord>,
    processed: HashSet<String>,
}

/// In-memory store. Durable backends live behind the same trait.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn save(&self, record: LaunchRecord) -> LaunchResult<()> {
        let mut inner = self.inner.write().await;
        inner.launches.insert(record.event_id.clone(), record);
        Ok(())
    }

    async fn get(&self, event_id: &str) -> LaunchResult<Option<LaunchRecord>> {
        Ok(self.inner.read().await.launches.get(event_id).cloned())
    }

    async fn by_wallet(
        &self,
        wallet: &str,
        since: Option<DateTime<Utc>>,
    ) -> LaunchResult<Vec<LaunchRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .launches
            .values()
            .filter(|r| r.wallet.eq_ignore_ascii_case(wallet))
            .filter(|r| since.map_or(true, |s| r.created_at >= s))
            .cloned()
            .collect())
    }

    async fn all(&self) -> LaunchResult<Vec<LaunchRecord>> {
        Ok(self.inner.read().await.launches.values().cloned().collect())
    }

    async fn mark_processed(&self, event_id: &str) -> LaunchResult<()> {
        let mut inner = self.inner.write().await;
        inner.processed.insert(event_id.to_string());
        Ok(())
    }

    async fn is_processed(&self, event_id: &str) -> LaunchResult<bool> {
        Ok(self.inner.read().await.processed.contains(event_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use launchpad_types::LaunchStatus;

    fn record(event_id: &str, wallet: &str, created_at: DateTime<Utc>) -> LaunchRecord {
        LaunchRecord {
            event_id: event_id.to_string(),
            event_url: format!("https://example.com/{event_id}"),
            author_handle: "someone".into(),
            author_id: "1".into(),
            name: "Token".into(),
            symbol: "TKN".into(),
            wallet: wallet.to_string(),
            token_address: None,
            tx_hash: None,
            status: LaunchStatus::Processing,
            error: None,
            created_at,
            launched_at: None,
        }
    }

    #[tokio::test]
    async fn save_and_get_round_trip() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.save(record("1", "0xabc", now)).await.unwrap();
        let loaded = store.get("1").await.unwrap().unwrap();
        assert_eq!(loaded.event_id, "1");
        assert!(store.get("2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn by_wallet_is_case_insensitive_and_windowed() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.save(record("1", "0xABCDEF", now)).await.unwrap();
        store
            .save(record("2", "0xabcdef", now - Duration::hours(48)))
            .await
            .unwrap();

        let all = store.by_wallet("0xAbCdEf", None).await.unwrap();
        assert_eq!(all.len(), 2);

        let recent = store
            .by_wallet("0xabcdef", Some(now - Duration::hours(24)))
            .await
            .unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].event_id, "1");
    }

    #[tokio::test]
    async fn processed_set_is_monotonic() {
        let store = MemoryStore::new();
        assert!(!store.is_processed("9").await.unwrap());
        store.mark_processed("9").await.unwrap();
        assert!(store.is_processed("9").await.unwrap());
        // Marking again is a no-op, not an error.
        store.mark_processed("9").await.unwrap();
        assert!(store.is_processed("9").await.unwrap());
    }
}
