//! Persistence capability: verification record upserts and the audit log.
//!
//! The store is the only shared mutable resource in the system. Writes are
//! upserts keyed by the (broker, country) pair, so concurrent verification
//! of distinct pairs never contends. [`MemoryStore`] is the bundled
//! implementation, backed by a [`moka`] cache plus an append-only audit
//! vector.

use std::sync::Mutex;

use moka::future::Cache;

use crate::error::VerifyError;
use crate::types::{AuditLogEntry, VerificationRecord};

/// Maximum number of verification records the in-memory store retains.
const MAX_STORED_RECORDS: u64 = 10_000;

/// Upsert-plus-audit persistence for verification records.
///
/// `fetch` returns whatever is stored regardless of age; freshness is the
/// cache layer's concern, not the store's. Implementations must be
/// `Send + Sync`.
pub trait VerificationStore: Send + Sync {
    /// Fetch the stored record for a pair, if any.
    fn fetch(
        &self,
        broker_id: u64,
        country_slug: &str,
    ) -> impl std::future::Future<Output = Result<Option<VerificationRecord>, VerifyError>> + Send;

    /// Insert or overwrite the record for its (broker, country) pair.
    fn upsert(
        &self,
        record: &VerificationRecord,
    ) -> impl std::future::Future<Output = Result<(), VerifyError>> + Send;

    /// Append one audit entry. Append-only; never read back by this crate.
    fn append_audit(
        &self,
        entry: &AuditLogEntry,
    ) -> impl std::future::Future<Output = Result<(), VerifyError>> + Send;
}

/// In-memory store for development, demos, and tests.
pub struct MemoryStore {
    records: Cache<(u64, String), VerificationRecord>,
    audit_log: Mutex<Vec<AuditLogEntry>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Cache::builder().max_capacity(MAX_STORED_RECORDS).build(),
            audit_log: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the audit log, oldest first.
    pub fn audit_entries(&self) -> Vec<AuditLogEntry> {
        self.audit_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VerificationStore for MemoryStore {
    async fn fetch(
        &self,
        broker_id: u64,
        country_slug: &str,
    ) -> Result<Option<VerificationRecord>, VerifyError> {
        Ok(self.records.get(&(broker_id, country_slug.to_owned())).await)
    }

    async fn upsert(&self, record: &VerificationRecord) -> Result<(), VerifyError> {
        self.records
            .insert(
                (record.broker_id, record.country_slug.clone()),
                record.clone(),
            )
            .await;
        Ok(())
    }

    async fn append_audit(&self, entry: &AuditLogEntry) -> Result<(), VerifyError> {
        self.audit_log
            .lock()
            .map_err(|_| VerifyError::AuditLog("audit log mutex poisoned".into()))?
            .push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Availability, CheckedBy, ConfidenceLevel};
    use chrono::Utc;

    fn make_record(broker_id: u64, country_slug: &str) -> VerificationRecord {
        VerificationRecord {
            broker_id,
            country_id: format!("c-{country_slug}"),
            country_slug: country_slug.to_owned(),
            available: Availability::Available,
            confidence_level: ConfidenceLevel::Low,
            evidence_urls: vec![],
            evidence_summary: String::new(),
            search_queries: vec![],
            checked_at: Utc::now(),
            checked_by: CheckedBy::Auto,
        }
    }

    #[tokio::test]
    async fn fetch_missing_pair_returns_none() {
        let store = MemoryStore::new();
        let record = store.fetch(1, "france").await.expect("fetch");
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn upsert_then_fetch_round_trips() {
        let store = MemoryStore::new();
        store.upsert(&make_record(1, "france")).await.expect("upsert");

        let fetched = store.fetch(1, "france").await.expect("fetch");
        let fetched = fetched.expect("present");
        assert_eq!(fetched.broker_id, 1);
        assert_eq!(fetched.country_slug, "france");
    }

    #[tokio::test]
    async fn upsert_overwrites_existing_pair() {
        let store = MemoryStore::new();
        store.upsert(&make_record(1, "france")).await.expect("upsert");

        let mut updated = make_record(1, "france");
        updated.available = Availability::Unavailable;
        store.upsert(&updated).await.expect("upsert");

        let fetched = store.fetch(1, "france").await.expect("fetch").expect("present");
        assert_eq!(fetched.available, Availability::Unavailable);
    }

    #[tokio::test]
    async fn pairs_are_stored_independently() {
        let store = MemoryStore::new();
        store.upsert(&make_record(1, "france")).await.expect("upsert");
        store.upsert(&make_record(1, "germany")).await.expect("upsert");
        store.upsert(&make_record(2, "france")).await.expect("upsert");

        assert!(store.fetch(1, "france").await.expect("fetch").is_some());
        assert!(store.fetch(1, "germany").await.expect("fetch").is_some());
        assert!(store.fetch(2, "france").await.expect("fetch").is_some());
        assert!(store.fetch(2, "germany").await.expect("fetch").is_none());
    }

    #[tokio::test]
    async fn audit_entries_append_in_order() {
        let store = MemoryStore::new();
        for i in 0..3 {
            let entry = AuditLogEntry {
                broker_id: i,
                country_id: "c-fr".into(),
                search_engine: "fixture".into(),
                query_used: String::new(),
                results_found: 0,
                result_urls: vec![],
                result_snippets: vec![],
                processing_time_ms: 0,
                success: true,
            };
            store.append_audit(&entry).await.expect("append");
        }

        let entries = store.audit_entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].broker_id, 0);
        assert_eq!(entries[2].broker_id, 2);
    }
}
