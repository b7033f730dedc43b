//! Freshness-window caching over the verification store.
//!
//! A stored record short-circuits a verification run only while it is fresh:
//! `checked_at ≥ now − cache_duration`. Stale records and store read
//! failures both degrade to a cache miss, so a cache outage forces
//! re-verification instead of blocking it.

use chrono::{DateTime, Duration, Utc};

use crate::store::VerificationStore;
use crate::types::VerificationRecord;

/// Whether a stored record still falls inside the freshness window.
pub fn is_fresh(record: &VerificationRecord, now: DateTime<Utc>, max_age_days: i64) -> bool {
    record.checked_at >= now - Duration::days(max_age_days)
}

/// Look up a fresh cached record for the pair.
///
/// Returns `Some(record)` only when the store holds a record within the
/// freshness window. Store read errors are logged at warn level and treated
/// as a miss.
pub async fn fresh_lookup<P: VerificationStore>(
    store: &P,
    broker_id: u64,
    country_slug: &str,
    max_age_days: i64,
    now: DateTime<Utc>,
) -> Option<VerificationRecord> {
    match store.fetch(broker_id, country_slug).await {
        Ok(Some(record)) if is_fresh(&record, now, max_age_days) => Some(record),
        Ok(Some(record)) => {
            tracing::debug!(
                broker_id,
                country_slug,
                checked_at = %record.checked_at,
                "cached verification is stale"
            );
            None
        }
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(
                broker_id,
                country_slug,
                error = %err,
                "cache lookup failed, treating as miss"
            );
            None
        }
    }
}
