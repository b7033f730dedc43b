//! Sequential batch verification with per-item failure isolation.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::VerifyError;
use crate::search::SearchProvider;
use crate::store::VerificationStore;
use crate::types::{Availability, CheckedBy, ConfidenceLevel, VerificationRecord};

use super::Verifier;

/// One (broker, country) pair to verify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationTarget {
    /// Catalog identifier of the broker.
    pub broker_id: u64,
    /// Slug of the country.
    pub country_slug: String,
}

impl<C, S, P> Verifier<C, S, P>
where
    C: Catalog,
    S: SearchProvider,
    P: VerificationStore,
{
    /// Verify a list of pairs sequentially.
    ///
    /// Always returns exactly one record per target, in input order. A
    /// failed item yields a placeholder record (`available = unknown`,
    /// `confidence = unknown`, `evidence_summary = "Verification failed:
    /// <reason>"`) instead of stopping the batch. Items share the run-level
    /// pacer, so external calls across consecutive pairs observe the same
    /// spacing as queries within one run.
    pub async fn verify_batch(
        &self,
        targets: &[VerificationTarget],
        force_refresh: bool,
    ) -> Vec<VerificationRecord> {
        let mut records = Vec::with_capacity(targets.len());

        for target in targets {
            match self
                .verify(target.broker_id, &target.country_slug, force_refresh)
                .await
            {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!(
                        broker_id = target.broker_id,
                        country_slug = %target.country_slug,
                        error = %err,
                        "batch item failed, recording placeholder"
                    );
                    records.push(failed_placeholder(target, &err));
                }
            }
        }

        records
    }
}

/// Build the placeholder record for a failed batch item.
fn failed_placeholder(target: &VerificationTarget, err: &VerifyError) -> VerificationRecord {
    VerificationRecord {
        broker_id: target.broker_id,
        country_id: String::new(),
        country_slug: target.country_slug.clone(),
        available: Availability::Unknown,
        confidence_level: ConfidenceLevel::Unknown,
        evidence_urls: Vec::new(),
        evidence_summary: format!("Verification failed: {err}"),
        search_queries: Vec::new(),
        checked_at: Utc::now(),
        checked_by: CheckedBy::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::config::VerifyConfig;
    use crate::search::FixtureSearch;
    use crate::store::MemoryStore;
    use crate::types::{Broker, Country};

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(
            vec![Broker {
                id: 1,
                name: "Acme FX".into(),
                website: None,
            }],
            vec![
                Country {
                    id: "c-fr".into(),
                    slug: "france".into(),
                    name: "France".into(),
                    iso2: "FR".into(),
                },
                Country {
                    id: "c-de".into(),
                    slug: "germany".into(),
                    name: "Germany".into(),
                    iso2: "DE".into(),
                },
            ],
        )
    }

    fn verifier() -> Verifier<StaticCatalog, FixtureSearch, MemoryStore> {
        let config = VerifyConfig {
            query_delay_ms: 0,
            ..Default::default()
        };
        Verifier::new(catalog(), FixtureSearch, MemoryStore::new(), config).expect("valid")
    }

    fn target(broker_id: u64, country_slug: &str) -> VerificationTarget {
        VerificationTarget {
            broker_id,
            country_slug: country_slug.to_owned(),
        }
    }

    #[tokio::test]
    async fn batch_preserves_length_and_order() {
        let verifier = verifier();
        let targets = vec![
            target(1, "france"),
            target(99, "france"),
            target(1, "germany"),
        ];

        let records = verifier.verify_batch(&targets, false).await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].country_slug, "france");
        assert_eq!(records[1].broker_id, 99);
        assert_eq!(records[2].country_slug, "germany");
    }

    #[tokio::test]
    async fn failed_item_becomes_placeholder_without_stopping_batch() {
        let verifier = verifier();
        let targets = vec![target(99, "france"), target(1, "germany")];

        let records = verifier.verify_batch(&targets, false).await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].available, Availability::Unknown);
        assert_eq!(records[0].confidence_level, ConfidenceLevel::Unknown);
        assert!(records[0]
            .evidence_summary
            .starts_with("Verification failed:"));
        assert!(records[0].search_queries.is_empty());
        // The second item still ran normally.
        assert!(!records[1].search_queries.is_empty());
    }

    #[tokio::test]
    async fn all_failing_batch_still_returns_one_record_per_target() {
        let verifier = verifier();
        let targets = vec![
            target(50, "nowhere"),
            target(51, "nowhere"),
            target(52, "nowhere"),
        ];

        let records = verifier.verify_batch(&targets, false).await;

        assert_eq!(records.len(), 3);
        for (record, target) in records.iter().zip(&targets) {
            assert_eq!(record.broker_id, target.broker_id);
            assert_eq!(record.available, Availability::Unknown);
        }
    }

    #[tokio::test]
    async fn empty_batch_returns_empty() {
        let verifier = verifier();
        let records = verifier.verify_batch(&[], false).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn verification_target_deserialises_from_wire_form() {
        let target: VerificationTarget =
            serde_json::from_str(r#"{"broker_id": 7, "country_slug": "japan"}"#)
                .expect("deserialize");
        assert_eq!(target.broker_id, 7);
        assert_eq!(target.country_slug, "japan");
    }
}
