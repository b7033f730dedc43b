//! Single-pair verification runs.

use chrono::Utc;
use std::time::Instant;

use crate::cache;
use crate::catalog::Catalog;
use crate::error::{Result, VerifyError};
use crate::evidence;
use crate::queries;
use crate::search::SearchProvider;
use crate::store::VerificationStore;
use crate::types::{AuditLogEntry, CheckedBy, SearchResult, VerificationRecord};

use super::Verifier;

impl<C, S, P> Verifier<C, S, P>
where
    C: Catalog,
    S: SearchProvider,
    P: VerificationStore,
{
    /// Verify whether a broker accepts clients from a country.
    ///
    /// Unless `force_refresh` is set, a fresh cached record short-circuits
    /// the run. Otherwise the broker and country are resolved concurrently,
    /// the capped query set is issued sequentially through the pacer, the
    /// accumulated results are analyzed, and the verdict is persisted with
    /// `checked_by = auto` plus a best-effort audit entry.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::NotFound`] when the broker or country cannot
    /// be resolved, and [`VerifyError::Persistence`] when the verdict upsert
    /// fails. Individual search failures and audit log failures degrade
    /// instead of aborting.
    pub async fn verify(
        &self,
        broker_id: u64,
        country_slug: &str,
        force_refresh: bool,
    ) -> Result<VerificationRecord> {
        if !force_refresh {
            if let Some(cached) = cache::fresh_lookup(
                &self.store,
                broker_id,
                country_slug,
                self.config.cache_duration_days,
                Utc::now(),
            )
            .await
            {
                tracing::debug!(broker_id, country_slug, "returning fresh cached verification");
                return Ok(cached);
            }
        }

        let (broker, country) = futures::try_join!(
            self.catalog.broker(broker_id),
            self.catalog.country(country_slug)
        )?;
        let broker = broker.ok_or_else(|| VerifyError::NotFound(format!("broker {broker_id}")))?;
        let country =
            country.ok_or_else(|| VerifyError::NotFound(format!("country {country_slug}")))?;

        let started = Instant::now();
        let queries: Vec<String> = queries::generate_queries(&broker.name, &country.name)
            .into_iter()
            .take(self.config.max_queries_per_run)
            .collect();

        let mut results: Vec<SearchResult> = Vec::new();
        for query in &queries {
            self.pacer.pace().await;
            match self.search.search(query).await {
                Ok(found) => {
                    tracing::debug!(query = %query, count = found.len(), "search query returned");
                    results.extend(found);
                }
                Err(err) => {
                    tracing::warn!(query = %query, error = %err, "search query failed, continuing");
                }
            }
        }

        let verdict = evidence::analyze(&results, &broker.name, &country.name);
        let record = VerificationRecord {
            broker_id,
            country_id: country.id.clone(),
            country_slug: country.slug.clone(),
            available: verdict.available,
            confidence_level: verdict.confidence_level,
            evidence_urls: verdict.evidence_urls,
            evidence_summary: verdict.evidence_summary,
            search_queries: queries.clone(),
            checked_at: Utc::now(),
            checked_by: CheckedBy::Auto,
        };

        self.store.upsert(&record).await?;

        let audit = AuditLogEntry {
            broker_id,
            country_id: record.country_id.clone(),
            search_engine: self.search.name().to_owned(),
            query_used: queries.join(" | "),
            results_found: record.evidence_urls.len(),
            result_urls: record.evidence_urls.clone(),
            result_snippets: vec![record.evidence_summary.clone()],
            processing_time_ms: started.elapsed().as_millis() as u64,
            success: true,
        };
        if let Err(err) = self.store.append_audit(&audit).await {
            tracing::warn!(broker_id, country_slug, error = %err, "audit log append failed");
        }

        tracing::info!(
            broker_id,
            country_slug,
            available = ?record.available.as_option(),
            confidence = %record.confidence_level,
            queries = record.search_queries.len(),
            "verification completed"
        );
        Ok(record)
    }
}
