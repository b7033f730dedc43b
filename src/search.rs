//! Search gateway: the seam between verification and the external search
//! capability.
//!
//! The gateway is stateless per call and deliberately narrow: one query in,
//! a list of raw results out. Pacing between calls belongs to the
//! orchestrator, and a failed query is recovered there rather than aborting
//! the run. [`FixtureSearch`] is the bundled provider: it synthesises
//! results from the query text, which is enough for development, demos, and
//! deterministic tests.

use crate::error::VerifyError;
use crate::types::SearchResult;

/// A pluggable search capability.
///
/// Implementations wrap whatever actually answers queries: a search API, a
/// scraper, or canned fixtures. All implementations must be `Send + Sync`.
pub trait SearchProvider: Send + Sync {
    /// Issue one query and return the raw results.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::SearchUnavailable`] when the query cannot be
    /// served. The orchestrator logs the failure and continues with fewer
    /// results.
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, VerifyError>> + Send;

    /// Short provider name, reported as `search_engine` in audit entries.
    fn name(&self) -> &'static str;
}

/// Canned search provider that synthesises results from query patterns.
///
/// Mirrors the shapes a real availability search tends to surface: an
/// accepts-clients query yields an account-opening page, a prohibited-
/// countries query yields a restrictive terms page. The broker and country
/// are recovered from the quoted segments of the query itself, so verdicts
/// stay consistent with whatever pair is being verified.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSearch;

impl FixtureSearch {
    /// Extract the quoted segments of a query, in order.
    fn quoted_segments(query: &str) -> Vec<&str> {
        query.split('"').skip(1).step_by(2).collect()
    }
}

impl SearchProvider for FixtureSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, VerifyError> {
        let segments = Self::quoted_segments(query);
        let broker = segments.first().copied().unwrap_or_default();
        let country = segments.get(1).copied().unwrap_or_default();

        let mut results = Vec::new();

        if query.contains("accepts clients") {
            results.push(SearchResult {
                title: format!("{broker} - Account Opening"),
                url: "https://example-broker.com/account-opening".into(),
                snippet: format!(
                    "We accept clients from {country} subject to regulatory compliance..."
                ),
                relevance_score: 0.85,
            });
        }

        if query.contains("prohibited") {
            results.push(SearchResult {
                title: format!("{broker} - Terms and Conditions"),
                url: "https://example-broker.com/terms".into(),
                snippet: "Our services are not available to residents of certain restricted countries...".into(),
                relevance_score: 0.75,
            });
        }

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
