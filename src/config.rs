//! Verification configuration with sensible defaults.
//!
//! [`VerifyConfig`] controls the per-run query cap, the pacing delay between
//! external search calls, and the cache freshness window. The defaults match
//! the reference behaviour: at most 4 queries per run, 2 seconds between
//! calls, 30-day freshness.

use crate::error::VerifyError;
use crate::queries::QueryTemplate;

/// Configuration for verification runs.
///
/// Use [`Default::default()`] for the reference behaviour, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Maximum number of search queries issued per verification run.
    /// Capped at the number of automatic query templates.
    pub max_queries_per_run: usize,
    /// Delay in milliseconds between successive external search calls,
    /// and between batch items. Shared pacing across both paths.
    pub query_delay_ms: u64,
    /// Freshness window in days. A cached record older than this is
    /// treated as absent.
    pub cache_duration_days: i64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            max_queries_per_run: 4,
            query_delay_ms: 2000,
            cache_duration_days: 30,
        }
    }
}

impl VerifyConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_queries_per_run` must be greater than 0
    /// - `max_queries_per_run` must not exceed the automatic template count
    /// - `cache_duration_days` must not be negative
    pub fn validate(&self) -> Result<(), VerifyError> {
        if self.max_queries_per_run == 0 {
            return Err(VerifyError::Config(
                "max_queries_per_run must be greater than 0".into(),
            ));
        }
        if self.max_queries_per_run > QueryTemplate::automatic().len() {
            return Err(VerifyError::Config(format!(
                "max_queries_per_run must not exceed {}",
                QueryTemplate::automatic().len()
            )));
        }
        if self.cache_duration_days < 0 {
            return Err(VerifyError::Config(
                "cache_duration_days must not be negative".into(),
            ));
        }
        Ok(())
    }
}
