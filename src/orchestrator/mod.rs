//! Verification orchestration: cache consult, catalog resolution, paced
//! searches, evidence analysis, persistence.
//!
//! [`Verifier`] composes the capability seams (catalog, search provider,
//! verification store) behind the single-pair and batch entry points. The
//! collaborators are injected as generics so tests can substitute
//! deterministic implementations.

pub mod batch;
pub mod verify;

pub use batch::VerificationTarget;

use crate::catalog::Catalog;
use crate::config::VerifyConfig;
use crate::error::Result;
use crate::pacing::Pacer;
use crate::search::SearchProvider;
use crate::store::VerificationStore;

/// The verification engine for (broker, country) pairs.
///
/// One `Verifier` owns one [`Pacer`], so every external search call it
/// makes, across single runs and batches alike, observes the configured
/// minimum spacing.
pub struct Verifier<C, S, P> {
    catalog: C,
    search: S,
    store: P,
    config: VerifyConfig,
    pacer: Pacer,
}

impl<C, S, P> Verifier<C, S, P>
where
    C: Catalog,
    S: SearchProvider,
    P: VerificationStore,
{
    /// Build a verifier from its collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VerifyError::Config`] if the configuration is invalid.
    pub fn new(catalog: C, search: S, store: P, config: VerifyConfig) -> Result<Self> {
        config.validate()?;
        let pacer = Pacer::new(config.query_delay_ms);
        Ok(Self {
            catalog,
            search,
            store,
            config,
            pacer,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }
}
