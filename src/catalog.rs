//! Catalog lookup capability: read-only broker and country resolution.
//!
//! The broker/country reference data is owned by an external catalog; this
//! crate only consumes it through the [`Catalog`] trait. [`StaticCatalog`]
//! is the bundled in-memory implementation used by the server binary and
//! tests.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::VerifyError;
use crate::types::{Broker, Country};

/// Read-only broker/country lookup.
///
/// Implementations resolve an identifier to the reference entity, returning
/// `Ok(None)` when the entity simply does not exist and `Err` only when the
/// catalog itself is unreachable. All implementations must be `Send + Sync`
/// so broker and country can be fetched concurrently.
pub trait Catalog: Send + Sync {
    /// Resolve a broker by catalog id.
    fn broker(
        &self,
        id: u64,
    ) -> impl std::future::Future<Output = Result<Option<Broker>, VerifyError>> + Send;

    /// Resolve a country by slug.
    fn country(
        &self,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Option<Country>, VerifyError>> + Send;
}

/// In-memory catalog backed by preloaded broker and country lists.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    brokers: HashMap<u64, Broker>,
    countries: HashMap<String, Country>,
}

impl StaticCatalog {
    /// Build a catalog from broker and country lists.
    pub fn new(brokers: Vec<Broker>, countries: Vec<Country>) -> Self {
        Self {
            brokers: brokers.into_iter().map(|b| (b.id, b)).collect(),
            countries: countries
                .into_iter()
                .map(|c| (c.slug.clone(), c))
                .collect(),
        }
    }

    /// Parse a catalog from a JSON document of the form
    /// `{"brokers": [...], "countries": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, VerifyError> {
        #[derive(Deserialize)]
        struct CatalogFile {
            brokers: Vec<Broker>,
            countries: Vec<Country>,
        }
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| VerifyError::Config(format!("invalid catalog JSON: {e}")))?;
        Ok(Self::new(file.brokers, file.countries))
    }

    /// Number of brokers in the catalog.
    pub fn broker_count(&self) -> usize {
        self.brokers.len()
    }

    /// Number of countries in the catalog.
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }
}

impl Catalog for StaticCatalog {
    async fn broker(&self, id: u64) -> Result<Option<Broker>, VerifyError> {
        Ok(self.brokers.get(&id).cloned())
    }

    async fn country(&self, slug: &str) -> Result<Option<Country>, VerifyError> {
        Ok(self.countries.get(slug).cloned())
    }
}
