//! # country-verify
//!
//! Country-availability verification engine: given a (broker, country) pair,
//! decides whether the broker accepts clients from that country, with a
//! confidence level and supporting evidence.
//!
//! ## Design
//!
//! - Generates a fixed, ordered set of search queries per pair and issues
//!   them strictly sequentially through a shared pacer
//! - Scores returned snippets against fixed positive/negative indicator
//!   phrase lists and applies a threshold decision rule
//! - Caches verdicts with a freshness window; stale entries and store
//!   outages degrade to re-verification rather than blocking
//! - Batch runs isolate per-item failures: one record per pair, always
//! - Catalog, search, and persistence are narrow capability traits so tests
//!   substitute deterministic implementations
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> country_verify::Result<()> {
//! use country_verify::{FixtureSearch, MemoryStore, StaticCatalog, Verifier, VerifyConfig};
//!
//! let verifier = Verifier::new(
//!     StaticCatalog::default(),
//!     FixtureSearch,
//!     MemoryStore::new(),
//!     VerifyConfig::default(),
//! )?;
//! let record = verifier.verify(1, "france", false).await?;
//! println!("{:?} ({})", record.available, record.confidence_level);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod evidence;
pub mod orchestrator;
pub mod pacing;
pub mod queries;
pub mod search;
pub mod server;
pub mod store;
pub mod types;

pub use catalog::{Catalog, StaticCatalog};
pub use config::VerifyConfig;
pub use error::{Result, VerifyError};
pub use orchestrator::{VerificationTarget, Verifier};
pub use search::{FixtureSearch, SearchProvider};
pub use server::{ServerConfig, VerifyServer};
pub use store::{MemoryStore, VerificationStore};
pub use types::{
    AuditLogEntry, Availability, Broker, CheckedBy, ConfidenceLevel, Country, SearchResult,
    VerificationRecord,
};
