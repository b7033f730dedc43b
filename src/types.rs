//! Core types for verification verdicts, catalog entities, and search results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state availability verdict for a (broker, country) pair.
///
/// Serialises as JSON `true` / `false` / `null` so that stored and wire
/// records keep the nullable-boolean shape downstream consumers expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Availability {
    /// The broker accepts clients from the country.
    Available,
    /// The broker does not accept clients from the country.
    Unavailable,
    /// No verdict reached.
    #[default]
    Unknown,
}

impl Availability {
    /// Returns the nullable-boolean form used on the wire.
    pub fn as_option(self) -> Option<bool> {
        match self {
            Self::Available => Some(true),
            Self::Unavailable => Some(false),
            Self::Unknown => None,
        }
    }
}

impl From<Option<bool>> for Availability {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Available,
            Some(false) => Self::Unavailable,
            None => Self::Unknown,
        }
    }
}

impl Serialize for Availability {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_option() {
            Some(value) => serializer.serialize_bool(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(Self::from)
    }
}

/// Coarse reliability label attached to a verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Strong one-sided evidence (score above 2.0).
    High,
    /// Moderate one-sided evidence (score above 1.0).
    Medium,
    /// Weak one-sided evidence.
    Low,
    /// Insufficient signal to decide.
    #[default]
    Unknown,
    /// Conflicting evidence on both sides; needs a human.
    ManualCheck,
}

impl ConfidenceLevel {
    /// Returns the wire name of this level.
    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
            Self::ManualCheck => "manual_check",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Provenance of a verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckedBy {
    /// Produced by an automatic verification run.
    #[default]
    Auto,
    /// Entered or overridden by an operator.
    Manual,
}

/// The persisted verdict for one (broker, country) pair.
///
/// Created or overwritten (upsert keyed by `broker_id` + `country_id`) only by
/// a completed verification run; never deleted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Identifier of the broker, foreign to the external catalog.
    pub broker_id: u64,
    /// Identifier of the country, foreign to the external catalog.
    pub country_id: String,
    /// Human-readable country key, stored for lookup convenience.
    pub country_slug: String,
    /// Tri-state verdict.
    #[serde(default)]
    pub available: Availability,
    /// Reliability label for the verdict.
    pub confidence_level: ConfidenceLevel,
    /// Deduplicated source URLs backing the verdict.
    pub evidence_urls: Vec<String>,
    /// Evidence lines (one per matched indicator), newline-joined.
    pub evidence_summary: String,
    /// The literal query strings issued, in order.
    pub search_queries: Vec<String>,
    /// When the verdict was computed.
    pub checked_at: DateTime<Utc>,
    /// Whether the verdict came from an automatic run or an operator.
    pub checked_by: CheckedBy,
}

/// A broker as seen through the external catalog. Read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broker {
    /// Catalog identifier.
    pub id: u64,
    /// Display name, used verbatim in query templates.
    pub name: String,
    /// Official website, if known. Used to derive the `site:` query domain.
    pub website: Option<String>,
}

/// A country as seen through the external catalog. Read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    /// Catalog identifier.
    pub id: String,
    /// URL-safe key, the lookup handle on the verification surface.
    pub slug: String,
    /// Display name, used verbatim in query templates and indicator matching.
    pub name: String,
    /// ISO 3166-1 alpha-2 code.
    pub iso2: String,
}

/// A single raw result from the external search capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the result page.
    pub title: String,
    /// URL of the result.
    pub url: String,
    /// Text snippet summarising the page content.
    pub snippet: String,
    /// Relevance score in `[0, 1]` as reported by the search capability.
    pub relevance_score: f64,
}

/// One append-only audit entry per completed verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Broker the run was for.
    pub broker_id: u64,
    /// Country the run was for.
    pub country_id: String,
    /// Name of the search provider that served the run.
    pub search_engine: String,
    /// The issued queries, joined with `" | "`.
    pub query_used: String,
    /// Number of evidence URLs the run produced.
    pub results_found: usize,
    /// The evidence URLs themselves.
    pub result_urls: Vec<String>,
    /// Evidence snippets recorded with the run.
    pub result_snippets: Vec<String>,
    /// Wall-clock duration of the run in milliseconds.
    pub processing_time_ms: u64,
    /// Whether the run completed and persisted a verdict.
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_serialises_as_nullable_bool() {
        assert_eq!(
            serde_json::to_string(&Availability::Available).expect("serialize"),
            "true"
        );
        assert_eq!(
            serde_json::to_string(&Availability::Unavailable).expect("serialize"),
            "false"
        );
        assert_eq!(
            serde_json::to_string(&Availability::Unknown).expect("serialize"),
            "null"
        );
    }

    #[test]
    fn availability_deserialises_from_nullable_bool() {
        let available: Availability = serde_json::from_str("true").expect("deserialize");
        assert_eq!(available, Availability::Available);
        let unavailable: Availability = serde_json::from_str("false").expect("deserialize");
        assert_eq!(unavailable, Availability::Unavailable);
        let unknown: Availability = serde_json::from_str("null").expect("deserialize");
        assert_eq!(unknown, Availability::Unknown);
    }

    #[test]
    fn availability_option_round_trip() {
        for availability in [
            Availability::Available,
            Availability::Unavailable,
            Availability::Unknown,
        ] {
            assert_eq!(Availability::from(availability.as_option()), availability);
        }
    }

    #[test]
    fn confidence_level_wire_names() {
        assert_eq!(ConfidenceLevel::High.to_string(), "high");
        assert_eq!(ConfidenceLevel::ManualCheck.to_string(), "manual_check");
        let json = serde_json::to_string(&ConfidenceLevel::ManualCheck).expect("serialize");
        assert_eq!(json, "\"manual_check\"");
    }

    #[test]
    fn checked_by_wire_names() {
        assert_eq!(
            serde_json::to_string(&CheckedBy::Auto).expect("serialize"),
            "\"auto\""
        );
        assert_eq!(
            serde_json::to_string(&CheckedBy::Manual).expect("serialize"),
            "\"manual\""
        );
    }

    #[test]
    fn verification_record_serde_round_trip() {
        let record = VerificationRecord {
            broker_id: 42,
            country_id: "c-fr".into(),
            country_slug: "france".into(),
            available: Availability::Available,
            confidence_level: ConfidenceLevel::Medium,
            evidence_urls: vec!["https://acme.example/ao".into()],
            evidence_summary: "✓ accepts clients from: We accept clients from France".into(),
            search_queries: vec!["\"Acme FX\" accepts clients from \"France\"".into()],
            checked_at: Utc::now(),
            checked_by: CheckedBy::Auto,
        };
        let json = serde_json::to_string(&record).expect("serialize");
        let decoded: VerificationRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded.broker_id, 42);
        assert_eq!(decoded.country_slug, "france");
        assert_eq!(decoded.available, Availability::Available);
        assert_eq!(decoded.confidence_level, ConfidenceLevel::Medium);
    }

    #[test]
    fn unknown_availability_round_trips_through_json_null() {
        let record = VerificationRecord {
            broker_id: 1,
            country_id: "c-de".into(),
            country_slug: "germany".into(),
            available: Availability::Unknown,
            confidence_level: ConfidenceLevel::Unknown,
            evidence_urls: vec![],
            evidence_summary: String::new(),
            search_queries: vec![],
            checked_at: Utc::now(),
            checked_by: CheckedBy::Auto,
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert!(json.get("available").expect("field").is_null());
        let decoded: VerificationRecord = serde_json::from_value(json).expect("deserialize");
        assert_eq!(decoded.available, Availability::Unknown);
    }

    #[test]
    fn search_result_construction() {
        let result = SearchResult {
            title: "Acme FX - Account Opening".into(),
            url: "https://acme.example/ao".into(),
            snippet: "We accept clients from France".into(),
            relevance_score: 0.85,
        };
        assert!((result.relevance_score - 0.85).abs() < f64::EPSILON);
    }
}
