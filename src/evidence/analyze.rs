//! Verdict computation: fold results into scores, then apply the decision rule.
//!
//! Scoring is a pure fold over the result sequence producing an immutable
//! accumulator; the decision thresholds are applied once at the end. The
//! analyzer never fails: it always returns a well-formed verdict.

use crate::types::{Availability, ConfidenceLevel, SearchResult};

use super::indicators::{
    first_co_occurring, NEGATIVE_INDICATORS, NEGATIVE_WEIGHT, POSITIVE_INDICATORS, POSITIVE_WEIGHT,
};

/// Ratio by which positive evidence must outweigh negative evidence for an
/// "available" verdict.
const POSITIVE_DECISION_RATIO: f64 = 1.5;

/// Ratio by which negative evidence must outweigh positive evidence for an
/// "unavailable" verdict.
const NEGATIVE_DECISION_RATIO: f64 = 1.2;

/// Score above which confidence is `high`.
const HIGH_CONFIDENCE_THRESHOLD: f64 = 2.0;

/// Score above which confidence is `medium`.
const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 1.0;

/// Summary text returned when there are no search results to analyze.
const NO_RESULTS_SUMMARY: &str = "No search results found";

/// The outcome of analyzing a set of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Tri-state availability decision.
    pub available: Availability,
    /// Reliability label for the decision.
    pub confidence_level: ConfidenceLevel,
    /// Deduplicated source URLs backing the decision, in processing order.
    pub evidence_urls: Vec<String>,
    /// Evidence lines joined by newline, in processing order.
    pub evidence_summary: String,
}

/// Running evidence state accumulated over the result sequence.
#[derive(Debug, Clone, Default)]
struct EvidenceAccumulator {
    positive_score: f64,
    negative_score: f64,
    evidence_urls: Vec<String>,
    evidence_lines: Vec<String>,
}

impl EvidenceAccumulator {
    /// Fold one search result into the accumulator.
    ///
    /// Results whose text mentions neither the broker nor the country are
    /// discarded as noise. A surviving result contributes its URL (deduped
    /// on insert) and at most one positive and one negative evidence line.
    fn absorb(mut self, result: &SearchResult, broker_lower: &str, country_lower: &str) -> Self {
        let text = format!("{} {}", result.title, result.snippet).to_lowercase();

        if !text.contains(broker_lower) && !text.contains(country_lower) {
            return self;
        }

        if !self.evidence_urls.contains(&result.url) {
            self.evidence_urls.push(result.url.clone());
        }

        if let Some(phrase) = first_co_occurring(&text, country_lower, POSITIVE_INDICATORS) {
            self.positive_score += result.relevance_score * POSITIVE_WEIGHT;
            self.evidence_lines
                .push(format!("✓ {phrase}: {}", result.snippet));
        }

        if let Some(phrase) = first_co_occurring(&text, country_lower, NEGATIVE_INDICATORS) {
            self.negative_score += result.relevance_score * NEGATIVE_WEIGHT;
            self.evidence_lines
                .push(format!("✗ {phrase}: {}", result.snippet));
        }

        self
    }
}

/// Analyze search results into an availability verdict for a broker/country.
///
/// Pure and infallible: the same inputs always produce the same verdict, and
/// malformed or irrelevant results simply contribute nothing.
pub fn analyze(results: &[SearchResult], broker_name: &str, country_name: &str) -> Verdict {
    if results.is_empty() {
        return Verdict {
            available: Availability::Unknown,
            confidence_level: ConfidenceLevel::Unknown,
            evidence_urls: Vec::new(),
            evidence_summary: NO_RESULTS_SUMMARY.to_owned(),
        };
    }

    let broker_lower = broker_name.to_lowercase();
    let country_lower = country_name.to_lowercase();

    let accumulated = results
        .iter()
        .fold(EvidenceAccumulator::default(), |acc, result| {
            acc.absorb(result, &broker_lower, &country_lower)
        });

    let (available, confidence_level) =
        decide(accumulated.positive_score, accumulated.negative_score);

    Verdict {
        available,
        confidence_level,
        evidence_urls: accumulated.evidence_urls,
        evidence_summary: accumulated.evidence_lines.join("\n"),
    }
}

/// Apply the threshold decision rule to the two accumulated scores.
fn decide(positive_score: f64, negative_score: f64) -> (Availability, ConfidenceLevel) {
    if positive_score > negative_score * POSITIVE_DECISION_RATIO {
        (Availability::Available, confidence_for(positive_score))
    } else if negative_score > positive_score * NEGATIVE_DECISION_RATIO {
        (Availability::Unavailable, confidence_for(negative_score))
    } else if positive_score > 0.0 && negative_score > 0.0 {
        // Genuine conflict: comparable evidence on both sides.
        (Availability::Unknown, ConfidenceLevel::ManualCheck)
    } else {
        (Availability::Unknown, ConfidenceLevel::Unknown)
    }
}

/// Map a winning score onto a confidence level.
fn confidence_for(score: f64) -> ConfidenceLevel {
    if score > HIGH_CONFIDENCE_THRESHOLD {
        ConfidenceLevel::High
    } else if score > MEDIUM_CONFIDENCE_THRESHOLD {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
