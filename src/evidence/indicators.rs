//! Fixed indicator phrase lists and the first-match co-occurrence rule.
//!
//! An indicator only counts when it co-occurs with the country name in the
//! same result text. Within each category the first matching phrase wins and
//! the rest are ignored for that result.

/// Phrases that shift the verdict toward "available".
pub const POSITIVE_INDICATORS: &[&str] = &[
    "accepts clients from",
    "available in",
    "open account",
    "registration available",
    "services available",
    "accepts residents",
    "trading available",
    "account opening",
    "regulated in",
    "licensed in",
];

/// Phrases that shift the verdict toward "unavailable".
pub const NEGATIVE_INDICATORS: &[&str] = &[
    "not available",
    "restricted country",
    "prohibited",
    "not accepted",
    "excluded",
    "restricted territory",
    "not permitted",
    "embargo",
    "sanctions",
    "blocked",
];

/// Weight applied to positive indicator matches.
pub const POSITIVE_WEIGHT: f64 = 1.0;

/// Weight applied to negative indicator matches. Negative evidence is
/// weighted slightly higher than positive evidence.
pub const NEGATIVE_WEIGHT: f64 = 1.2;

/// Find the first indicator phrase that appears in `text` alongside the
/// country name.
///
/// `text` and `country_lower` must already be lowercased. Returns `None`
/// when no phrase co-occurs with the country.
pub fn first_co_occurring(
    text: &str,
    country_lower: &str,
    indicators: &'static [&'static str],
) -> Option<&'static str> {
    indicators
        .iter()
        .copied()
        .find(|phrase| text.contains(phrase) && text.contains(country_lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_lists_are_fixed() {
        assert_eq!(POSITIVE_INDICATORS.len(), 10);
        assert_eq!(NEGATIVE_INDICATORS.len(), 10);
        assert_eq!(POSITIVE_INDICATORS[0], "accepts clients from");
        assert_eq!(NEGATIVE_INDICATORS[0], "not available");
    }

    #[test]
    fn match_requires_country_co_occurrence() {
        let text = "we accept clients from many regions, open account today";
        assert_eq!(first_co_occurring(text, "france", POSITIVE_INDICATORS), None);
    }

    #[test]
    fn first_listed_phrase_wins() {
        // Both "accepts clients from" and "open account" appear; the list
        // order decides which one is reported.
        let text = "acme accepts clients from france, open account in minutes";
        assert_eq!(
            first_co_occurring(text, "france", POSITIVE_INDICATORS),
            Some("accepts clients from")
        );
    }

    #[test]
    fn list_order_beats_text_order() {
        // "account opening" appears earlier in the text but later in the
        // indicator list than "available in".
        let text = "account opening guide: trading available in france";
        assert_eq!(
            first_co_occurring(text, "france", POSITIVE_INDICATORS),
            Some("available in")
        );
    }

    #[test]
    fn negative_phrases_match_with_country() {
        let text = "france is a restricted country for acme";
        assert_eq!(
            first_co_occurring(text, "france", NEGATIVE_INDICATORS),
            Some("restricted country")
        );
    }

    #[test]
    fn no_match_returns_none() {
        let text = "acme fx quarterly report for france";
        assert_eq!(first_co_occurring(text, "france", POSITIVE_INDICATORS), None);
        assert_eq!(first_co_occurring(text, "france", NEGATIVE_INDICATORS), None);
    }
}
