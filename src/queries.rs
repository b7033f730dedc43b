//! Query generation for country-availability verification.
//!
//! Produces the fixed, ordered set of search query strings for a
//! (broker, country) pair. Generation is deterministic and pure; the
//! orchestrator decides how many of the automatic templates actually get
//! issued per run.

use crate::types::Broker;

/// The fixed query templates used for verification searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryTemplate {
    /// `"<broker>" accepts clients from "<country>"`
    AcceptsClients,
    /// `"<broker>" "<country>" account opening`
    AccountOpening,
    /// `"<broker>" terms conditions "<country>"`
    TermsConditions,
    /// `"<broker>" prohibited countries "<country>"`
    ProhibitedCountries,
    /// `"<broker>" regulation "<country>" territory`
    RegulationTerritory,
    /// `site:<broker-domain> "<country>"`, reserved for manual runs and
    /// never issued by the automatic orchestrator.
    OfficialWebsite,
}

impl QueryTemplate {
    /// Returns a short identifier for this template.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AcceptsClients => "accepts_clients",
            Self::AccountOpening => "account_opening",
            Self::TermsConditions => "terms_conditions",
            Self::ProhibitedCountries => "prohibited_countries",
            Self::RegulationTerritory => "regulation_territory",
            Self::OfficialWebsite => "official_website",
        }
    }

    /// Renders this template for the given broker and country names.
    ///
    /// [`QueryTemplate::OfficialWebsite`] needs the broker's website to
    /// derive a domain; render it via [`official_site_query`] instead.
    /// Here it falls back to the name-derived domain.
    pub fn render(&self, broker_name: &str, country_name: &str) -> String {
        match self {
            Self::AcceptsClients => {
                format!("\"{broker_name}\" accepts clients from \"{country_name}\"")
            }
            Self::AccountOpening => format!("\"{broker_name}\" \"{country_name}\" account opening"),
            Self::TermsConditions => {
                format!("\"{broker_name}\" terms conditions \"{country_name}\"")
            }
            Self::ProhibitedCountries => {
                format!("\"{broker_name}\" prohibited countries \"{country_name}\"")
            }
            Self::RegulationTerritory => {
                format!("\"{broker_name}\" regulation \"{country_name}\" territory")
            }
            Self::OfficialWebsite => {
                format!(
                    "site:{} \"{country_name}\"",
                    name_derived_domain(broker_name)
                )
            }
        }
    }

    /// The templates issued by automatic verification runs, in order.
    pub fn automatic() -> &'static [QueryTemplate] {
        &[
            Self::AcceptsClients,
            Self::AccountOpening,
            Self::TermsConditions,
            Self::ProhibitedCountries,
            Self::RegulationTerritory,
        ]
    }

    /// All template variants, including the manual-only `site:` template.
    pub fn all() -> &'static [QueryTemplate] {
        &[
            Self::AcceptsClients,
            Self::AccountOpening,
            Self::TermsConditions,
            Self::ProhibitedCountries,
            Self::RegulationTerritory,
            Self::OfficialWebsite,
        ]
    }
}

/// Generate the ordered automatic query strings for a (broker, country) pair.
///
/// Deterministic and pure: the same inputs always yield the same sequence.
/// Always non-empty for non-empty inputs; the per-run cap is applied by the
/// orchestrator, not here.
pub fn generate_queries(broker_name: &str, country_name: &str) -> Vec<String> {
    QueryTemplate::automatic()
        .iter()
        .map(|template| template.render(broker_name, country_name))
        .collect()
}

/// Render the manual-only `site:` query for a broker's official website.
///
/// The domain comes from the broker's website URL when it parses, with any
/// leading `www.` stripped; otherwise it falls back to the broker name,
/// lowercased with whitespace removed, under `.com`.
pub fn official_site_query(broker: &Broker, country_name: &str) -> String {
    let domain = broker
        .website
        .as_deref()
        .and_then(|website| url::Url::parse(website).ok())
        .and_then(|parsed| {
            parsed
                .host_str()
                .map(|host| host.trim_start_matches("www.").to_owned())
        })
        .unwrap_or_else(|| name_derived_domain(&broker.name));
    format!("site:{domain} \"{country_name}\"")
}

/// Fallback domain derivation: lowercased broker name, whitespace removed.
fn name_derived_domain(broker_name: &str) -> String {
    let compact: String = broker_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("");
    format!("{compact}.com")
}
