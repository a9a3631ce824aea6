//! Keyword-triggered market data extraction.

use std::collections::HashMap;

use indexmap::IndexMap;

/// Display string substituted when a lookup path is absent from the data.
pub const MISSING_DATA: &str = "Data not available";

/// Where a trigger rule reads its display string from.
enum Lookup {
    /// A flat indicator in the trends table.
    Trend(&'static str),
    /// An instrument in the two-level snapshot, by category.
    Quote {
        category: &'static str,
        instrument: &'static str,
    },
}

/// One extraction rule: any keyword hit yields `label` from `lookup`.
struct TriggerRule {
    keywords: &'static [&'static str],
    label: &'static str,
    lookup: Lookup,
}

// Rules are evaluated independently per query; several can fire at once.
const TRIGGER_RULES: &[TriggerRule] = &[
    TriggerRule {
        keywords: &["inflation", "cpi", "price index"],
        label: "inflation",
        lookup: Lookup::Trend("inflation_rate"),
    },
    TriggerRule {
        keywords: &["interest rate", "repo", "repo rate"],
        label: "repo_rate",
        lookup: Lookup::Trend("repo_rate"),
    },
    TriggerRule {
        keywords: &["gdp", "growth", "economic growth"],
        label: "gdp_growth",
        lookup: Lookup::Trend("gdp_growth"),
    },
    TriggerRule {
        keywords: &["sensex", "stock market", "share market", "bse"],
        label: "SENSEX",
        lookup: Lookup::Quote { category: "indices", instrument: "SENSEX" },
    },
    TriggerRule {
        keywords: &["nifty", "nse"],
        label: "NIFTY",
        lookup: Lookup::Quote { category: "indices", instrument: "NIFTY" },
    },
    TriggerRule {
        keywords: &["gold"],
        label: "Gold",
        lookup: Lookup::Quote { category: "commodities", instrument: "Gold" },
    },
    TriggerRule {
        keywords: &["oil", "crude", "petroleum"],
        label: "Crude Oil",
        lookup: Lookup::Quote { category: "commodities", instrument: "Crude Oil" },
    },
];

/// A market snapshot (category → instrument → display string) plus flat
/// indicator trends (indicator → display string).
///
/// Display strings already contain value and percent change; they are opaque
/// to this crate.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    snapshot: HashMap<String, HashMap<String, String>>,
    trends: HashMap<String, String>,
}

impl MarketData {
    /// Build market data from a snapshot and a trends table.
    pub fn new(
        snapshot: HashMap<String, HashMap<String, String>>,
        trends: HashMap<String, String>,
    ) -> Self {
        Self { snapshot, trends }
    }

    /// Extract the labels triggered by the query, in rule order.
    ///
    /// Each rule fires when any of its keywords appears in the lower-cased
    /// query. A label whose lookup path is absent still appears in the
    /// output, carrying [`MISSING_DATA`].
    pub fn extract(&self, query: &str) -> IndexMap<String, String> {
        let query = query.to_lowercase();
        let mut found = IndexMap::new();
        for rule in TRIGGER_RULES {
            if rule.keywords.iter().any(|keyword| query.contains(keyword)) {
                let value = match rule.lookup {
                    Lookup::Trend(indicator) => self.trends.get(indicator),
                    Lookup::Quote { category, instrument } => {
                        self.snapshot.get(category).and_then(|c| c.get(instrument))
                    }
                };
                found.insert(
                    rule.label.to_string(),
                    value.cloned().unwrap_or_else(|| MISSING_DATA.to_string()),
                );
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MarketData {
        let snapshot = HashMap::from([
            (
                "indices".to_string(),
                HashMap::from([
                    ("SENSEX".to_string(), "66,782.43 (+0.4%)".to_string()),
                    ("NIFTY".to_string(), "20,189.65 (+0.3%)".to_string()),
                ]),
            ),
            (
                "commodities".to_string(),
                HashMap::from([("Gold".to_string(), "₹62,450/10g (+0.5%)".to_string())]),
            ),
        ]);
        let trends = HashMap::from([
            ("inflation_rate".to_string(), "3.8% (April 2025)".to_string()),
            ("repo_rate".to_string(), "5.25%".to_string()),
        ]);
        MarketData::new(snapshot, trends)
    }

    #[test]
    fn independent_rules_can_fire_together() {
        let extracted = sample().extract("how are gold and crude oil doing");
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted["Gold"], "₹62,450/10g (+0.5%)");
        assert_eq!(extracted["Crude Oil"], MISSING_DATA);
    }

    #[test]
    fn trend_keywords_map_to_indicator_labels() {
        let extracted = sample().extract("latest CPI reading?");
        assert_eq!(extracted["inflation"], "3.8% (April 2025)");
    }

    #[test]
    fn index_keywords_map_to_snapshot_quotes() {
        let extracted = sample().extract("sensex and nifty today");
        assert_eq!(extracted["SENSEX"], "66,782.43 (+0.4%)");
        assert_eq!(extracted["NIFTY"], "20,189.65 (+0.3%)");
    }

    #[test]
    fn unrelated_query_triggers_nothing() {
        assert!(sample().extract("tell me about fiscal policy").is_empty());
    }
}
