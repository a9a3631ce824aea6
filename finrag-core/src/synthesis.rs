//! Answer assembly from ranked documents, glossary matches, and market data.

use indexmap::IndexMap;

use crate::document::{RankedDocument, Response, SourceRef};

/// Answer returned when no signal source produced anything.
pub const FALLBACK_ANSWER: &str = "I don't have specific information on that topic yet. \
    Please try asking about economics, finance, or market data that might be in my knowledge base.";

/// Answer returned when query processing failed internally.
pub const DEGRADED_ANSWER: &str =
    "I'm sorry, I encountered an error while processing your query. Please try again.";

/// Marker appended to a truncated lead paragraph.
const ELLIPSIS: &str = "...";

/// A well-formed response with the apologetic answer and empty metadata.
pub fn degraded_response() -> Response {
    Response {
        answer: DEGRADED_ANSWER.to_string(),
        sources: Vec::new(),
        glossary_terms: IndexMap::new(),
        market_data: IndexMap::new(),
    }
}

/// Merge the three signal sources into one [`Response`].
///
/// With ranked documents present, the top document's content (truncated to
/// `snippet_limit` characters) leads the answer, followed by the glossary and
/// market blocks in that fixed order. Without documents, the answer comes
/// from glossary matches, then market data, then a fixed fallback sentence.
/// `sources` always covers the full ranked list, in rank order.
pub fn synthesize(
    ranked: Vec<RankedDocument>,
    glossary_terms: IndexMap<String, String>,
    market_data: IndexMap<String, String>,
    snippet_limit: usize,
) -> Response {
    let sources: Vec<SourceRef> =
        ranked.iter().map(|r| SourceRef::from_document(&r.document)).collect();

    let answer = match ranked.first() {
        None => answer_without_documents(&glossary_terms, &market_data),
        Some(top) => answer_from_documents(top, &glossary_terms, &market_data, snippet_limit),
    };

    Response { answer, sources, glossary_terms, market_data }
}

fn answer_without_documents(
    glossary_terms: &IndexMap<String, String>,
    market_data: &IndexMap<String, String>,
) -> String {
    let pairs: Vec<(&String, &String)> = glossary_terms.iter().collect();
    match pairs.as_slice() {
        [] => {}
        [(term, definition)] => {
            return format!("I see you're asking about '{term}'. {definition}");
        }
        _ => {
            let definitions: Vec<String> = pairs
                .iter()
                .map(|(term, definition)| format!("'{term}': {definition}"))
                .collect();
            return format!(
                "I found these relevant terms in your query:\n\n{}",
                definitions.join("\n\n")
            );
        }
    }

    if !market_data.is_empty() {
        let lines: Vec<String> =
            market_data.iter().map(|(label, value)| format!("{label}: {value}")).collect();
        return format!("Here's the latest data related to your query:\n\n{}", lines.join("\n"));
    }

    FALLBACK_ANSWER.to_string()
}

fn answer_from_documents(
    top: &RankedDocument,
    glossary_terms: &IndexMap<String, String>,
    market_data: &IndexMap<String, String>,
    snippet_limit: usize,
) -> String {
    let mut parts = vec![truncate_chars(&top.document.content, snippet_limit)];

    if !glossary_terms.is_empty() {
        let lines: Vec<String> = glossary_terms
            .iter()
            .map(|(term, definition)| format!("- {}: {definition}", capitalize(term)))
            .collect();
        parts.push(format!("\n\nRelated terms:\n{}", lines.join("\n")));
    }

    if !market_data.is_empty() {
        let lines: Vec<String> =
            market_data.iter().map(|(label, value)| format!("- {label}: {value}")).collect();
        parts.push(format!("\n\nRelevant market data:\n{}", lines.join("\n")));
    }

    parts.join(" ")
}

/// Truncate to `limit` characters, appending the ellipsis marker if anything
/// was cut. Operates on characters, not bytes, so multi-byte text stays valid.
fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Upper-case the first character, leaving the rest untouched.
fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, SourceKind};

    fn ranked(content: &str) -> RankedDocument {
        RankedDocument {
            document: Document {
                title: "Sample".to_string(),
                content: content.to_string(),
                source: SourceKind::TextbookExcerpt,
                date: None,
            },
            score: 1.0,
        }
    }

    fn map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn long_content_truncates_to_exactly_limit_plus_marker() {
        let content = "x".repeat(400);
        let response = synthesize(vec![ranked(&content)], IndexMap::new(), IndexMap::new(), 300);
        assert_eq!(response.answer.chars().count(), 303);
        assert!(response.answer.ends_with("..."));
    }

    #[test]
    fn short_content_is_left_untouched() {
        let response =
            synthesize(vec![ranked("Markets were calm.")], IndexMap::new(), IndexMap::new(), 300);
        assert_eq!(response.answer, "Markets were calm.");
    }

    #[test]
    fn blocks_follow_content_in_fixed_order() {
        let response = synthesize(
            vec![ranked("Lead paragraph.")],
            map(&[("inflation", "Rising prices.")]),
            map(&[("Gold", "₹62,450/10g (+0.5%)")]),
            300,
        );
        let glossary_at = response.answer.find("Related terms:").unwrap();
        let market_at = response.answer.find("Relevant market data:").unwrap();
        assert!(response.answer.starts_with("Lead paragraph."));
        assert!(glossary_at < market_at);
        assert!(response.answer.contains("- Inflation: Rising prices."));
    }

    #[test]
    fn single_glossary_match_without_documents() {
        let response = synthesize(
            Vec::new(),
            map(&[("inflation", "Rising prices.")]),
            IndexMap::new(),
            300,
        );
        assert_eq!(response.answer, "I see you're asking about 'inflation'. Rising prices.");
        assert!(response.sources.is_empty());
    }

    #[test]
    fn multiple_glossary_matches_without_documents() {
        let response = synthesize(
            Vec::new(),
            map(&[("inflation", "Rising prices."), ("gdp", "Total output.")]),
            IndexMap::new(),
            300,
        );
        assert!(response.answer.starts_with("I found these relevant terms"));
        assert!(response.answer.contains("'inflation': Rising prices."));
        assert!(response.answer.contains("'gdp': Total output."));
    }

    #[test]
    fn market_data_alone_lists_data_points() {
        let response = synthesize(
            Vec::new(),
            IndexMap::new(),
            map(&[("SENSEX", "66,782.43 (+0.4%)")]),
            300,
        );
        assert!(response.answer.starts_with("Here's the latest data"));
        assert!(response.answer.contains("SENSEX: 66,782.43 (+0.4%)"));
    }

    #[test]
    fn nothing_matched_falls_back() {
        let response = synthesize(Vec::new(), IndexMap::new(), IndexMap::new(), 300);
        assert_eq!(response.answer, FALLBACK_ANSWER);
    }

    #[test]
    fn sources_cover_the_full_ranked_list() {
        let response = synthesize(
            vec![ranked("First."), ranked("Second."), ranked("Third.")],
            IndexMap::new(),
            IndexMap::new(),
            300,
        );
        assert_eq!(response.sources.len(), 3);
        assert!(response.answer.starts_with("First."));
    }
}
