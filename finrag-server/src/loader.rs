//! Data-directory loading with first-run seeding.
//!
//! The loader owns everything about on-disk formats: four JSONL corpus files,
//! a glossary JSONL, and one market-data JSON file. Any file missing from the
//! data directory is seeded with starter records first, so a fresh checkout
//! serves meaningful responses without any provisioning step.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use finrag_core::{Document, Glossary, MarketData, SourceKind};

/// Everything the query engine needs, loaded from one data directory.
pub struct DataSet {
    pub documents: Vec<Document>,
    pub glossary: Glossary,
    pub market: MarketData,
}

const CORPUS_FILES: &[(&str, SourceKind)] = &[
    ("research_papers.jsonl", SourceKind::ResearchPaper),
    ("textbook_excerpts.jsonl", SourceKind::TextbookExcerpt),
    ("financial_news.jsonl", SourceKind::FinancialNews),
    ("economic_indicators.jsonl", SourceKind::EconomicIndicator),
];

const GLOSSARY_FILE: &str = "finance_glossary.jsonl";
const MARKET_FILE: &str = "market_data.json";

/// One line of a corpus JSONL file. Unknown fields are ignored; economic
/// indicator records carry `indicator` instead of `title`.
#[derive(Deserialize)]
struct CorpusRecord {
    title: Option<String>,
    indicator: Option<String>,
    #[serde(default)]
    content: String,
    date: Option<String>,
}

/// One line of the glossary JSONL file.
#[derive(Deserialize)]
struct GlossaryRecord {
    term: String,
    definition: String,
}

/// Shape of `market_data.json`.
#[derive(Deserialize)]
struct MarketFile {
    #[serde(default)]
    market_data: HashMap<String, HashMap<String, String>>,
    #[serde(default)]
    trends: HashMap<String, String>,
}

/// Load (seeding where necessary) the corpus, glossary, and market data.
///
/// # Errors
///
/// Fails if the directory cannot be created, a file cannot be read or
/// written, or any record fails to parse. All failures are startup failures;
/// nothing here runs per request.
pub fn load_dataset(data_dir: &Path) -> Result<DataSet> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let mut documents = Vec::new();
    for (file_name, kind) in CORPUS_FILES {
        let path = data_dir.join(file_name);
        ensure_seeded(&path, seed::corpus(*kind))?;
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        for (line_no, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: CorpusRecord = serde_json::from_str(line).with_context(|| {
                format!("invalid corpus record at {}:{}", path.display(), line_no + 1)
            })?;
            documents.push(Document {
                title: record
                    .title
                    .or(record.indicator)
                    .unwrap_or_else(|| "Untitled".to_string()),
                content: record.content,
                source: *kind,
                date: record.date,
            });
        }
    }

    let glossary_path = data_dir.join(GLOSSARY_FILE);
    ensure_seeded(&glossary_path, seed::GLOSSARY)?;
    let raw = fs::read_to_string(&glossary_path)
        .with_context(|| format!("failed to read {}", glossary_path.display()))?;
    let mut entries = HashMap::new();
    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: GlossaryRecord = serde_json::from_str(line).with_context(|| {
            format!("invalid glossary record at {}:{}", glossary_path.display(), line_no + 1)
        })?;
        entries.insert(record.term, record.definition);
    }
    let glossary = Glossary::new(entries);

    let market_path = data_dir.join(MARKET_FILE);
    ensure_seeded(&market_path, seed::MARKET)?;
    let raw = fs::read_to_string(&market_path)
        .with_context(|| format!("failed to read {}", market_path.display()))?;
    let market_file: MarketFile = serde_json::from_str(&raw)
        .with_context(|| format!("invalid market data in {}", market_path.display()))?;
    let market = MarketData::new(market_file.market_data, market_file.trends);

    info!(
        documents = documents.len(),
        glossary_terms = glossary.len(),
        data_dir = %data_dir.display(),
        "loaded data set"
    );

    Ok(DataSet { documents, glossary, market })
}

/// Write the seed content if the file does not exist yet.
fn ensure_seeded(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    info!(path = %path.display(), "seeding starter data");
    fs::write(path, content).with_context(|| format!("failed to seed {}", path.display()))
}

/// Starter records written on first run.
mod seed {
    use finrag_core::SourceKind;

    pub(super) fn corpus(kind: SourceKind) -> &'static str {
        match kind {
            SourceKind::ResearchPaper => RESEARCH_PAPERS,
            SourceKind::TextbookExcerpt => TEXTBOOK_EXCERPTS,
            SourceKind::FinancialNews => FINANCIAL_NEWS,
            SourceKind::EconomicIndicator => ECONOMIC_INDICATORS,
        }
    }

    const RESEARCH_PAPERS: &str = r#"{"title": "Impact of Monetary Policy on Inflation", "content": "Monetary policy has a significant impact on inflation rates. Central banks use various tools like interest rates to control inflation. In India, the Reserve Bank of India implements monetary policy to maintain price stability."}
{"title": "Economic Growth Patterns in Developing Nations", "content": "Developing nations often show different growth patterns compared to developed economies. Factors such as infrastructure, education, and governance play crucial roles in determining these patterns."}
"#;

    const TEXTBOOK_EXCERPTS: &str = r#"{"title": "Principles of Macroeconomics", "content": "Macroeconomics studies the behavior of the economy as a whole, including inflation, GDP, and unemployment. These factors are interconnected and influence economic policy decisions."}
{"title": "Introduction to Financial Markets", "content": "Financial markets are mechanisms that allow people to buy and sell (trade) financial securities, commodities, and other fungible items. They are crucial for allocating resources in the economy."}
"#;

    const FINANCIAL_NEWS: &str = r#"{"title": "Stock Market Reaches New High", "date": "2025-05-29", "content": "The stock market reached a new record high today as investors responded positively to recent economic data showing strong growth and controlled inflation."}
{"title": "Central Bank Announces Interest Rate Decision", "date": "2025-05-28", "content": "The central bank announced today that it will maintain current interest rates, citing balanced risks to economic growth and inflation targets."}
"#;

    const ECONOMIC_INDICATORS: &str = r#"{"indicator": "GDP Growth", "value": "4.2%", "period": "Q1 2025", "content": "India's GDP grew by 4.2% in the first quarter of 2025, showing resilience despite global economic challenges."}
{"indicator": "Inflation Rate", "value": "3.8%", "period": "April 2025", "content": "Consumer price inflation stood at 3.8% in April 2025, remaining within the Reserve Bank's target range of 2-6%."}
"#;

    pub(super) const GLOSSARY: &str = r#"{"term": "Inflation", "definition": "A general increase in prices and fall in the purchasing value of money."}
{"term": "GDP", "definition": "Gross Domestic Product - the total value of goods produced and services provided in a country during one year."}
{"term": "Bull Market", "definition": "A market in which share prices are rising, encouraging buying."}
{"term": "Bear Market", "definition": "A market in which prices are falling, encouraging selling."}
{"term": "Fiscal Policy", "definition": "Government policy relating to taxation, borrowing, and public spending."}
"#;

    pub(super) const MARKET: &str = r#"{
  "market_data": {
    "indices": {
      "SENSEX": "66,782.43 (+0.4%)",
      "NIFTY": "20,189.65 (+0.3%)",
      "S&P500": "5,432.67 (+0.2%)"
    },
    "currencies": {
      "USD/INR": "74.23 (-0.1%)",
      "EUR/INR": "87.65 (+0.2%)",
      "GBP/INR": "102.36 (+0.3%)"
    },
    "commodities": {
      "Gold": "₹62,450/10g (+0.5%)",
      "Crude Oil": "$82.75/barrel (-0.3%)"
    }
  },
  "trends": {
    "inflation_rate": "3.8% (April 2025)",
    "repo_rate": "5.25%",
    "gdp_growth": "4.2% (Q1 2025)",
    "unemployment": "6.8% (April 2025)"
  }
}
"#;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_and_loads_a_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = load_dataset(dir.path()).unwrap();

        assert_eq!(dataset.documents.len(), 8);
        assert_eq!(dataset.glossary.len(), 5);
        // Indicator records take their title from the indicator name.
        assert!(dataset.documents.iter().any(|d| d.title == "GDP Growth"));
        assert!(
            dataset
                .documents
                .iter()
                .any(|d| d.source == SourceKind::FinancialNews && d.date.is_some())
        );
    }

    #[test]
    fn existing_files_are_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("research_papers.jsonl");
        fs::write(&path, "{\"title\": \"Mine\", \"content\": \"Kept.\"}\n").unwrap();

        let dataset = load_dataset(dir.path()).unwrap();
        let papers: Vec<_> = dataset
            .documents
            .iter()
            .filter(|d| d.source == SourceKind::ResearchPaper)
            .collect();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "Mine");
    }

    #[test]
    fn malformed_records_fail_loading() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("research_papers.jsonl"), "not json\n").unwrap();
        assert!(load_dataset(dir.path()).is_err());
    }
}
