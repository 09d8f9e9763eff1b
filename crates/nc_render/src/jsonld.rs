use nc_core::{ArticleRecord, SUPPORTED_TYPES};
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

/// Extracts the article records published as JSON-LD in an HTML document.
///
/// Top-level arrays and `@graph` containers are flattened; only nodes typed as
/// a supported article type are returned. Blocks that are not valid JSON are skipped.
pub fn extract_records(html: &str) -> Vec<ArticleRecord> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();

    if let Ok(script_selector) = Selector::parse("script[type='application/ld+json']") {
        for script in document.select(&script_selector) {
            let text = script.text().collect::<String>();
            match serde_json::from_str::<Value>(text.trim()) {
                Ok(json) => collect_articles(&json, &mut records),
                Err(e) => debug!("Skipping unparseable JSON-LD block: {}", e),
            }
        }
    }

    records
}

fn collect_articles(node: &Value, records: &mut Vec<ArticleRecord>) {
    match node {
        Value::Array(nodes) => {
            for node in nodes {
                collect_articles(node, records);
            }
        }
        Value::Object(obj) => {
            if let Some(graph) = obj.get("@graph") {
                collect_articles(graph, records);
            }
            let record = ArticleRecord::from_value(node);
            if SUPPORTED_TYPES.iter().any(|t| record.is_a(t)) {
                records.push(record);
            }
        }
        _ => {}
    }
}
