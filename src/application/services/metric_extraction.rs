use serde_json::Value;

use crate::domain::entities::MetricFields;

/// Canned retrieval query embedded to pick the chunks the extractor sees.
pub const METRICS_RETRIEVAL_QUERY: &str =
    "Summarize key SACCO financial metrics from this document";

pub const EXTRACTOR_SYSTEM_PROMPT: &str = "You are a financial data extractor.";

pub fn build_extraction_prompt(chunks: &[String]) -> String {
    let joined = chunks.join("\n---\n");

    format!(
        "From the following SACCO report snippets, extract the following numeric values \
and return them in JSON format:
- membership_count
- loan_book_value
- asset_base
- deposits
- dividend_rate
- interest_rebate
- revenue
- portfolio_at_risk

Return format:
{{
  \"membership_count\": 220650,
  \"loan_book_value\": 50.24,
  ...
}}

TEXT:
{joined}"
    )
}

/// Interprets a model response as the eight metric fields. Markdown code
/// fences are tolerated; malformed JSON or unusable fields degrade to zero
/// values instead of failing the document.
pub fn parse_metrics_response(raw: &str) -> MetricFields {
    let content = strip_code_fences(raw.trim());

    match serde_json::from_str::<Value>(content) {
        Ok(parsed) => coerce_fields(&parsed),
        Err(e) => {
            tracing::warn!("Failed to parse metrics response as JSON: {}", e);
            MetricFields::default()
        }
    }
}

fn strip_code_fences(content: &str) -> &str {
    let mut stripped = content;

    if let Some(rest) = stripped.strip_prefix("```json") {
        stripped = rest.trim_start();
    }
    if let Some(rest) = stripped.strip_prefix("```") {
        stripped = rest.trim_start();
    }
    if let Some(rest) = stripped.strip_suffix("```") {
        stripped = rest.trim_end();
    }

    stripped
}

fn coerce_fields(parsed: &Value) -> MetricFields {
    MetricFields {
        membership_count: safe_i32(parsed.get("membership_count")),
        loan_book_value: safe_f64(parsed.get("loan_book_value")),
        asset_base: safe_f64(parsed.get("asset_base")),
        deposits: safe_f64(parsed.get("deposits")),
        dividend_rate: safe_f64(parsed.get("dividend_rate")),
        interest_rebate: safe_f64(parsed.get("interest_rebate")),
        revenue: safe_f64(parsed.get("revenue")),
        portfolio_at_risk: safe_f64(parsed.get("portfolio_at_risk")),
    }
}

fn safe_f64(value: Option<&Value>) -> f64 {
    let Some(value) = value else { return 0.0 };

    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(0.0)
}

fn safe_i32(value: Option<&Value>) -> i32 {
    let Some(value) = value else { return 0 };

    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0)
}
