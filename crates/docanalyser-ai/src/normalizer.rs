//! Reply normalization: turn whatever the model sent into a field mapping.
//!
//! Parsing degrades through three stages and never fails:
//!
//! 1. **Strict**: the whole cleaned reply is one JSON object.
//! 2. **Relaxed**: the span from the first `{` to the last `}` is one JSON
//!    object (prose before or after is ignored).
//! 3. **Heuristic**: no object could be parsed; a minimal mapping is
//!    synthesized from keyword search over the reply text.

use docanalyser_core::{ComplexityScore, RiskLevel};
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::backend::BackendReply;

/// Accessor slots probed on a structured reply, most authoritative first.
pub const TEXT_ACCESSORS: [&str; 4] = ["content", "text", "response", "message"];

/// Characters of reply text kept as the fallback summary.
pub const SUMMARY_CHARS: usize = 300;

/// Confidence reported when the reply could not be parsed.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

const FENCE: &str = "```";

/// Keyword rules for document type inference, checked in order.
const DOCUMENT_TYPE_RULES: &[(&[&str], &str)] = &[
    (&["lease", "rental", "rent"], "Rental Agreement"),
    (&["insurance", "policy"], "Insurance Policy"),
    (&["contract", "agreement"], "Service Contract"),
];

const UNKNOWN_DOCUMENT_TYPE: &str = "Unknown";

/// Which stage produced the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    Strict,
    Relaxed,
    Heuristic,
}

impl ParseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Relaxed => "relaxed",
            Self::Heuristic => "heuristic",
        }
    }
}

/// A normalized reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub strategy: ParseStrategy,
    pub fields: Map<String, Value>,
}

/// Normalize a backend reply into a field mapping.
pub fn normalize(reply: &BackendReply) -> Normalized {
    let text = extract_text(reply);
    let cleaned = strip_fences(&text);

    if let Some(fields) = parse_strict(&cleaned) {
        debug!(keys = fields.len(), "reply parsed as a whole");
        return Normalized {
            strategy: ParseStrategy::Strict,
            fields,
        };
    }

    if let Some(fields) = parse_relaxed(&cleaned) {
        info!(keys = fields.len(), "extracted JSON object from surrounding text");
        return Normalized {
            strategy: ParseStrategy::Relaxed,
            fields,
        };
    }

    warn!(
        chars = cleaned.chars().count(),
        "no JSON object in reply, falling back to keyword heuristics"
    );
    Normalized {
        strategy: ParseStrategy::Heuristic,
        fields: fallback_fields(&cleaned),
    }
}

/// Pull the generated text out of a reply.
///
/// A structured reply yields its first non-null accessor slot; strings are
/// taken verbatim, anything else as compact JSON. With no matching slot the
/// whole value is rendered as JSON.
pub fn extract_text(reply: &BackendReply) -> String {
    match reply {
        BackendReply::Text(text) => text.clone(),
        BackendReply::Json(value) => TEXT_ACCESSORS
            .iter()
            .find_map(|key| value.get(key).filter(|slot| !slot.is_null()))
            .map(render)
            .unwrap_or_else(|| value.to_string()),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Trim the text and drop the opening and closing lines of a code fence.
///
/// Replies of one or two lines are left as they are even when they open
/// with a fence marker.
pub fn strip_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed.to_string();
    }
    let lines: Vec<&str> = trimmed.split('\n').collect();
    if lines.len() > 2 {
        lines[1..lines.len() - 1].join("\n")
    } else {
        trimmed.to_string()
    }
}

fn parse_strict(text: &str) -> Option<Map<String, Value>> {
    let text = text.trim();
    if !(text.starts_with('{') && text.ends_with('}')) {
        return None;
    }
    serde_json::from_str(text)
        .inspect_err(|e| debug!(error = %e, "strict parse failed"))
        .ok()
}

fn parse_relaxed(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end])
        .inspect_err(|e| debug!(error = %e, "relaxed parse failed"))
        .ok()
}

/// Minimal mapping for a reply that held no parseable object.
fn fallback_fields(text: &str) -> Map<String, Value> {
    let fields = json!({
        "analysis_summary": {
            "document_type": infer_document_type(text),
            "overall_risk_level": RiskLevel::default().as_str(),
            "complexity_score": ComplexityScore::default().get(),
            "summary": summarize(text),
            "total_clauses_analyzed": 0,
            "parties_involved": [],
            "effective_date": null,
            "expiration_date": null,
            "document_title": null
        },
        "key_terms": [],
        "hidden_clauses": [],
        "risks_identified": [],
        "financial_implications": [],
        "recommendations": [],
        "confidence_score": FALLBACK_CONFIDENCE
    });
    match fields {
        Value::Object(map) => map,
        _ => unreachable!("json! object literal"),
    }
}

/// Guess the document type from keywords; the first matching rule wins.
///
/// Matching is plain case-insensitive substring search, so "rent" also
/// matches inside "current".
pub fn infer_document_type(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    DOCUMENT_TYPE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_DOCUMENT_TYPE)
}

/// First [`SUMMARY_CHARS`] characters, with `...` appended when cut.
pub fn summarize(text: &str) -> String {
    match text.char_indices().nth(SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
