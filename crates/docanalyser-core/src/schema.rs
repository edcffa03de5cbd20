//! Analysis result records and their construction from a loose JSON mapping.
//!
//! The mapping usually comes straight from a language model, so every key is
//! optional at the top level and falls back to a neutral default. Child
//! records, by contrast, must carry all their required fields: a partial key
//! term is rejected rather than padded.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::score::{ComplexityScore, ConfidenceScore, RiskLevel};

pub const DEFAULT_DOCUMENT_TYPE: &str = "Unknown";
pub const DEFAULT_SUMMARY: &str = "Analysis completed";
/// Confidence assumed when a parsed reply does not report one.
pub const DEFAULT_CONFIDENCE: f64 = 0.8;

/// A term the reader should understand before signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyTerm {
    pub term: String,
    pub definition: String,
    pub location: String,
    /// HIGH, MEDIUM or LOW.
    pub importance: String,
}

/// A clause that is easy to overlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenClause {
    pub clause_text: String,
    pub location: String,
    pub hidden_reason: String,
    pub potential_impact: String,
    /// CRITICAL, HIGH, MEDIUM or LOW.
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    /// financial, legal, operational, ...
    pub risk_type: String,
    pub description: String,
    /// HIGH, MEDIUM or LOW.
    pub likelihood: String,
    /// CRITICAL, HIGH, MEDIUM or LOW.
    pub severity: String,
    pub mitigation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialImplication {
    pub item: String,
    /// Free text, e.g. "$1,500" or "2 months' rent".
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    /// COST, SAVING or LIABILITY.
    pub impact_type: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: String,
    /// HIGH, MEDIUM or LOW.
    pub priority: String,
    pub reasoning: String,
    pub timeline: String,
}

/// Document-level findings, serialized under `analysis_summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub document_type: String,
    pub document_title: Option<String>,
    pub parties_involved: Vec<String>,
    /// ISO 8601 date hint, not validated.
    pub effective_date: Option<String>,
    /// ISO 8601 date hint, not validated.
    pub expiration_date: Option<String>,
    pub overall_risk_level: RiskLevel,
    pub complexity_score: ComplexityScore,
    pub summary: String,
    pub total_clauses_analyzed: u64,
}

impl Default for AnalysisSummary {
    fn default() -> Self {
        Self {
            document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
            document_title: None,
            parties_involved: Vec::new(),
            effective_date: None,
            expiration_date: None,
            overall_risk_level: RiskLevel::default(),
            complexity_score: ComplexityScore::default(),
            summary: DEFAULT_SUMMARY.to_string(),
            total_clauses_analyzed: 0,
        }
    }
}

impl AnalysisSummary {
    /// Build a summary from its mapping, defaulting every absent or null key.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        let defaults = Self::default();

        let overall_risk_level = match optional_string(fields, "overall_risk_level")? {
            Some(label) => label.parse()?,
            None => defaults.overall_risk_level,
        };
        let complexity_score = match integer(fields, "complexity_score")? {
            Some(n) => ComplexityScore::try_from(n)?,
            None => defaults.complexity_score,
        };
        let total_clauses_analyzed = match integer(fields, "total_clauses_analyzed")? {
            Some(n) => u64::try_from(n).map_err(|_| ValidationError::OutOfRange {
                field: "total_clauses_analyzed".into(),
                value: n.to_string(),
                range: ">= 0",
            })?,
            None => defaults.total_clauses_analyzed,
        };

        Ok(Self {
            document_type: optional_string(fields, "document_type")?
                .unwrap_or(defaults.document_type),
            document_title: optional_string(fields, "document_title")?,
            parties_involved: string_list(fields, "parties_involved")?,
            effective_date: optional_string(fields, "effective_date")?,
            expiration_date: optional_string(fields, "expiration_date")?,
            overall_risk_level,
            complexity_score,
            summary: optional_string(fields, "summary")?.unwrap_or(defaults.summary),
            total_clauses_analyzed,
        })
    }
}

/// Caller-supplied identifiers and timing attached to every result.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub docid: String,
    pub email: String,
    /// ISO 8601 UTC completion time.
    pub analysis_timestamp: String,
    pub processing_time_seconds: f64,
}

/// The complete analysis returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub docid: String,
    pub email: String,
    pub analysis_summary: AnalysisSummary,
    pub key_terms: Vec<KeyTerm>,
    pub hidden_clauses: Vec<HiddenClause>,
    pub risks_identified: Vec<Risk>,
    pub financial_implications: Vec<FinancialImplication>,
    pub recommendations: Vec<Recommendation>,
    pub confidence_score: ConfidenceScore,
    pub analysis_timestamp: String,
    pub processing_time_seconds: f64,
}

impl AnalysisResult {
    /// Build a result from a normalized reply mapping.
    ///
    /// Missing keys take their field defaults; out-of-range scores, wrongly
    /// typed values and incomplete child records fail construction.
    pub fn from_fields(
        fields: &Map<String, Value>,
        envelope: Envelope,
    ) -> Result<Self, ValidationError> {
        let analysis_summary = match present(fields, "analysis_summary") {
            None => AnalysisSummary::default(),
            Some(Value::Object(summary)) => AnalysisSummary::from_fields(summary)
                .map_err(|e| e.within("analysis_summary"))?,
            Some(other) => return Err(type_error("analysis_summary", "object", other)),
        };

        let confidence_score = ConfidenceScore::try_from(
            float(fields, "confidence_score")?.unwrap_or(DEFAULT_CONFIDENCE),
        )?;

        Ok(Self {
            docid: envelope.docid,
            email: envelope.email,
            analysis_summary,
            key_terms: records(fields, "key_terms")?,
            hidden_clauses: records(fields, "hidden_clauses")?,
            risks_identified: records(fields, "risks_identified")?,
            financial_implications: records(fields, "financial_implications")?,
            recommendations: records(fields, "recommendations")?,
            confidence_score,
            analysis_timestamp: envelope.analysis_timestamp,
            processing_time_seconds: envelope.processing_time_seconds,
        })
    }
}

// ── Field readers ──

/// A key counts as absent when it is missing or null.
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(field: &str, expected: &'static str, found: &Value) -> ValidationError {
    ValidationError::Type {
        field: field.to_string(),
        expected,
        found: kind(found),
    }
}

fn optional_string(
    fields: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, ValidationError> {
    match present(fields, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(type_error(key, "string", other)),
    }
}

fn string_list(fields: &Map<String, Value>, key: &str) -> Result<Vec<String>, ValidationError> {
    match present(fields, key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(type_error(&format!("{key}[{i}]"), "string", other)),
            })
            .collect(),
        Some(other) => Err(type_error(key, "array", other)),
    }
}

/// Integers may arrive as `7`, `7.0` or `"7"`; `7.5` is a type error.
/// Whole numbers beyond the `i64` range are rejected, never saturated.
fn integer(fields: &Map<String, Value>, key: &str) -> Result<Option<i64>, ValidationError> {
    let Some(value) = present(fields, key) else {
        return Ok(None);
    };
    let whole = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => return Ok(Some(i)),
            None => n.as_f64(),
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => return Ok(Some(i)),
                Err(_) => s.parse::<f64>().ok(),
            }
        }
        _ => None,
    }
    .filter(|f| f.is_finite() && f.fract() == 0.0)
    .ok_or_else(|| type_error(key, "integer", value))?;

    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if whole >= i64::MIN as f64 && whole < i64::MAX as f64 {
        Ok(Some(whole as i64))
    } else {
        Err(ValidationError::OutOfRange {
            field: key.to_string(),
            value: value.to_string(),
            range: "64-bit integer",
        })
    }
}

/// Floats may arrive as numbers or numeric strings.
fn float(fields: &Map<String, Value>, key: &str) -> Result<Option<f64>, ValidationError> {
    let Some(value) = present(fields, key) else {
        return Ok(None);
    };
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| type_error(key, "number", value))
}

fn records<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    key: &str,
) -> Result<Vec<T>, ValidationError> {
    match present(fields, key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                T::deserialize(item).map_err(|source| ValidationError::Record {
                    field: format!("{key}[{i}]"),
                    source,
                })
            })
            .collect(),
        Some(other) => Err(type_error(key, "array", other)),
    }
}
