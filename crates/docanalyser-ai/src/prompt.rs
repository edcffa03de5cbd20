//! Prompt templates for document risk analysis.

/// Standing instruction sent alongside every analysis prompt.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a legal and financial document analyst reviewing contracts, insurance policies, \
leases and similar agreements on behalf of the person asked to sign them.

Extract the document type, parties, effective and expiration dates, and every term, \
condition, obligation, limitation and exclusion that matters to that person. Read the fine \
print, footnotes and conditional clauses. Flag one-sided terms, automatic renewals, penalty \
fees, liability caps and ambiguous wording.

Rate risks as CRITICAL (act now), HIGH (significant concern), MEDIUM (monitor) or LOW \
(minimal impact). Quote amounts where the document states them.

Answer with the requested JSON object only. Do not describe your process.";

/// JSON skeleton the model is asked to fill in.
const RESPONSE_SHAPE: &str = r#"{
    "analysis_summary": {
        "document_type": "<insurance / rental / contract / ...>",
        "document_title": "<title, or null>",
        "parties_involved": ["<every party named>"],
        "effective_date": "<YYYY-MM-DD, or null>",
        "expiration_date": "<YYYY-MM-DD, or null>",
        "overall_risk_level": "<CRITICAL | HIGH | MEDIUM | LOW>",
        "complexity_score": <integer 1-10>,
        "summary": "<2-3 sentence summary of the key findings>",
        "total_clauses_analyzed": <number of clauses reviewed>
    },
    "key_terms": [
        {
            "term": "<term>",
            "definition": "<plain-language meaning>",
            "location": "<where it appears>",
            "importance": "<HIGH | MEDIUM | LOW>"
        }
    ],
    "hidden_clauses": [
        {
            "clause_text": "<text of the clause>",
            "location": "<section>",
            "hidden_reason": "<why a reader might miss it>",
            "potential_impact": "<effect on the signer>",
            "severity": "<CRITICAL | HIGH | MEDIUM | LOW>"
        }
    ],
    "risks_identified": [
        {
            "risk_type": "<financial | legal | operational>",
            "description": "<the risk>",
            "likelihood": "<HIGH | MEDIUM | LOW>",
            "severity": "<CRITICAL | HIGH | MEDIUM | LOW>",
            "mitigation": "<how to address it>"
        }
    ],
    "financial_implications": [
        {
            "item": "<cost, fee or penalty>",
            "amount": "<amount if stated>",
            "frequency": "<when it applies>",
            "impact_type": "<COST | SAVING | LIABILITY>",
            "description": "<explanation>"
        }
    ],
    "recommendations": [
        {
            "action": "<what to do>",
            "priority": "<HIGH | MEDIUM | LOW>",
            "reasoning": "<why>",
            "timeline": "<when>"
        }
    ],
    "confidence_score": <0.0-1.0>
}"#;

/// Build the analysis prompt for a document.
pub fn build_analysis_prompt(document_text: &str) -> String {
    format!(
        "Analyse the document below and reply with ONLY a JSON object, no other text.\n\
         \n\
         DOCUMENT TEXT:\n\
         {document_text}\n\
         \n\
         Fill in this structure with your findings:\n\
         \n\
         {RESPONSE_SHAPE}\n\
         \n\
         Reply with the filled-in JSON object and nothing before or after it."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_document_and_shape() {
        let prompt = build_analysis_prompt("The Tenant shall pay rent monthly.");
        assert!(prompt.contains("The Tenant shall pay rent monthly."));
        assert!(prompt.contains("\"analysis_summary\""));
        assert!(prompt.contains("\"financial_implications\""));
        assert!(prompt.contains("\"confidence_score\""));
    }

    #[test]
    fn document_braces_are_not_interpreted() {
        let prompt = build_analysis_prompt("clause {1} applies");
        assert!(prompt.contains("clause {1} applies"));
    }
}
