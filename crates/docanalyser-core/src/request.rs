use serde::{Deserialize, Serialize};

/// Inbound analysis request. Every field is caller-supplied and required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Caller's document identifier, echoed verbatim in the result.
    pub docid: String,
    /// Requester email, echoed verbatim in the result.
    pub email: String,
    /// Full document text to analyse.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_is_rejected() {
        let err = serde_json::from_str::<AnalysisRequest>(r#"{"docid":"d1","email":"a@b.com"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing field `text`"));
    }

    #[test]
    fn full_request_parses() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"docid":"d1","email":"a@b.com","text":"Lease"}"#).unwrap();
        assert_eq!(req.docid, "d1");
        assert_eq!(req.text, "Lease");
    }
}
