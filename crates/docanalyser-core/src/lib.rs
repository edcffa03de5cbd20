//! Core types for document analysis: the result schema, its validated scores,
//! and the inbound request shape.

pub mod error;
pub mod request;
pub mod schema;
pub mod score;

pub use error::ValidationError;
pub use request::AnalysisRequest;
pub use schema::{
    AnalysisResult, AnalysisSummary, Envelope, FinancialImplication, HiddenClause, KeyTerm,
    Recommendation, Risk,
};
pub use score::{ComplexityScore, ConfidenceScore, RiskLevel};
