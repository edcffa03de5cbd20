use thiserror::Error;

/// Why a mapping could not be turned into a schema record.
///
/// `field` is a dotted path from the root of the mapping, e.g.
/// `analysis_summary.complexity_score` or `key_terms[2]`.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {value} is outside the allowed range {range}")]
    OutOfRange {
        field: String,
        value: String,
        range: &'static str,
    },

    #[error("{field}: expected {expected}, got {found}")]
    Type {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{field}: unknown value {value:?}, expected one of {allowed}")]
    UnknownVariant {
        field: String,
        value: String,
        allowed: &'static str,
    },

    #[error("{field}: {source}")]
    Record {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ValidationError {
    /// The path of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::OutOfRange { field, .. }
            | Self::Type { field, .. }
            | Self::UnknownVariant { field, .. }
            | Self::Record { field, .. } => field,
        }
    }

    /// Prefix the field path with its parent record.
    pub(crate) fn within(mut self, parent: &str) -> Self {
        let field = match &mut self {
            Self::OutOfRange { field, .. }
            | Self::Type { field, .. }
            | Self::UnknownVariant { field, .. }
            | Self::Record { field, .. } => field,
        };
        *field = format!("{parent}.{field}");
        self
    }
}
