use thiserror::Error;

use super::coerce::ColumnKind;

/// Why a raw default value could not be converted to its column's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("'{raw}' is not a number (column kind {kind})")]
    NotANumber { raw: String, kind: ColumnKind },

    #[error("'{raw}' does not fit in a 64-bit integer")]
    OutOfRange { raw: String },
}

/// Rejected editor mutations. The record is left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("entry index {index} out of range (list holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("unknown entry field '{0}'")]
    UnknownField(String),

    #[error("'{key}' expects {expected}, got {found}")]
    ValueKind {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("'{value}' is not a valid choice for '{key}'")]
    InvalidChoice { key: String, value: String },

    #[error("invalid props: {0}")]
    Props(String),
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Props(err.to_string())
    }
}
