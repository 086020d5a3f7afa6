//! Conversion of free-text default values into a column's native type.
use strum::Display;
use tracing::warn;

use super::error::CoercionError;
use super::types::TypedValue;

const INTEGRAL_TYPES: [&str; 6] = ["TINYINT", "SMALLINT", "INT", "INTEGER", "BIGINT", "LONG"];
const DECIMAL_TYPES: [&str; 6] = ["FLOAT", "DOUBLE", "REAL", "NUMERIC", "DECIMAL", "MONEY"];

/// Coercion family of a declared column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ColumnKind {
    Boolean,
    Integral,
    Decimal,
    Other,
}

impl ColumnKind {
    /// Classify a declared type name; comparison ignores ASCII case.
    pub fn from_type_name(type_name: &str) -> Self {
        let upper = type_name.trim().to_ascii_uppercase();
        if upper == "BOOLEAN" {
            Self::Boolean
        } else if INTEGRAL_TYPES.contains(&upper.as_str()) {
            Self::Integral
        } else if DECIMAL_TYPES.contains(&upper.as_str()) {
            Self::Decimal
        } else {
            Self::Other
        }
    }
}

/// Convert `raw` to the native representation of `column_type`.
///
/// Booleans compare against the literal `"true"`. Integral columns keep the
/// leading integer of a valid number (`"4.7"` gives 4). Types outside the
/// boolean, integral and decimal families pass the text through unchanged.
pub fn coerce(raw: &str, column_type: &str) -> Result<TypedValue, CoercionError> {
    let kind = ColumnKind::from_type_name(column_type);
    match kind {
        ColumnKind::Boolean => Ok(TypedValue::Bool(raw == "true")),
        ColumnKind::Integral => {
            finite_number(raw).ok_or_else(|| not_a_number(raw, kind))?;
            integer_prefix(raw.trim()).map(TypedValue::Int)
        }
        ColumnKind::Decimal => finite_number(raw)
            .map(TypedValue::Float)
            .ok_or_else(|| not_a_number(raw, kind)),
        ColumnKind::Other => Ok(TypedValue::Text(raw.to_string())),
    }
}

/// Like [`coerce`], but a failed parse degrades to `TypedValue::Null` ("no default set").
///
/// The second element carries the reason the value was cleared.
pub fn coerce_lossy(raw: &str, column_type: &str) -> (TypedValue, Option<CoercionError>) {
    match coerce(raw, column_type) {
        Ok(value) => (value, None),
        Err(err) => {
            warn!("Clearing default value: {err}");
            (TypedValue::Null, Some(err))
        }
    }
}

fn not_a_number(raw: &str, kind: ColumnKind) -> CoercionError {
    CoercionError::NotANumber {
        raw: raw.to_string(),
        kind,
    }
}

/// Parse the whole (trimmed) input as a finite decimal number.
fn finite_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    // f64::from_str also takes "inf" and "NaN", which are not numbers here.
    // Hex such as "0x1A" is rejected by the same filter and clears the value.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Optional sign followed by base-10 digits, read from the start of `s`.
fn integer_prefix(s: &str) -> Result<i64, CoercionError> {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let digits = unsigned.len() - unsigned.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return Err(not_a_number(s, ColumnKind::Integral));
    }
    let end = s.len() - unsigned.len() + digits;
    s[..end].parse::<i64>().map_err(|_| CoercionError::OutOfRange { raw: s.to_string() })
}
