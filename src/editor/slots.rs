//! Writers that commit a raw [`FieldValue`] into a typed record slot.
//!
//! Each writer validates the whole value before assigning, so a rejected
//! input leaves the slot as it was.
use crate::core::{EditorError, FieldValue, Rgba, TypedValue};

fn mismatch(key: &str, expected: &'static str, found: &FieldValue) -> EditorError {
    EditorError::ValueKind {
        key: key.to_string(),
        expected,
        found: found.kind_name(),
    }
}

/// Free text; `Null` clears.
pub(crate) fn text(key: &str, slot: &mut Option<String>, value: FieldValue) -> Result<(), EditorError> {
    *slot = match value {
        FieldValue::Null => None,
        FieldValue::Text(s) => Some(s),
        other => return Err(mismatch(key, "text", &other)),
    };
    Ok(())
}

pub(crate) fn flag(key: &str, slot: &mut bool, value: FieldValue) -> Result<(), EditorError> {
    match value {
        FieldValue::Bool(b) => {
            *slot = b;
            Ok(())
        }
        other => Err(mismatch(key, "boolean", &other)),
    }
}

/// Colour from the picker, or a hex/CSS name typed as text.
pub(crate) fn color(key: &str, slot: &mut Rgba, value: FieldValue) -> Result<(), EditorError> {
    *slot = match value {
        FieldValue::Color(c) => c,
        FieldValue::Text(s) => s.parse::<Rgba>().map_err(|_| EditorError::InvalidChoice {
            key: key.to_string(),
            value: s,
        })?,
        other => return Err(mismatch(key, "color", &other)),
    };
    Ok(())
}

/// Stored verbatim; interpretation is left to the consumer.
pub(crate) fn scalar(key: &str, slot: &mut TypedValue, value: FieldValue) -> Result<(), EditorError> {
    *slot = match value {
        FieldValue::Null => TypedValue::Null,
        FieldValue::Bool(b) => TypedValue::Bool(b),
        FieldValue::Int(i) => TypedValue::Int(i),
        FieldValue::Float(f) => TypedValue::Float(f),
        FieldValue::Text(s) => TypedValue::Text(s),
        other @ FieldValue::Color(_) => return Err(mismatch(key, "scalar", &other)),
    };
    Ok(())
}

/// One of a closed set of codes; `Null` clears.
pub(crate) fn choice<T>(
    key: &str,
    slot: &mut Option<T>,
    value: FieldValue,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<(), EditorError> {
    *slot = match value {
        FieldValue::Null => None,
        FieldValue::Text(s) => match parse(&s) {
            Some(parsed) => Some(parsed),
            None => {
                return Err(EditorError::InvalidChoice {
                    key: key.to_string(),
                    value: s,
                });
            }
        },
        other => return Err(mismatch(key, "choice", &other)),
    };
    Ok(())
}
