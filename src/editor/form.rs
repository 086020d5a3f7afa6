//! Form-row descriptors handed to the renderer.
//!
//! The editors do no layout of their own; a renderer walks these rows and
//! draws a generic labelled input for each one.
use serde::Serialize;

use crate::core::FieldValue;

/// Input widget used for a row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Control {
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<&'static str>,
    },
    /// `choices` are (value, label) pairs in display order
    Select {
        choices: Vec<(String, String)>,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<&'static str>,
    },
    Checkbox,
    ColorPicker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormRow {
    /// Attribute or entry-field wire name
    pub key: String,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<&'static str>,
    pub control: Control,
    pub value: FieldValue,
}

impl FormRow {
    pub fn text(key: impl ToString, label: &'static str, value: impl Into<FieldValue>) -> Self {
        Self::new(key, label, Control::Text { placeholder: None }, value)
    }

    pub fn select(
        key: impl ToString,
        label: &'static str,
        choices: Vec<(String, String)>,
        value: impl Into<FieldValue>,
    ) -> Self {
        Self::new(key, label, Control::Select { choices, placeholder: None }, value)
    }

    pub fn checkbox(key: impl ToString, label: &'static str, value: bool) -> Self {
        Self::new(key, label, Control::Checkbox, value)
    }

    pub fn color(key: impl ToString, label: &'static str, value: impl Into<FieldValue>) -> Self {
        Self::new(key, label, Control::ColorPicker, value)
    }

    fn new(key: impl ToString, label: &'static str, control: Control, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.to_string(),
            label,
            tooltip: None,
            control,
            value: value.into(),
        }
    }

    pub fn with_tooltip(mut self, tooltip: &'static str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    pub fn with_placeholder(mut self, text: &'static str) -> Self {
        match &mut self.control {
            Control::Text { placeholder } | Control::Select { placeholder, .. } => *placeholder = Some(text),
            Control::Checkbox | Control::ColorPicker => {}
        }
        self
    }
}

/// The open editor as a whole: popover title, attribute rows and one row set per entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormLayout {
    pub title: &'static str,
    pub rows: Vec<FormRow>,
    /// Wire name of the entry list inside the record
    pub entry_key: &'static str,
    pub entry_title: &'static str,
    pub entries: Vec<Vec<FormRow>>,
}
