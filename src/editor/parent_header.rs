//! Parent header: groups child columns under one header column.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entries::{EntryList, EntryRecord};
use super::form::FormRow;
use super::slots;
use super::state::{overlay_props, EditorSchema, EditorState};
use crate::config::EditorDefaults;
use crate::core::{Alignment, ColumnFormat, EditorError, FieldValue, TypedValue};

/// Formats a parent header may use
const HEADER_FORMATS: [ColumnFormat; 3] = [ColumnFormat::IndianNumber, ColumnFormat::Percentage, ColumnFormat::Image];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildHeader {
    pub child_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum ChildField {
    ChildKey,
}

impl EntryRecord for ChildHeader {
    type Field = ChildField;

    fn set_field(&mut self, field: ChildField, value: FieldValue) -> Result<(), EditorError> {
        match field {
            ChildField::ChildKey => slots::text(&field.to_string(), &mut self.child_key, value),
        }
    }

    fn form_rows(&self) -> Vec<FormRow> {
        vec![FormRow::text(ChildField::ChildKey, "Child key", self.child_key.clone())]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentHeaderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub asc: bool,
    pub clearable: bool,
    pub multiple: bool,
    pub search_all_options: bool,
    #[serde(skip_serializing_if = "TypedValue::is_null")]
    pub default_value: TypedValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ColumnFormat>,
    pub show_total: bool,
    pub disable_filters: bool,
    pub disable_sort_by: bool,
    /// Child columns, always read and written under this one key
    pub children: EntryList<ChildHeader>,
}

impl Default for ParentHeaderConfig {
    fn default() -> Self {
        Self::seeded(&EditorDefaults::default())
    }
}

impl ParentHeaderConfig {
    pub fn seeded(defaults: &EditorDefaults) -> Self {
        Self {
            column: None,
            metric: None,
            label: None,
            asc: defaults.asc,
            clearable: defaults.clearable,
            multiple: defaults.multiple,
            search_all_options: defaults.search_all_options,
            default_value: TypedValue::Null,
            alignment: None,
            format: None,
            show_total: defaults.show_total,
            disable_filters: defaults.disable_filters,
            disable_sort_by: defaults.disable_sort_by,
            children: EntryList::default(),
        }
    }

    pub fn from_props(props: &serde_json::Value) -> Result<Self, EditorError> {
        Self::from_props_with(props, &EditorDefaults::default())
    }

    pub fn from_props_with(props: &serde_json::Value, defaults: &EditorDefaults) -> Result<Self, EditorError> {
        let record: Self = overlay_props(&Self::seeded(defaults), props)?;
        if let Some(format) = record.format.filter(|f| !HEADER_FORMATS.contains(f)) {
            return Err(EditorError::Props(format!("format '{format}' is not available for parent headers")));
        }
        Ok(record)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum ParentHeaderAttribute {
    Column,
    Metric,
    Label,
    Asc,
    Clearable,
    Multiple,
    SearchAllOptions,
    DefaultValue,
    Alignment,
    Format,
    ShowTotal,
    DisableFilters,
    DisableSortBy,
}

#[derive(Debug, Clone, Copy)]
pub struct ParentHeader;

impl ParentHeader {
    pub fn format_choices() -> Vec<(String, String)> {
        HEADER_FORMATS
            .iter()
            .map(|f| (f.to_string(), f.display_name().to_string()))
            .collect()
    }

    fn parse_format(code: &str) -> Option<ColumnFormat> {
        code.parse::<ColumnFormat>()
            .ok()
            .filter(|f| HEADER_FORMATS.contains(f))
    }
}

impl EditorSchema for ParentHeader {
    type Record = ParentHeaderConfig;
    type Attribute = ParentHeaderAttribute;
    type Entry = ChildHeader;

    const ENTRY_KEY: &'static str = "children";
    const ENTRY_TITLE: &'static str = "Children";

    fn entries(record: &ParentHeaderConfig) -> &EntryList<ChildHeader> {
        &record.children
    }

    fn entries_mut(record: &mut ParentHeaderConfig) -> &mut EntryList<ChildHeader> {
        &mut record.children
    }

    fn set_attribute(
        record: &mut ParentHeaderConfig,
        attr: ParentHeaderAttribute,
        value: FieldValue,
    ) -> Result<(), EditorError> {
        use ParentHeaderAttribute as A;

        let key = attr.to_string();
        match attr {
            A::Column => slots::text(&key, &mut record.column, value),
            A::Metric => slots::text(&key, &mut record.metric, value),
            A::Label => slots::text(&key, &mut record.label, value),
            A::Asc => slots::flag(&key, &mut record.asc, value),
            A::Clearable => slots::flag(&key, &mut record.clearable, value),
            A::Multiple => slots::flag(&key, &mut record.multiple, value),
            A::SearchAllOptions => slots::flag(&key, &mut record.search_all_options, value),
            A::DefaultValue => slots::scalar(&key, &mut record.default_value, value),
            A::Alignment => slots::choice(&key, &mut record.alignment, value, |s| s.parse().ok()),
            A::Format => slots::choice(&key, &mut record.format, value, ParentHeader::parse_format),
            A::ShowTotal => slots::flag(&key, &mut record.show_total, value),
            A::DisableFilters => slots::flag(&key, &mut record.disable_filters, value),
            A::DisableSortBy => slots::flag(&key, &mut record.disable_sort_by, value),
        }
    }

    fn is_default_value(attr: ParentHeaderAttribute) -> bool {
        attr == ParentHeaderAttribute::DefaultValue
    }

    fn column(record: &ParentHeaderConfig) -> Option<&str> {
        record.column.as_deref()
    }

    fn multiple(record: &ParentHeaderConfig) -> bool {
        record.multiple
    }

    fn form_rows(record: &ParentHeaderConfig) -> Vec<FormRow> {
        vec![FormRow::text(ParentHeaderAttribute::Column, "Column Key", record.column.clone())]
    }
}

pub type ParentHeaderState = EditorState<ParentHeader>;

impl EditorState<ParentHeader> {
    pub fn append_child(&mut self) -> usize {
        self.append_entry()
    }

    pub fn set_child_key(&mut self, index: usize, key: impl Into<FieldValue>) -> Result<(), EditorError> {
        self.set_entry_field(index, ChildField::ChildKey, key)
    }

    pub fn children(&self) -> &EntryList<ChildHeader> {
        &self.record().children
    }
}
