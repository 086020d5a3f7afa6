//! Filter box: per-column display rules plus colour conditions.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use super::entries::{EntryList, EntryRecord};
use super::form::FormRow;
use super::slots;
use super::state::{overlay_props, EditorSchema, EditorState};
use crate::config::EditorDefaults;
use crate::core::{Alignment, ColumnFormat, EditorError, FieldValue, Rgba, SymbolCode, TypedValue};

/// "Apply `color` when `initial_value <initial_symbol> x` and `x <final_symbol> final_value`".
///
/// Either bound may be left null; how a single bound is read is up to the
/// evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    pub initial_value: Option<String>,
    pub initial_symbol: Option<SymbolCode>,
    pub final_value: Option<String>,
    pub final_symbol: Option<SymbolCode>,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum ConditionField {
    InitialValue,
    InitialSymbol,
    FinalValue,
    FinalSymbol,
    Color,
}

impl EntryRecord for Condition {
    type Field = ConditionField;

    fn set_field(&mut self, field: ConditionField, value: FieldValue) -> Result<(), EditorError> {
        let key = field.to_string();
        match field {
            ConditionField::InitialValue => slots::text(&key, &mut self.initial_value, value),
            ConditionField::InitialSymbol => {
                slots::choice(&key, &mut self.initial_symbol, value, SymbolCode::parse_input)
            }
            ConditionField::FinalValue => slots::text(&key, &mut self.final_value, value),
            ConditionField::FinalSymbol => slots::choice(&key, &mut self.final_symbol, value, SymbolCode::parse_input),
            ConditionField::Color => slots::color(&key, &mut self.color, value),
        }
    }

    fn form_rows(&self) -> Vec<FormRow> {
        vec![
            FormRow::text(ConditionField::InitialValue, "Initial Value", self.initial_value.clone()),
            FormRow::select(
                ConditionField::InitialSymbol,
                "Initial Symbol",
                SymbolCode::choices(),
                self.initial_symbol,
            ),
            FormRow::text(ConditionField::FinalValue, "Final Value", self.final_value.clone()),
            FormRow::select(
                ConditionField::FinalSymbol,
                "Final Symbol",
                SymbolCode::choices(),
                self.final_symbol,
            ),
            FormRow::color(ConditionField::Color, "Color", self.color),
        ]
    }
}

/// Full editable record of a filter box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
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
    /// Typed to the column when single-select, raw text otherwise
    #[serde(skip_serializing_if = "TypedValue::is_null")]
    pub default_value: TypedValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ColumnFormat>,
    pub show_total: bool,
    pub date_format: Option<String>,
    pub conditional_column: Option<String>,
    pub conditional_column_text_color: Rgba,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_formula: Option<String>,
    pub disable_filters: bool,
    pub disable_sort_by: bool,
    pub thumbnail_height: TypedValue,
    pub thumbnail_width: TypedValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark_column: Option<String>,
    pub conditions: EntryList<Condition>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::seeded(&EditorDefaults::default())
    }
}

impl FilterConfig {
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
            date_format: None,
            conditional_column: None,
            conditional_column_text_color: defaults.text_color,
            total_formula: None,
            disable_filters: defaults.disable_filters,
            disable_sort_by: defaults.disable_sort_by,
            thumbnail_height: defaults.thumbnail_height.clone(),
            thumbnail_width: defaults.thumbnail_width.clone(),
            remark_column: None,
            conditions: EntryList::default(),
        }
    }

    /// Seed from the owning form's props (camelCase keys) over the built-in defaults.
    pub fn from_props(props: &serde_json::Value) -> Result<Self, EditorError> {
        Self::from_props_with(props, &EditorDefaults::default())
    }

    pub fn from_props_with(props: &serde_json::Value, defaults: &EditorDefaults) -> Result<Self, EditorError> {
        overlay_props(&Self::seeded(defaults), props)
    }
}

/// Attributes of [`FilterConfig`], addressable by camelCase wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum FilterAttribute {
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
    DateFormat,
    ConditionalColumn,
    ConditionalColumnTextColor,
    TotalFormula,
    DisableFilters,
    DisableSortBy,
    ThumbnailHeight,
    ThumbnailWidth,
    RemarkColumn,
}

/// Schema marker for the filter-box editor.
#[derive(Debug, Clone, Copy)]
pub struct FilterBox;

impl FilterBox {
    /// Format codes offered by the filter box
    pub fn format_choices() -> Vec<(String, String)> {
        ColumnFormat::iter()
            .map(|f| (f.to_string(), f.display_name().to_string()))
            .collect()
    }
}

impl EditorSchema for FilterBox {
    type Record = FilterConfig;
    type Attribute = FilterAttribute;
    type Entry = Condition;

    const ENTRY_KEY: &'static str = "conditions";
    const ENTRY_TITLE: &'static str = "Conditions";

    fn entries(record: &FilterConfig) -> &EntryList<Condition> {
        &record.conditions
    }

    fn entries_mut(record: &mut FilterConfig) -> &mut EntryList<Condition> {
        &mut record.conditions
    }

    fn set_attribute(record: &mut FilterConfig, attr: FilterAttribute, value: FieldValue) -> Result<(), EditorError> {
        use FilterAttribute as A;

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
            A::Format => slots::choice(&key, &mut record.format, value, |s| s.parse().ok()),
            A::ShowTotal => slots::flag(&key, &mut record.show_total, value),
            A::DateFormat => slots::text(&key, &mut record.date_format, value),
            A::ConditionalColumn => slots::text(&key, &mut record.conditional_column, value),
            A::ConditionalColumnTextColor => slots::color(&key, &mut record.conditional_column_text_color, value),
            A::TotalFormula => slots::text(&key, &mut record.total_formula, value),
            A::DisableFilters => slots::flag(&key, &mut record.disable_filters, value),
            A::DisableSortBy => slots::flag(&key, &mut record.disable_sort_by, value),
            A::ThumbnailHeight => slots::scalar(&key, &mut record.thumbnail_height, value),
            A::ThumbnailWidth => slots::scalar(&key, &mut record.thumbnail_width, value),
            A::RemarkColumn => slots::text(&key, &mut record.remark_column, value),
        }
    }

    fn is_default_value(attr: FilterAttribute) -> bool {
        attr == FilterAttribute::DefaultValue
    }

    fn column(record: &FilterConfig) -> Option<&str> {
        record.column.as_deref()
    }

    fn multiple(record: &FilterConfig) -> bool {
        record.multiple
    }

    fn form_rows(record: &FilterConfig) -> Vec<FormRow> {
        use FilterAttribute as A;

        const COLOR_SOURCE: &str = "Color will be applied from this column";
        vec![
            FormRow::text(A::Column, "Column Key", record.column.clone()),
            FormRow::select(A::Alignment, "Alignment", Alignment::choices(), record.alignment.map(|a| a.to_string()))
                .with_placeholder("Alignment"),
            FormRow::select(A::Format, "Format", FilterBox::format_choices(), record.format.map(|f| f.to_string()))
                .with_placeholder("Number Format"),
            FormRow::text(A::ThumbnailHeight, "Thumbnail Height", record.thumbnail_height.clone()),
            FormRow::text(A::ThumbnailWidth, "Thumbnail Width", record.thumbnail_width.clone()),
            FormRow::text(A::RemarkColumn, "Remark Column", record.remark_column.clone()),
            FormRow::checkbox(A::ShowTotal, "Show Total", record.show_total).with_tooltip("Total"),
            FormRow::text(A::TotalFormula, "Total Formula", record.total_formula.clone())
                .with_placeholder("Total Formula"),
            FormRow::checkbox(A::DisableFilters, "Disable Filter", record.disable_filters)
                .with_tooltip("Disable search option"),
            FormRow::checkbox(A::DisableSortBy, "Disable Sorting", record.disable_sort_by)
                .with_tooltip("Disable sorting"),
            FormRow::text(A::DateFormat, "Date Format", record.date_format.clone())
                .with_tooltip("If it's a date filter")
                .with_placeholder("Date Format"),
            FormRow::text(A::ConditionalColumn, "Conditional Column", record.conditional_column.clone())
                .with_tooltip(COLOR_SOURCE)
                .with_placeholder("Conditional Column"),
            FormRow::color(
                A::ConditionalColumnTextColor,
                "Conditional Column Text Color",
                record.conditional_column_text_color,
            )
            .with_tooltip(COLOR_SOURCE),
        ]
    }
}

/// Editor state for one filter box
pub type FilterConfigState = EditorState<FilterBox>;

impl EditorState<FilterBox> {
    pub fn append_condition(&mut self) -> usize {
        self.append_entry()
    }

    pub fn set_condition_field(
        &mut self,
        index: usize,
        field: ConditionField,
        value: impl Into<FieldValue>,
    ) -> Result<(), EditorError> {
        self.set_entry_field(index, field, value)
    }

    pub fn conditions(&self) -> &EntryList<Condition> {
        &self.record().conditions
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use super::*;
    use crate::core::{ColumnDescriptor, Datasource};

    fn datasource() -> Arc<Datasource> {
        Arc::new(Datasource::new(vec![
            ColumnDescriptor::new("qty", "INTEGER"),
            ColumnDescriptor::new("active", "BOOLEAN"),
            ColumnDescriptor::new("price", "decimal"),
            ColumnDescriptor::new("name", "VARCHAR"),
        ]))
    }

    fn single_select(column: &str) -> FilterConfigState {
        let mut record = FilterConfig::default();
        record.column = Some(column.to_string());
        record.multiple = false;
        FilterConfigState::new(record, datasource())
    }

    #[test]
    fn test_defaults() {
        let record = FilterConfig::default();
        assert!(record.asc);
        assert!(record.clearable);
        assert!(record.multiple);
        assert!(!record.search_all_options);
        assert!(!record.show_total);
        assert!(record.disable_filters);
        assert_eq!(record.date_format, None);
        assert_eq!(record.conditional_column_text_color, Rgba::BLACK);
        assert_eq!(record.thumbnail_height, TypedValue::Int(50));
        assert_eq!(record.thumbnail_width, TypedValue::Int(50));
        assert!(record.conditions.is_empty());
    }

    #[test]
    fn test_default_value_is_coerced_for_single_select() {
        let mut state = single_select("qty");
        state.set_attribute(FilterAttribute::DefaultValue, "42").unwrap();
        assert_eq!(state.record().default_value, TypedValue::Int(42));

        state.set_attribute(FilterAttribute::DefaultValue, "42abc").unwrap();
        assert_eq!(state.record().default_value, TypedValue::Null);
        assert!(state.last_coercion_error().is_some());

        state.set_attribute(FilterAttribute::DefaultValue, "7").unwrap();
        assert!(state.last_coercion_error().is_none());
    }

    #[test]
    fn test_decimal_and_passthrough_columns() {
        let mut state = single_select("price");
        state.set_attribute(FilterAttribute::DefaultValue, "9.5").unwrap();
        assert_eq!(state.record().default_value, TypedValue::Float(9.5));

        let mut state = single_select("name");
        state.set_attribute(FilterAttribute::DefaultValue, "42").unwrap();
        assert_eq!(state.record().default_value, TypedValue::Text("42".into()));
    }

    #[test]
    fn test_unknown_column_skips_coercion() {
        let mut state = single_select("missing");
        state.set_attribute(FilterAttribute::DefaultValue, "42").unwrap();
        assert_eq!(state.record().default_value, TypedValue::Text("42".into()));
    }

    #[test]
    fn test_empty_default_is_stored_raw() {
        let mut state = single_select("qty");
        state.set_attribute(FilterAttribute::DefaultValue, "").unwrap();
        assert_eq!(state.record().default_value, TypedValue::Text(String::new()));
    }

    #[test]
    fn test_other_attributes_are_verbatim() {
        let mut state = single_select("qty");
        state.set_attribute(FilterAttribute::ThumbnailHeight, "abc").unwrap();
        state.set_attribute(FilterAttribute::Label, "42").unwrap();
        assert_eq!(state.record().thumbnail_height, TypedValue::Text("abc".into()));
        assert_eq!(state.record().label.as_deref(), Some("42"));
    }

    #[test]
    fn test_attribute_by_wire_name() {
        let mut state = single_select("qty");
        state.set_attribute_by_name("alignment", "center").unwrap();
        state.set_attribute_by_name("format", "PERCENTAGE").unwrap();
        state.set_attribute_by_name("conditionalColumnTextColor", "#ff0000").unwrap();
        assert_eq!(state.record().alignment, Some(Alignment::Center));
        assert_eq!(state.record().format, Some(ColumnFormat::Percentage));
        assert_eq!(state.record().conditional_column_text_color, Rgba::new(255, 0, 0, 255));

        let err = state.set_attribute_by_name("colour", "red").unwrap_err();
        assert_eq!(err, EditorError::UnknownAttribute("colour".into()));
    }

    #[test]
    fn test_rejected_value_does_not_notify() {
        let count = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&count);
        let mut state = single_select("qty").with_sink(move |_: FilterConfig| *seen.borrow_mut() += 1);

        assert!(state.set_attribute(FilterAttribute::Alignment, "justify").is_err());
        assert!(state.set_attribute(FilterAttribute::ShowTotal, "yes").is_err());
        assert_eq!(*count.borrow(), 0);
        assert_eq!(state.record().alignment, None);

        state.set_attribute(FilterAttribute::ShowTotal, true).unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_text_summary() {
        let mut state = FilterConfigState::new(FilterConfig::default(), datasource());
        assert_eq!(state.text_summary(), "N/A");
        state.set_attribute(FilterAttribute::Column, "").unwrap();
        assert_eq!(state.text_summary(), "N/A");
        state.set_attribute(FilterAttribute::Column, "qty").unwrap();
        assert_eq!(state.text_summary(), "qty");
    }

    #[test]
    fn test_condition_rows_follow_entry() {
        let mut state = single_select("qty");
        state.append_condition();
        state.set_condition_field(0, ConditionField::InitialSymbol, ">=").unwrap();
        let rows = state.entry_rows(0).unwrap();
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["initialValue", "initialSymbol", "finalValue", "finalSymbol", "color"]);
        assert_eq!(rows[1].value, FieldValue::Text("GREATER_EQUAL".into()));
        assert!(state.entry_rows(1).is_err());
    }

    #[test]
    fn test_form_rows_cover_editable_attributes() {
        let state = single_select("qty");
        let rows = state.form_rows();
        assert_eq!(rows.first().map(|r| r.label), Some("Column Key"));
        assert_eq!(rows.len(), 13);
        assert!(rows.iter().all(|r| r.key.parse::<FilterAttribute>().is_ok()));
    }

    #[test]
    fn test_layout_has_rows_per_condition() {
        let mut state = single_select("qty");
        state.append_condition();
        state.append_condition();
        let layout = state.layout();
        assert_eq!(layout.title, "Filter Configuration");
        assert_eq!(layout.entry_key, "conditions");
        assert_eq!(layout.entry_title, "Conditions");
        assert_eq!(layout.rows, state.form_rows());
        assert_eq!(layout.entries.len(), 2);
        assert_eq!(layout.entries[1], state.entry_rows(1).unwrap());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut state = single_select("qty");
        state.append_condition();
        let json = state.to_json().unwrap();
        assert_eq!(json["column"], "qty");
        assert_eq!(json["multiple"], false);
        assert_eq!(json["thumbnailHeight"], 50);
        assert_eq!(json["dateFormat"], serde_json::Value::Null);
        assert_eq!(
            json["conditions"][0],
            serde_json::json!({
                "initialValue": null,
                "initialSymbol": null,
                "finalValue": null,
                "finalSymbol": null,
                "color": { "r": 0, "g": 0, "b": 0, "a": 255 }
            })
        );
    }
}
