//! EditorState: the attribute store shared by both column editors.
//!
//! A schema ([`EditorSchema`]) names the record type, its attributes and its
//! entry shape; the state owns one record for the lifetime of an editing
//! session and pushes an owned snapshot to the change sink after every
//! committed mutation.
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::str::FromStr;
use std::sync::Arc;
use strum::Display as StrumDisplay;
use tracing::{debug, warn};

use super::entries::{EntryList, EntryRecord};
use super::form::{FormLayout, FormRow};
use super::notifier::{ChangeNotifier, ChangeSink};
use crate::core::{coerce_lossy, CoercionError, Datasource, EditorError, FieldValue, TypedValue};

/// Shown by the closed editor when no column is set
pub const SUMMARY_PLACEHOLDER: &str = "N/A";

/// Popover title shared by both editors
pub const POPOVER_TITLE: &str = "Filter Configuration";

/// Field set and entry shape of one editor variant.
pub trait EditorSchema {
    type Record: Clone + Debug + PartialEq + Serialize + DeserializeOwned;
    type Attribute: Copy + Debug + Display + FromStr;
    type Entry: EntryRecord;

    /// Wire name of the entry list inside the record
    const ENTRY_KEY: &'static str;
    /// Caption above the entry list
    const ENTRY_TITLE: &'static str;

    fn entries(record: &Self::Record) -> &EntryList<Self::Entry>;
    fn entries_mut(record: &mut Self::Record) -> &mut EntryList<Self::Entry>;

    /// Store `value` verbatim into `attr`. Must leave the record unchanged on error.
    fn set_attribute(record: &mut Self::Record, attr: Self::Attribute, value: FieldValue) -> Result<(), EditorError>;

    /// Whether `attr` is the default-value attribute subject to coercion
    fn is_default_value(attr: Self::Attribute) -> bool;

    fn column(record: &Self::Record) -> Option<&str>;
    fn multiple(record: &Self::Record) -> bool;

    /// Rows for the scalar attributes, in presentation order
    fn form_rows(record: &Self::Record) -> Vec<FormRow>;
}

/// The two observable states of an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay)]
pub enum EditorView {
    /// Only the summary text is shown
    #[default]
    Closed,
    /// Full form plus entry list
    Open,
}

impl EditorView {
    pub fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }
}

pub struct EditorState<S: EditorSchema> {
    record: S::Record,
    datasource: Arc<Datasource>,
    notifier: ChangeNotifier<S::Record>,
    view: EditorView,
    last_coercion_error: Option<CoercionError>,
}

impl<S: EditorSchema> Debug for EditorState<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorState")
            .field("record", &self.record)
            .field("view", &self.view)
            .field("notifier", &self.notifier)
            .finish()
    }
}

impl<S: EditorSchema> EditorState<S> {
    /// Start an editing session on `record`. Nothing is notified until the first mutation.
    pub fn new(record: S::Record, datasource: Arc<Datasource>) -> Self {
        Self {
            record,
            datasource,
            notifier: ChangeNotifier::new(),
            view: EditorView::default(),
            last_coercion_error: None,
        }
    }

    pub fn with_sink(mut self, sink: impl ChangeSink<S::Record> + 'static) -> Self {
        self.notifier.set_sink(sink);
        self
    }

    pub fn register_change_handler(&mut self, sink: impl ChangeSink<S::Record> + 'static) {
        self.notifier.set_sink(sink);
    }

    pub fn record(&self) -> &S::Record {
        &self.record
    }

    /// Owned copy of the current record, independent of later edits
    pub fn snapshot(&self) -> S::Record {
        self.record.clone()
    }

    pub fn into_record(self) -> S::Record {
        self.record
    }

    pub fn datasource(&self) -> &Datasource {
        &self.datasource
    }

    pub fn entries(&self) -> &EntryList<S::Entry> {
        S::entries(&self.record)
    }

    pub fn notifications(&self) -> u64 {
        self.notifier.notifications()
    }

    /// Set when the most recent default-value edit failed to parse and was cleared
    pub fn last_coercion_error(&self) -> Option<&CoercionError> {
        self.last_coercion_error.as_ref()
    }

    /// Commit a new value for `attr` and notify.
    ///
    /// A non-empty text default value on a single-select editor whose column
    /// is known is converted to the column's type first; a failed parse is
    /// stored as null.
    pub fn set_attribute(&mut self, attr: S::Attribute, value: impl Into<FieldValue>) -> Result<(), EditorError> {
        let mut value = value.into();
        let mut coercion_error = None;
        if S::is_default_value(attr) {
            if let Some((typed, err)) = self.coerce_default(&value) {
                value = typed.into();
                coercion_error = err;
            }
        }

        if let Err(err) = S::set_attribute(&mut self.record, attr, value) {
            warn!(attribute = %attr, "Rejected attribute value: {err}");
            return Err(err);
        }
        if S::is_default_value(attr) {
            self.last_coercion_error = coercion_error;
        }
        debug!(attribute = %attr, "Attribute updated");
        self.notify();
        Ok(())
    }

    /// [`set_attribute`](Self::set_attribute) keyed by the attribute's wire name
    pub fn set_attribute_by_name(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), EditorError> {
        let attr = name
            .parse::<S::Attribute>()
            .map_err(|_| EditorError::UnknownAttribute(name.to_string()))?;
        self.set_attribute(attr, value)
    }

    /// Append a default entry and notify. Returns the new entry's index.
    pub fn append_entry(&mut self) -> usize {
        let index = S::entries_mut(&mut self.record).append();
        debug!(key = S::ENTRY_KEY, index, "Entry appended");
        self.notify();
        index
    }

    /// Mutate one field of the entry at `index` and notify. No coercion is applied.
    pub fn set_entry_field(
        &mut self,
        index: usize,
        field: <S::Entry as EntryRecord>::Field,
        value: impl Into<FieldValue>,
    ) -> Result<(), EditorError> {
        if let Err(err) = S::entries_mut(&mut self.record).set_field(index, field, value.into()) {
            warn!(key = S::ENTRY_KEY, index, field = %field, "Rejected entry update: {err}");
            return Err(err);
        }
        debug!(key = S::ENTRY_KEY, index, field = %field, "Entry updated");
        self.notify();
        Ok(())
    }

    pub fn set_entry_field_by_name(
        &mut self,
        index: usize,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), EditorError> {
        let field = name
            .parse::<<S::Entry as EntryRecord>::Field>()
            .map_err(|_| EditorError::UnknownField(name.to_string()))?;
        self.set_entry_field(index, field, value)
    }

    /// Text for the closed editor: the column, or `"N/A"` when unset or empty.
    pub fn text_summary(&self) -> String {
        match S::column(&self.record) {
            Some(column) if !column.is_empty() => column.to_string(),
            _ => SUMMARY_PLACEHOLDER.to_string(),
        }
    }

    pub fn view(&self) -> EditorView {
        self.view
    }

    pub fn is_open(&self) -> bool {
        self.view == EditorView::Open
    }

    /// Click on the edit trigger
    pub fn toggle(&mut self) -> EditorView {
        self.view = self.view.toggled();
        self.view
    }

    pub fn open(&mut self) {
        self.view = EditorView::Open;
    }

    pub fn close(&mut self) {
        self.view = EditorView::Closed;
    }

    pub fn form_rows(&self) -> Vec<FormRow> {
        S::form_rows(&self.record)
    }

    pub fn entry_rows(&self, index: usize) -> Result<Vec<FormRow>, EditorError> {
        let entries = S::entries(&self.record);
        entries
            .get(index)
            .map(|entry| entry.form_rows())
            .ok_or(EditorError::IndexOutOfRange {
                index,
                len: entries.len(),
            })
    }

    /// Everything the open popover shows, in presentation order
    pub fn layout(&self) -> FormLayout {
        FormLayout {
            title: POPOVER_TITLE,
            rows: S::form_rows(&self.record),
            entry_key: S::ENTRY_KEY,
            entry_title: S::ENTRY_TITLE,
            entries: self.entries().iter().map(|entry| entry.form_rows()).collect(),
        }
    }

    /// The record in the owning form's camelCase JSON shape
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.record)
    }

    fn coerce_default(&self, value: &FieldValue) -> Option<(TypedValue, Option<CoercionError>)> {
        let FieldValue::Text(raw) = value else {
            return None;
        };
        if raw.is_empty() || S::multiple(&self.record) {
            return None;
        }
        let column = S::column(&self.record).and_then(|name| self.datasource.find_column(name))?;
        Some(coerce_lossy(raw, &column.type_name))
    }

    fn notify(&mut self) {
        let snapshot = self.record.clone();
        self.notifier.notify(snapshot);
    }
}

/// Overlay a props object onto a seeded record.
///
/// Keys absent from `props`, or present as `null`, keep the seed's value.
/// Optional attributes are absent from the seed when unset, so they stay unset.
pub(crate) fn overlay_props<R>(seed: &R, props: &serde_json::Value) -> Result<R, EditorError>
where
    R: Serialize + DeserializeOwned,
{
    let overrides = props
        .as_object()
        .ok_or_else(|| EditorError::Props("props must be a JSON object".to_string()))?;
    let mut merged = serde_json::to_value(seed)?;
    if let Some(target) = merged.as_object_mut() {
        for (key, value) in overrides.iter().filter(|(_, value)| !value.is_null()) {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(serde_json::from_value(merged)?)
}
