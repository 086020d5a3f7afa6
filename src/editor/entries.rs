//! EntryList: the ordered, position-addressed sub-records of an editor
//! (colour conditions, child header keys).
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::str::FromStr;

use super::form::FormRow;
use crate::core::{EditorError, FieldValue};

/// A record that can live in an [`EntryList`].
pub trait EntryRecord: Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned {
    /// Field selector, parsed from its wire name
    type Field: Copy + Debug + Display + FromStr;

    /// Commit `value` into `field`. Must leave `self` unchanged on error.
    fn set_field(&mut self, field: Self::Field, value: FieldValue) -> Result<(), EditorError>;

    /// Rows describing this entry's inputs.
    fn form_rows(&self) -> Vec<FormRow>;
}

/// Insertion-ordered entries. There is no sort, remove or reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList<E>(Vec<E>);

impl<E> Default for EntryList<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<E: EntryRecord> EntryList<E> {
    pub fn new(entries: Vec<E>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.0
    }

    /// Push a default entry at the end; returns its index.
    pub fn append(&mut self) -> usize {
        self.0.push(E::default());
        self.0.len() - 1
    }

    /// Mutate the entry at `index` in place. Out-of-range indices are rejected.
    pub fn set_field(&mut self, index: usize, field: E::Field, value: FieldValue) -> Result<(), EditorError> {
        let len = self.0.len();
        let entry = self
            .0
            .get_mut(index)
            .ok_or(EditorError::IndexOutOfRange { index, len })?;
        entry.set_field(field, value)
    }
}

impl<'a, E: EntryRecord> IntoIterator for &'a EntryList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
