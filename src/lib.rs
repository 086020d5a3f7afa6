pub mod config;
pub mod core;
pub mod editor;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{ColumnDescriptor, Datasource, EditorError, FieldValue, Rgba, SymbolCode, TypedValue};
pub use editor::{
    ChangeSink, Condition, ConditionField, EditorState, FilterAttribute, FilterConfig, FilterConfigState,
    ParentHeaderAttribute, ParentHeaderConfig, ParentHeaderState,
};
