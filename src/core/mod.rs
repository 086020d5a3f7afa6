pub mod coerce;
pub mod error;
pub mod types;

pub use coerce::{coerce, coerce_lossy, ColumnKind};
pub use error::{CoercionError, EditorError};
pub use types::*;
