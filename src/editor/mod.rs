pub mod entries;
pub mod filter_box;
pub mod form;
pub mod notifier;
pub mod parent_header;
mod slots;
pub mod state;

pub use entries::{EntryList, EntryRecord};
pub use filter_box::{Condition, ConditionField, FilterAttribute, FilterBox, FilterConfig, FilterConfigState};
pub use form::{Control, FormLayout, FormRow};
pub use notifier::{ChangeNotifier, ChangeSink};
pub use parent_header::{
    ChildField, ChildHeader, ParentHeader, ParentHeaderAttribute, ParentHeaderConfig, ParentHeaderState,
};
pub use state::{EditorSchema, EditorState, EditorView, POPOVER_TITLE, SUMMARY_PLACEHOLDER};
