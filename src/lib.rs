/// SmartTable - Filtered, Sorted, Paged Row Store
///
/// The data side of a filterable table widget. Users type a small filter
/// language into one box per column, the matching rows are optionally
/// sorted, and a display is fed a growing prefix of the result with precise
/// insert/remove/cell-changed notifications instead of full reloads.
///
/// Rendering and input handling are left to the host; it talks to the store
/// through plain method calls and `WindowChange` events.

pub mod value;
pub mod column;
pub mod row;
pub mod expr;
pub mod filter;
pub mod sort;
pub mod changeset;
pub mod debounce;
pub mod window;
pub mod store;
pub mod config;
pub mod error;

pub use value::CellValue;
pub use column::{Column, Schema};
pub use row::{Row, RowObserver};
pub use expr::{evaluate, is_inert, CompareOp, FilterExpr, INERT_FILTERS};
pub use filter::{FilterSet, FilterSpec, RowFilterEngine};
pub use sort::{compare_cells, SortEngine, SortKey, SortOrder, SortPolicy};
pub use changeset::{Changeset, WindowChange};
pub use debounce::FilterDebouncer;
pub use window::{ListenerId, Window};
pub use store::PagedRowStore;
pub use config::StoreConfig;
pub use error::{FilterError, StoreError};
