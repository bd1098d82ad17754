//! Datagrid Engine - Interactive grid engine over host-owned rows
//!
//! Computes the derived view of a table and the mutation intents a renderer
//! and persistence layer act on:
//!
//! - Layout - Column order, visibility, width, pinning and sticky offsets
//! - Filtering / Sorting / Pagination - The read path from raw rows to display rows
//! - Selection - Drag rectangles over display coordinates
//! - Clipboard - Spreadsheet-style paste mapped back to raw rows
//! - Editing - Per-cell edit mode, editability precedence and pending edits
//! - Events - Change records delivered after the row store is updated
//!
//! [`Grid`] ties these together behind named mutation operations.

mod clipboard;
mod config;
pub mod editing;
mod events;
mod export;
mod filter_types;
mod filtering;
mod grid;
pub mod layout;
pub mod pagination;
mod pipeline;
mod selection;
pub mod sorting;

pub use clipboard::*;
pub use config::*;
pub use editing::{EditOutcome, EditPolicy, EditSession, EditState, EditTrigger, PendingChangeMap};
pub use events::*;
pub use export::*;
pub use filter_types::*;
pub use filtering::*;
pub use grid::*;
pub use layout::{
    ColumnLayoutManager, FileLayoutStore, LayoutPersistence, LayoutRecord, LayoutStore,
    MemoryLayoutStore,
};
pub use pagination::{PaginationConfig, PaginationMode};
pub use pipeline::*;
pub use selection::*;
pub use sorting::MultiColumnSort;

pub use datagrid_core::{
    ColumnDef, ColumnMeta, GridError, Pin, Result, Row, RowKey, Value, ValueType,
};
