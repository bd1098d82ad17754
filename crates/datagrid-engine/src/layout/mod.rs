//! Column layout state and its persistence

mod columns;
mod persistence;

pub use columns::{ColumnLayoutManager, compute_fixed_offsets};
pub use persistence::{
    DEFAULT_PERSIST_DEBOUNCE, FileLayoutStore, LayoutPersistence, LayoutRecord, LayoutStore,
    MemoryLayoutStore, layouts_dir,
};
