//! Datagrid Core - Data model shared by the grid engine and its hosts
//!
//! This crate provides the types a host application hands to the engine
//! and receives back from it:
//!
//! - `Value` - A dynamically typed cell value
//! - `Row` / `RowKey` - An ordered record and its identity
//! - `ColumnDef` / `ColumnMeta` - Column schema as supplied by the host
//! - `GridError` - Errors returned for API misuse

mod column;
mod error;
mod types;

pub use column::*;
pub use error::*;
pub use types::*;
