//! Error types for the grid

use thiserror::Error;

/// Core error type for grid operations
///
/// The engine recovers locally from bad input (invalid filters, unparsable
/// clipboard text, failed numeric coercion). These variants only cover calls
/// that reference state which does not exist.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Duplicate column id: {0}")]
    DuplicateColumn(String),

    #[error("Column is not draggable: {0}")]
    NotDraggable(String),

    #[error("Display row {0} is out of range")]
    RowOutOfRange(usize),

    #[error("Cell is not editable: row {row}, column {column}")]
    NotEditable { row: usize, column: String },

    #[error("No edit in progress")]
    NotEditing,

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for grid operations
pub type Result<T> = std::result::Result<T, GridError>;
