//! Which cells accept edits

use std::collections::HashMap;

use datagrid_core::{ColumnDef, Row, RowKey};

/// Host callback deciding a single cell: `(row, raw_index, column)`
pub type CellPredicate = Box<dyn Fn(&Row, usize, &ColumnDef) -> bool>;

/// Host callback deciding a whole row: `(row, raw_index)`
pub type RowPredicate = Box<dyn Fn(&Row, usize) -> bool>;

/// Resolve editability from the four precedence levels, highest first:
///
/// 1. the column is explicitly not editable
/// 2. the cell predicate's answer
/// 3. the column is explicitly editable
/// 4. the row-level answer (default true) combined with the global toggle
pub fn resolve_editability(
    column: Option<bool>,
    cell: Option<bool>,
    row: Option<bool>,
    editing_enabled: bool,
) -> bool {
    if column == Some(false) {
        return false;
    }
    if let Some(cell) = cell {
        return cell;
    }
    if column == Some(true) {
        return true;
    }
    row.unwrap_or(true) && editing_enabled
}

/// Host-supplied editability inputs
pub struct EditPolicy {
    cell_predicate: Option<CellPredicate>,
    row_predicate: Option<RowPredicate>,
    row_flags: HashMap<RowKey, bool>,
    editing_enabled: bool,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self {
            cell_predicate: None,
            row_predicate: None,
            row_flags: HashMap::new(),
            editing_enabled: true,
        }
    }
}

impl std::fmt::Debug for EditPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditPolicy")
            .field("cell_predicate", &self.cell_predicate.is_some())
            .field("row_predicate", &self.row_predicate.is_some())
            .field("row_flags", &self.row_flags)
            .field("editing_enabled", &self.editing_enabled)
            .finish()
    }
}

impl EditPolicy {
    pub fn new(editing_enabled: bool) -> Self {
        Self {
            editing_enabled,
            ..Self::default()
        }
    }

    pub fn editing_enabled(&self) -> bool {
        self.editing_enabled
    }

    pub fn set_editing_enabled(&mut self, enabled: bool) {
        self.editing_enabled = enabled;
    }

    pub fn set_cell_predicate(
        &mut self,
        predicate: impl Fn(&Row, usize, &ColumnDef) -> bool + 'static,
    ) {
        self.cell_predicate = Some(Box::new(predicate));
    }

    pub fn clear_cell_predicate(&mut self) {
        self.cell_predicate = None;
    }

    pub fn set_row_predicate(&mut self, predicate: impl Fn(&Row, usize) -> bool + 'static) {
        self.row_predicate = Some(Box::new(predicate));
    }

    pub fn clear_row_predicate(&mut self) {
        self.row_predicate = None;
    }

    /// Explicit per-row flag; takes priority over the row predicate
    pub fn set_row_editable(&mut self, key: RowKey, editable: bool) {
        self.row_flags.insert(key, editable);
    }

    pub fn clear_row_editable(&mut self, key: &RowKey) {
        self.row_flags.remove(key);
    }

    /// Whether the cell of `column` in `row` (at raw position `raw_index`)
    /// accepts edits
    pub fn is_editable(&self, row: &Row, raw_index: usize, column: &ColumnDef) -> bool {
        let cell = self
            .cell_predicate
            .as_ref()
            .map(|predicate| predicate(row, raw_index, column));
        let row_level = self
            .row_flags
            .get(&row.key(raw_index))
            .copied()
            .or_else(|| {
                self.row_predicate
                    .as_ref()
                    .map(|predicate| predicate(row, raw_index))
            });

        resolve_editability(column.meta.editable, cell, row_level, self.editing_enabled)
    }
}
