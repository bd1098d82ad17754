use datagrid_core::Value;
use indexmap::IndexMap;

/// Uncommitted edits of one display row
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingRow {
    /// Raw row the display row mapped to when the edit was stored
    pub raw_index: usize,
    /// Column id -> pending value
    pub cells: IndexMap<String, Value>,
}

/// Edits typed but not yet committed, keyed by display row
#[derive(Clone, Debug, Default)]
pub struct PendingChangeMap {
    rows: IndexMap<usize, PendingRow>,
}

impl PendingChangeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are any pending changes
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of pending cells
    pub fn change_count(&self) -> usize {
        self.rows.values().map(|row| row.cells.len()).sum()
    }

    pub fn insert(&mut self, display_row: usize, raw_index: usize, column_id: &str, value: Value) {
        let row = self.rows.entry(display_row).or_insert_with(|| PendingRow {
            raw_index,
            cells: IndexMap::new(),
        });
        row.raw_index = raw_index;
        row.cells.insert(column_id.to_string(), value);
    }

    /// Get the pending value for a cell, if any
    pub fn get(&self, display_row: usize, column_id: &str) -> Option<&Value> {
        self.rows
            .get(&display_row)
            .and_then(|row| row.cells.get(column_id))
    }

    /// Check if a specific cell has a pending change
    pub fn is_cell_modified(&self, display_row: usize, column_id: &str) -> bool {
        self.get(display_row, column_id).is_some()
    }

    /// Drop one cell's pending value, and the row entry once it is empty
    pub fn remove(&mut self, display_row: usize, column_id: &str) -> Option<Value> {
        let row = self.rows.get_mut(&display_row)?;
        let value = row.cells.shift_remove(column_id);
        if row.cells.is_empty() {
            self.rows.shift_remove(&display_row);
        }
        value
    }

    /// Take every pending row, leaving the map empty
    pub fn drain(&mut self) -> Vec<(usize, PendingRow)> {
        self.rows.drain(..).collect()
    }

    /// Clear all pending changes
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
