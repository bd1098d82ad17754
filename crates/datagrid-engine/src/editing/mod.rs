//! Inline cell editing
//!
//! An [`EditSession`] moves a single cell between display and edit mode.
//! It coerces the typed text to the column's value type on commit and, when
//! auto-commit is off, parks edits that lose focus in a [`PendingChangeMap`]
//! until the user confirms them.

mod coerce;
mod editability;
mod pending;

pub use coerce::{coerce_input, values_equal};
pub use editability::{CellPredicate, EditPolicy, RowPredicate, resolve_editability};
pub use pending::{PendingChangeMap, PendingRow};

use datagrid_core::{ColumnDef, GridError, Result, Row, Value};
use serde::{Deserialize, Serialize};

use crate::events::DataChangeItem;

/// Pointer activation that opens a cell editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditTrigger {
    Single,
    #[default]
    Double,
}

/// The cell being edited and its draft text
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEdit {
    pub display_row: usize,
    pub raw_index: usize,
    pub column_id: String,
    pub draft: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(ActiveEdit),
}

/// How an edit left edit mode
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The row was written
    Committed(DataChangeItem),
    /// Nothing changed
    Cancelled,
    /// The draft could not be coerced; the cell keeps its committed value
    Reverted,
    /// The draft was parked in the pending buffer
    Pending,
}

impl EditOutcome {
    pub fn into_change(self) -> Option<DataChangeItem> {
        match self {
            EditOutcome::Committed(item) => Some(item),
            _ => None,
        }
    }
}

/// Edit mode state machine plus the pending-change buffer
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: EditState,
    pending: PendingChangeMap,
    trigger: EditTrigger,
    auto_commit: bool,
}

impl EditSession {
    pub fn new(trigger: EditTrigger, auto_commit: bool) -> Self {
        Self {
            state: EditState::Idle,
            pending: PendingChangeMap::new(),
            trigger,
            auto_commit,
        }
    }

    pub fn trigger(&self) -> EditTrigger {
        self.trigger
    }

    pub fn set_trigger(&mut self, trigger: EditTrigger) {
        self.trigger = trigger;
    }

    pub fn auto_commit(&self) -> bool {
        self.auto_commit
    }

    pub fn set_auto_commit(&mut self, auto_commit: bool) {
        self.auto_commit = auto_commit;
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    pub fn active(&self) -> Option<&ActiveEdit> {
        match &self.state {
            EditState::Editing(edit) => Some(edit),
            EditState::Idle => None,
        }
    }

    pub fn pending(&self) -> &PendingChangeMap {
        &self.pending
    }

    /// Pending value of a cell, for highlighting
    pub fn pending_value(&self, display_row: usize, column_id: &str) -> Option<&Value> {
        self.pending.get(display_row, column_id)
    }

    /// Enter edit mode on a cell.
    ///
    /// The draft starts from the cell's pending value when it has one,
    /// otherwise from `current`. Editability is checked by the caller.
    pub fn begin(&mut self, display_row: usize, raw_index: usize, column_id: &str, current: &Value) {
        let draft = self
            .pending
            .get(display_row, column_id)
            .unwrap_or(current)
            .display_text();

        tracing::debug!(
            "Editing cell {} at display row {} (raw {})",
            column_id,
            display_row,
            raw_index
        );

        self.state = EditState::Editing(ActiveEdit {
            display_row,
            raw_index,
            column_id: column_id.to_string(),
            draft,
        });
    }

    pub fn update_draft(&mut self, text: impl Into<String>) -> Result<()> {
        match &mut self.state {
            EditState::Editing(edit) => {
                edit.draft = text.into();
                Ok(())
            }
            EditState::Idle => Err(GridError::NotEditing),
        }
    }

    fn take_active(&mut self) -> Result<ActiveEdit> {
        match std::mem::take(&mut self.state) {
            EditState::Editing(edit) => Ok(edit),
            EditState::Idle => Err(GridError::NotEditing),
        }
    }

    /// Explicitly confirm the edit, writing `row` (the raw row being edited)
    pub fn commit(&mut self, row: &mut Row, column: &ColumnDef) -> Result<EditOutcome> {
        let edit = self.take_active()?;
        Ok(self.apply(edit, row, column))
    }

    /// The editor lost focus.
    ///
    /// With auto-commit this commits. Without it a changed value is parked
    /// in the pending buffer and the row is left untouched.
    pub fn blur(&mut self, row: &mut Row, column: &ColumnDef) -> Result<EditOutcome> {
        let edit = self.take_active()?;
        if self.auto_commit {
            return Ok(self.apply(edit, row, column));
        }

        let value = match coerce_input(&edit.draft, column.value_type_or_default()) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!("Discarding draft for {}: {}", edit.column_id, err);
                self.pending.remove(edit.display_row, &edit.column_id);
                return Ok(EditOutcome::Reverted);
            }
        };

        if values_equal(row.get(column.key()), &value) {
            self.pending.remove(edit.display_row, &edit.column_id);
            return Ok(EditOutcome::Cancelled);
        }

        self.pending
            .insert(edit.display_row, edit.raw_index, &edit.column_id, value);
        tracing::debug!(
            "Parked pending edit for {} at display row {}",
            edit.column_id,
            edit.display_row
        );
        Ok(EditOutcome::Pending)
    }

    /// Leave edit mode, dropping the draft and the cell's pending value
    pub fn cancel(&mut self) -> Result<EditOutcome> {
        let edit = self.take_active()?;
        self.pending.remove(edit.display_row, &edit.column_id);
        Ok(EditOutcome::Cancelled)
    }

    fn apply(&mut self, edit: ActiveEdit, row: &mut Row, column: &ColumnDef) -> EditOutcome {
        self.pending.remove(edit.display_row, &edit.column_id);

        let value = match coerce_input(&edit.draft, column.value_type_or_default()) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!("Reverting edit of {}: {}", edit.column_id, err);
                return EditOutcome::Reverted;
            }
        };

        if values_equal(row.get(column.key()), &value) {
            return EditOutcome::Cancelled;
        }

        let old_value = row.set(column.key(), value.clone());
        EditOutcome::Committed(DataChangeItem {
            row_index: edit.raw_index,
            column_id: edit.column_id,
            old_value,
            new_value: value,
            row_data: row.clone(),
        })
    }

    /// Take every pending row for promotion to real commits
    pub fn drain_pending(&mut self) -> Vec<(usize, PendingRow)> {
        self.pending.drain()
    }

    /// Drop all pending edits
    pub fn discard_pending(&mut self) -> usize {
        let count = self.pending.change_count();
        self.pending.clear();
        count
    }

    /// Return to idle and drop all pending edits
    pub fn reset(&mut self) {
        self.state = EditState::Idle;
        self.pending.clear();
    }
}
