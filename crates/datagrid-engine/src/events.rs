//! Grid events
//!
//! Mutations are packaged into [`GridEvent`]s and handed to subscribers
//! after the row store and view caches have been updated, so a subscriber
//! that re-reads the grid synchronously always sees the new state.

use datagrid_core::{Row, Value};
use serde::{Deserialize, Serialize};

use crate::filter_types::{ColumnFilters, FilterCondition};
use crate::selection::SelectionInfo;

/// What kind of user action produced a data change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Edit,
    Paste,
}

/// One written cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataChangeItem {
    /// Index into the raw data
    pub row_index: usize,
    pub column_id: String,
    pub old_value: Value,
    pub new_value: Value,
    /// The row after the change
    pub row_data: Row,
}

/// Every cell written by one user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataChangeInfo {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub changes: Vec<DataChangeItem>,
    /// Touched rows after the change, in `affected_row_indices` order
    pub affected_rows: Vec<Row>,
    /// Raw indices of touched rows, ascending and unique
    pub affected_row_indices: Vec<usize>,
}

impl DataChangeInfo {
    /// Build a change record, collecting touched rows from `data`.
    ///
    /// `extra_rows` are raw indices touched without a cell write, such as
    /// rows appended by a paste.
    pub fn new(
        change_type: ChangeType,
        changes: Vec<DataChangeItem>,
        extra_rows: impl IntoIterator<Item = usize>,
        data: &[Row],
    ) -> Self {
        let mut affected_row_indices: Vec<usize> = changes
            .iter()
            .map(|c| c.row_index)
            .chain(extra_rows)
            .collect();
        affected_row_indices.sort_unstable();
        affected_row_indices.dedup();

        let affected_rows = affected_row_indices
            .iter()
            .filter_map(|&idx| data.get(idx).cloned())
            .collect();

        Self {
            change_type,
            changes,
            affected_rows,
            affected_row_indices,
        }
    }
}

/// Events delivered to grid subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Rows were edited or pasted into; subscribers also receive the full data
    DataChanged { info: DataChangeInfo },

    /// A column's filter conditions were confirmed
    FilterChanged {
        column_id: String,
        filters: Vec<FilterCondition>,
        all: ColumnFilters,
    },

    /// The pointer was released over a selection, or the selection was cleared
    SelectionChanged(Option<SelectionInfo>),
}

/// Subscriber callback; receives the event and the full raw data
pub type Subscriber = Box<dyn FnMut(&GridEvent, &[Row])>;

/// Delivers events to subscribers and keeps them for hosts that poll
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<Subscriber>,
    queue: Vec<GridEvent>,
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .field("queue", &self.queue)
            .finish()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&GridEvent, &[Row]) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Deliver `event` to every subscriber, then queue it
    pub fn notify(&mut self, event: GridEvent, data: &[Row]) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&event, data);
        }
        self.queue.push(event);
    }

    /// Drain queued events, oldest first
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.queue)
    }
}
