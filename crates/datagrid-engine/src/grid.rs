//! The grid state container
//!
//! [`Grid`] owns the raw rows and every piece of derived state. All
//! mutations go through its named operations, each of which updates the
//! row store, refreshes the view caches and only then notifies subscribers.

use std::time::Instant;

use datagrid_core::{ColumnDef, GridError, Pin, Result, Row, Value, ValueType};

use crate::clipboard::{PasteTarget, apply_paste};
use crate::config::GridConfig;
use crate::editing::{EditOutcome, EditPolicy, EditSession, EditTrigger, values_equal};
use crate::events::{ChangeNotifier, ChangeType, DataChangeInfo, DataChangeItem, GridEvent};
use crate::export::{ExportScope, ExportView};
use crate::filter_types::{ColumnFilters, ColumnSorts, FilterCondition, SortConfig, SortType};
use crate::layout::{ColumnLayoutManager, LayoutPersistence, LayoutStore};
use crate::pagination::{PaginationConfig, PaginationMode};
use crate::pipeline::ViewPipeline;
use crate::selection::{SelectionController, SelectionInfo, copy_range};

#[derive(Debug)]
pub struct Grid {
    config: GridConfig,
    data: Vec<Row>,
    layout: ColumnLayoutManager,
    pipeline: ViewPipeline,
    selection: SelectionController,
    session: EditSession,
    policy: EditPolicy,
    notifier: ChangeNotifier,
    persistence: Option<LayoutPersistence>,
}

impl Grid {
    pub fn new(columns: Vec<ColumnDef>, data: Vec<Row>, config: GridConfig) -> Result<Self> {
        let layout = ColumnLayoutManager::new(columns)?;
        let pagination = PaginationConfig {
            mode: config.pagination.mode,
            page_index: 0,
            page_size: config.pagination.page_size,
        };

        let mut grid = Self {
            data,
            layout,
            pipeline: ViewPipeline::new(pagination),
            selection: SelectionController::new(),
            session: EditSession::new(config.edit_trigger, config.auto_commit),
            policy: EditPolicy::new(config.editing_enabled),
            notifier: ChangeNotifier::new(),
            persistence: None,
            config,
        };
        grid.refresh();
        Ok(grid)
    }

    /// Persist the column layout in `store` under the configured table id.
    ///
    /// A stored layout is applied right away. One that cannot be read is
    /// logged and ignored.
    pub fn with_layout_store(mut self, store: Box<dyn LayoutStore>) -> Result<Self> {
        let Some(table_id) = self.config.table_id.clone() else {
            return Err(GridError::Configuration(
                "a table id is required to persist the column layout".to_string(),
            ));
        };

        let mut persistence =
            LayoutPersistence::new(table_id, store).with_debounce(self.config.persist_debounce());
        match persistence.load() {
            Ok(Some(record)) => {
                self.layout.apply_record(&record);
                tracing::info!("Restored column layout for {}", persistence.table_id());
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    "Ignoring stored layout for {}: {:#}",
                    persistence.table_id(),
                    err
                );
            }
        }
        persistence.mark_saved(self.layout.version());

        self.persistence = Some(persistence);
        self.refresh();
        Ok(self)
    }

    fn refresh(&mut self) {
        let search_columns = self.layout.visible_columns();
        self.pipeline
            .refresh(&self.data, self.layout.defs(), &search_columns);
    }

    /// Refresh after a write to the row store.
    ///
    /// A write can move rows in or out of the view; if the display mapping
    /// changed, selection and pending edits no longer point at their rows.
    fn refresh_after_write(&mut self) {
        let before = self.pipeline.display_indices().to_vec();
        self.refresh();
        if self.pipeline.display_indices() != before.as_slice() {
            tracing::debug!("Write reordered the view");
            self.invalidate_view_state();
        }
    }

    fn require_column(&self, column_id: &str) -> Result<&ColumnDef> {
        self.layout
            .column(column_id)
            .ok_or_else(|| GridError::UnknownColumn(column_id.to_string()))
    }

    fn require_raw(&self, display_row: usize) -> Result<usize> {
        self.pipeline
            .display_to_raw(display_row)
            .ok_or(GridError::RowOutOfRange(display_row))
    }

    /// Selection and edits refer to display coordinates, which a change of
    /// filter, sort or page remaps; drop them.
    fn invalidate_view_state(&mut self) {
        if self.session.is_editing() || !self.session.pending().is_empty() {
            tracing::debug!("View changed, dropping in-progress and pending edits");
        }
        self.session.reset();

        if self.selection.selection().is_some() {
            self.selection.clear();
            self.notifier
                .notify(GridEvent::SelectionChanged(None), &self.data);
        }
    }

    fn layout_changed(&mut self) {
        if let Some(persistence) = self.persistence.as_mut() {
            persistence.schedule(self.layout.version(), Instant::now());
        }
    }

    // Accessors

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The raw rows
    pub fn data(&self) -> &[Row] {
        &self.data
    }

    pub fn layout(&self) -> &ColumnLayoutManager {
        &self.layout
    }

    pub fn pipeline(&self) -> &ViewPipeline {
        &self.pipeline
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.session
    }

    /// Editability inputs: predicates, per-row flags and the global toggle
    pub fn policy_mut(&mut self) -> &mut EditPolicy {
        &mut self.policy
    }

    pub fn filters(&self) -> &ColumnFilters {
        self.pipeline.filters()
    }

    pub fn sorts(&self) -> &ColumnSorts {
        self.pipeline.sorts()
    }

    pub fn pagination(&self) -> &PaginationConfig {
        self.pipeline.pagination()
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        self.layout.visible_columns()
    }

    /// Rows on the current page, in display order
    pub fn display_rows(&self) -> Vec<&Row> {
        self.pipeline.display_rows(&self.data)
    }

    pub fn display_len(&self) -> usize {
        self.pipeline.display_len()
    }

    pub fn filtered_len(&self) -> usize {
        self.pipeline.filtered_len()
    }

    pub fn page_count(&self) -> usize {
        self.pipeline.page_count()
    }

    pub fn display_to_raw(&self, display_row: usize) -> Option<usize> {
        self.pipeline.display_to_raw(display_row)
    }

    /// Committed value of a display cell
    pub fn cell_value(&self, display_row: usize, column_id: &str) -> Result<&Value> {
        let column = self.require_column(column_id)?;
        let raw_index = self.require_raw(display_row)?;
        Ok(self.data[raw_index].get(column.key()))
    }

    /// Uncommitted value of a display cell, for highlighting
    pub fn pending_value(&self, display_row: usize, column_id: &str) -> Option<&Value> {
        self.session.pending_value(display_row, column_id)
    }

    // Events

    pub fn subscribe(&mut self, subscriber: impl FnMut(&GridEvent, &[Row]) + 'static) {
        self.notifier.subscribe(subscriber);
    }

    /// Drain events emitted since the last call
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        self.notifier.take_events()
    }

    fn notify_data_changed(&mut self, info: DataChangeInfo) {
        self.notifier
            .notify(GridEvent::DataChanged { info }, &self.data);
    }

    // Data and columns

    /// Replace the raw rows
    pub fn set_data(&mut self, data: Vec<Row>) {
        self.data = data;
        self.invalidate_view_state();
        self.refresh();
        tracing::debug!("Grid data replaced with {} rows", self.data.len());
    }

    /// Replace the column set, keeping the layout of surviving columns
    pub fn set_columns(&mut self, columns: Vec<ColumnDef>) -> Result<()> {
        self.layout.set_columns(columns)?;
        self.session.reset();
        self.refresh();
        self.layout_changed();
        Ok(())
    }

    // Filtering, search and sorting

    /// Confirm the filter conditions of one column; an empty list clears it
    pub fn set_column_filter(
        &mut self,
        column_id: &str,
        conditions: Vec<FilterCondition>,
    ) -> Result<()> {
        self.require_column(column_id)?;
        self.pipeline
            .set_column_filter(column_id, conditions.clone());
        self.invalidate_view_state();
        self.refresh();

        tracing::info!(
            "Filter on {} set, {} of {} rows match",
            column_id,
            self.pipeline.filtered_len(),
            self.data.len()
        );

        let all = self.pipeline.filters().clone();
        self.notifier.notify(
            GridEvent::FilterChanged {
                column_id: column_id.to_string(),
                filters: conditions,
                all,
            },
            &self.data,
        );
        Ok(())
    }

    /// Remove every column filter
    pub fn clear_filters(&mut self) {
        let cleared: Vec<String> = self.pipeline.filters().keys().cloned().collect();
        if cleared.is_empty() {
            return;
        }
        self.pipeline.set_filters(ColumnFilters::new());
        self.invalidate_view_state();
        self.refresh();

        for column_id in cleared {
            self.notifier.notify(
                GridEvent::FilterChanged {
                    column_id,
                    filters: Vec::new(),
                    all: ColumnFilters::new(),
                },
                &self.data,
            );
        }
    }

    /// Case-insensitive search across the visible columns
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.pipeline.set_search(search);
        self.invalidate_view_state();
        self.refresh();
    }

    pub fn set_sort(&mut self, column_id: &str, config: SortConfig) -> Result<()> {
        self.require_column(column_id)?;
        self.pipeline.set_sort(column_id, config);
        self.invalidate_view_state();
        self.refresh();
        Ok(())
    }

    /// Advance a column's sort through asc, desc and unsorted.
    ///
    /// A column with no sort yet sorts numerically if it holds numbers.
    pub fn toggle_sort(&mut self, column_id: &str) -> Result<SortConfig> {
        let column = self.require_column(column_id)?;
        let current = self.pipeline.sorts().get(column_id).copied().unwrap_or_else(|| {
            let sort_type = match column.value_type_or_default() {
                ValueType::Number => SortType::Numeric,
                _ => SortType::Alpha,
            };
            SortConfig::new(sort_type, None)
        });
        let next = current.cycle();
        self.set_sort(column_id, next)?;
        Ok(next)
    }

    pub fn set_sorts(&mut self, sorts: ColumnSorts) {
        self.pipeline.set_sorts(sorts);
        self.invalidate_view_state();
        self.refresh();
    }

    // Pagination

    /// Move to a page; pages past the end show no rows
    pub fn set_page(&mut self, page_index: usize) {
        self.pipeline.set_page_index(page_index);
        self.invalidate_view_state();
        self.refresh();
    }

    /// Change the page size; the page index is kept
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pipeline.set_page_size(page_size);
        self.invalidate_view_state();
        self.refresh();
    }

    pub fn set_pagination_mode(&mut self, mode: PaginationMode) {
        let mut pagination = *self.pipeline.pagination();
        pagination.mode = mode;
        self.pipeline.set_pagination(pagination);
        self.invalidate_view_state();
        self.refresh();
    }

    // Column layout

    pub fn reorder_column(&mut self, column_id: &str, new_index: usize) -> Result<()> {
        self.layout.reorder(column_id, new_index)?;
        self.layout_changed();
        Ok(())
    }

    pub fn set_column_visible(&mut self, column_id: &str, visible: bool) -> Result<()> {
        self.layout.set_visible(column_id, visible)?;
        self.layout_changed();
        if !self.pipeline.search().trim().is_empty() {
            self.refresh();
        }
        Ok(())
    }

    pub fn resize_column(&mut self, column_id: &str, delta: f32) -> Result<f32> {
        let width = self.layout.resize(column_id, delta)?;
        self.layout_changed();
        Ok(width)
    }

    pub fn set_column_width(&mut self, column_id: &str, width: f32) -> Result<f32> {
        let width = self.layout.set_width(column_id, width)?;
        self.layout_changed();
        Ok(width)
    }

    pub fn set_column_fixed(&mut self, column_id: &str, pin: Option<Pin>) -> Result<()> {
        self.layout.set_fixed(column_id, pin)?;
        self.layout_changed();
        Ok(())
    }

    pub fn cycle_column_fixed(&mut self, column_id: &str) -> Result<Option<Pin>> {
        let pin = self.layout.cycle_fixed(column_id)?;
        self.layout_changed();
        Ok(pin)
    }

    /// Write the layout if it has been quiet for the debounce period.
    ///
    /// Returns true when a write happened.
    pub fn poll_persistence(&mut self, now: Instant) -> bool {
        match self.persistence.as_mut() {
            Some(persistence) => persistence.poll(now, &self.layout),
            None => false,
        }
    }

    /// Write the layout immediately
    pub fn flush_layout(&mut self) -> anyhow::Result<()> {
        match self.persistence.as_mut() {
            Some(persistence) => persistence.flush(&self.layout),
            None => Ok(()),
        }
    }

    // Selection

    pub fn begin_selection(&mut self, row_index: usize, column_index: usize) {
        self.selection.begin_selection(row_index, column_index);
    }

    pub fn extend_selection(&mut self, row_index: usize, column_index: usize) -> bool {
        self.selection.extend_selection(row_index, column_index)
    }

    /// Pointer released; reports the selected cells to subscribers
    pub fn end_selection(&mut self) -> Option<SelectionInfo> {
        let visible = self.layout.visible_columns();
        let info = self.selection.end_selection(&visible)?;
        self.notifier
            .notify(GridEvent::SelectionChanged(Some(info.clone())), &self.data);
        Some(info)
    }

    pub fn clear_selection(&mut self) {
        if self.selection.selection().is_none() {
            return;
        }
        self.selection.clear();
        self.notifier
            .notify(GridEvent::SelectionChanged(None), &self.data);
    }

    /// Selected cells as tab-separated text
    pub fn copy_selection(&self) -> Option<String> {
        let range = self.selection.range()?;
        let rows = self.display_rows();
        let columns = self.layout.visible_columns();
        Some(copy_range(&range, &rows, &columns))
    }

    // Editing

    pub fn set_editing_enabled(&mut self, enabled: bool) {
        self.policy.set_editing_enabled(enabled);
    }

    pub fn set_auto_commit(&mut self, auto_commit: bool) {
        self.session.set_auto_commit(auto_commit);
    }

    pub fn is_cell_editable(&self, display_row: usize, column_id: &str) -> Result<bool> {
        let column = self.require_column(column_id)?;
        let raw_index = self.require_raw(display_row)?;
        Ok(self
            .policy
            .is_editable(&self.data[raw_index], raw_index, column))
    }

    /// Handle a pointer activation on a cell.
    ///
    /// Returns `Ok(false)` when `activation` is not the configured trigger.
    /// An edit already open on another cell is blurred first.
    pub fn activate_cell(
        &mut self,
        display_row: usize,
        column_id: &str,
        activation: EditTrigger,
    ) -> Result<bool> {
        if activation != self.session.trigger() {
            return Ok(false);
        }

        let same_cell = self
            .session
            .active()
            .map(|active| active.display_row == display_row && active.column_id == column_id);
        match same_cell {
            Some(true) => return Ok(true),
            Some(false) => {
                self.blur_edit()?;
            }
            None => {}
        }

        // Blurring may have resorted the view
        if !self.is_cell_editable(display_row, column_id)? {
            return Err(GridError::NotEditable {
                row: display_row,
                column: column_id.to_string(),
            });
        }
        let raw_index = self.require_raw(display_row)?;
        let column = self.require_column(column_id)?;
        let current = self.data[raw_index].get(column.key()).clone();
        self.session
            .begin(display_row, raw_index, column_id, &current);
        Ok(true)
    }

    pub fn update_draft(&mut self, text: impl Into<String>) -> Result<()> {
        self.session.update_draft(text)
    }

    /// Confirm the open edit
    pub fn commit_edit(&mut self) -> Result<EditOutcome> {
        self.finish_edit(true)
    }

    /// The editor lost focus
    pub fn blur_edit(&mut self) -> Result<EditOutcome> {
        self.finish_edit(false)
    }

    /// Leave edit mode without writing anything.
    ///
    /// With no editor open this drops every pending edit instead.
    pub fn cancel_edit(&mut self) -> Result<EditOutcome> {
        if self.session.is_editing() {
            return self.session.cancel();
        }
        self.discard_pending();
        Ok(EditOutcome::Cancelled)
    }

    fn finish_edit(&mut self, explicit: bool) -> Result<EditOutcome> {
        let Some(active) = self.session.active() else {
            return Err(GridError::NotEditing);
        };
        let raw_index = active.raw_index;
        let column_id = active.column_id.clone();

        let column = self
            .layout
            .column(&column_id)
            .ok_or_else(|| GridError::UnknownColumn(column_id.clone()))?;
        let row = self
            .data
            .get_mut(raw_index)
            .ok_or(GridError::RowOutOfRange(raw_index))?;

        let outcome = if explicit {
            self.session.commit(row, column)?
        } else {
            self.session.blur(row, column)?
        };

        if let EditOutcome::Committed(item) = &outcome {
            tracing::info!(
                "Committed edit of {} in raw row {}",
                item.column_id,
                item.row_index
            );
            let info = DataChangeInfo::new(
                ChangeType::Edit,
                vec![item.clone()],
                std::iter::empty(),
                &self.data,
            );
            self.refresh_after_write();
            self.notify_data_changed(info);
        }
        Ok(outcome)
    }

    /// Promote every pending edit to a commit, reported as one event
    pub fn commit_all_pending(&mut self) -> Option<DataChangeInfo> {
        let mut changes = Vec::new();

        for (_, pending_row) in self.session.drain_pending() {
            let raw_index = pending_row.raw_index;
            let first_change = changes.len();
            for (column_id, value) in pending_row.cells {
                let Some(column) = self.layout.column(&column_id) else {
                    continue;
                };
                let Some(row) = self.data.get_mut(raw_index) else {
                    continue;
                };
                if values_equal(row.get(column.key()), &value) {
                    continue;
                }
                let old_value = row.set(column.key(), value.clone());
                changes.push(DataChangeItem {
                    row_index: raw_index,
                    column_id,
                    old_value,
                    new_value: value,
                    row_data: Row::new(),
                });
            }
            if let Some(row) = self.data.get(raw_index) {
                for change in &mut changes[first_change..] {
                    change.row_data = row.clone();
                }
            }
        }

        if changes.is_empty() {
            return None;
        }

        tracing::info!("Committed {} pending changes", changes.len());
        let info = DataChangeInfo::new(ChangeType::Edit, changes, std::iter::empty(), &self.data);
        self.refresh_after_write();
        self.notify_data_changed(info.clone());
        Some(info)
    }

    /// Drop every pending edit, returning how many cells were dropped
    pub fn discard_pending(&mut self) -> usize {
        let count = self.session.discard_pending();
        if count > 0 {
            tracing::info!("Discarded {} pending changes", count);
        }
        count
    }

    // Clipboard

    /// Paste tab-separated text with its top-left cell at a display position
    pub fn paste(
        &mut self,
        text: &str,
        start_row: usize,
        start_col: usize,
    ) -> Option<DataChangeInfo> {
        let columns = self.layout.visible_columns();
        let target = PasteTarget {
            start_row,
            start_col,
            display_to_raw: self.pipeline.display_indices(),
            columns: &columns,
            policy: &self.policy,
        };
        let info = apply_paste(text, &target, &mut self.data)?;

        self.refresh_after_write();
        self.notify_data_changed(info.clone());
        Some(info)
    }

    // Export

    /// Visible columns plus the rows of `scope`
    pub fn export_view(&self, scope: ExportScope) -> ExportView {
        let rows: Vec<Row> = match scope {
            ExportScope::CurrentPage => self.display_rows().into_iter().cloned().collect(),
            ExportScope::Filtered => self
                .pipeline
                .ordered_indices()
                .iter()
                .filter_map(|&idx| self.data.get(idx).cloned())
                .collect(),
            ExportScope::All => self.data.clone(),
        };
        ExportView::new(scope, &self.layout.visible_columns(), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_types::{FilterOperator, SortDirection};
    use pretty_assertions::assert_eq;

    fn grid() -> Grid {
        Grid::new(
            vec![
                ColumnDef::new("name"),
                ColumnDef::new("age").value_type(ValueType::Number),
            ],
            vec![
                Row::new().with("id", 1i64).with("name", "b").with("age", 20i64),
                Row::new().with("id", 2i64).with("name", "a").with("age", 40i64),
                Row::new().with("id", 3i64).with("name", "c").with("age", Value::Null),
            ],
            GridConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_edit_on_sorted_view_writes_raw_row() {
        let mut grid = grid();
        grid.set_sort("name", SortConfig::alpha(SortDirection::Asc))
            .unwrap();
        assert_eq!(grid.display_to_raw(0), Some(1));

        assert!(grid.activate_cell(0, "age", EditTrigger::Double).unwrap());
        grid.update_draft("41").unwrap();
        let outcome = grid.commit_edit().unwrap();

        let item = outcome.into_change().unwrap();
        assert_eq!(item.row_index, 1);
        assert_eq!(grid.data()[1].get("age"), &Value::Int64(41));
        let events = grid.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], GridEvent::DataChanged { info } if info.affected_row_indices == vec![1]));
    }

    #[test]
    fn test_wrong_trigger_is_ignored_and_read_only_refused() {
        let mut grid = grid();
        assert!(!grid.activate_cell(0, "name", EditTrigger::Single).unwrap());
        assert!(!grid.edit_session().is_editing());

        grid.set_editing_enabled(false);
        assert_eq!(
            grid.activate_cell(0, "name", EditTrigger::Double),
            Err(GridError::NotEditable {
                row: 0,
                column: "name".into()
            })
        );
    }

    #[test]
    fn test_filter_change_emits_event_and_clears_selection() {
        let mut grid = grid();
        grid.begin_selection(0, 0);
        grid.extend_selection(1, 1);
        grid.end_selection();
        grid.take_events();

        let condition = FilterCondition::new("c1", FilterOperator::GreaterThan, 30i64);
        grid.set_column_filter("age", vec![condition.clone()]).unwrap();

        assert_eq!(grid.display_len(), 1);
        assert!(grid.selection().range().is_none());
        let events = grid.take_events();
        assert_eq!(events[0], GridEvent::SelectionChanged(None));
        match &events[1] {
            GridEvent::FilterChanged {
                column_id,
                filters,
                all,
            } => {
                assert_eq!(column_id, "age");
                assert_eq!(filters, &vec![condition]);
                assert_eq!(all.len(), 1);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_pending_edits_commit_together() {
        let mut grid = grid();
        grid.set_auto_commit(false);

        grid.activate_cell(0, "name", EditTrigger::Double).unwrap();
        grid.update_draft("x").unwrap();
        assert_eq!(grid.blur_edit().unwrap(), EditOutcome::Pending);

        grid.activate_cell(1, "name", EditTrigger::Double).unwrap();
        grid.update_draft("y").unwrap();
        // Opening another cell blurs this one
        grid.activate_cell(2, "age", EditTrigger::Double).unwrap();
        grid.cancel_edit().unwrap();

        assert_eq!(grid.pending_value(1, "name"), Some(&Value::from("y")));
        assert!(grid.take_events().is_empty());

        let info = grid.commit_all_pending().unwrap();
        assert_eq!(info.changes.len(), 2);
        assert_eq!(info.affected_row_indices, vec![0, 1]);
        assert_eq!(grid.data()[0].get("name"), &Value::from("x"));
        assert_eq!(grid.take_events().len(), 1);
        assert!(grid.commit_all_pending().is_none());
    }

    #[test]
    fn test_page_change_discards_pending() {
        let mut grid = grid();
        grid.set_auto_commit(false);
        grid.activate_cell(0, "name", EditTrigger::Double).unwrap();
        grid.update_draft("x").unwrap();
        grid.blur_edit().unwrap();

        grid.set_page_size(2);
        assert!(grid.edit_session().pending().is_empty());
        assert_eq!(grid.page_count(), 2);
        assert_eq!(grid.data()[0].get("name"), &Value::from("b"));
    }

    #[test]
    fn test_toggle_sort_uses_value_type() {
        let mut grid = grid();
        let config = grid.toggle_sort("age").unwrap();
        assert_eq!(config, SortConfig::numeric(SortDirection::Asc));
        assert_eq!(grid.display_to_raw(0), Some(0));
        assert_eq!(grid.display_to_raw(2), Some(2));

        grid.toggle_sort("age").unwrap();
        let config = grid.toggle_sort("age").unwrap();
        assert!(!config.is_active());
        assert!(grid.sorts().is_empty());
    }

    #[test]
    fn test_copy_selection() {
        let mut grid = grid();
        grid.begin_selection(0, 0);
        grid.extend_selection(1, 1);
        assert_eq!(grid.copy_selection().as_deref(), Some("b\t20\na\t40"));
    }

    #[test]
    fn test_export_scopes() {
        let mut grid = grid();
        grid.set_page_size(1);
        grid.set_column_filter(
            "name",
            vec![FilterCondition::new("1", FilterOperator::NotEquals, "c")],
        )
        .unwrap();

        assert_eq!(grid.export_view(ExportScope::CurrentPage).rows.len(), 1);
        assert_eq!(grid.export_view(ExportScope::Filtered).rows.len(), 2);
        assert_eq!(grid.export_view(ExportScope::All).rows.len(), 3);
    }

    #[test]
    fn test_layout_store_requires_table_id() {
        let result = grid().with_layout_store(Box::new(crate::layout::MemoryLayoutStore::new()));
        assert!(matches!(result, Err(GridError::Configuration(_))));
    }
}
