//! Read path from raw data to display rows
//!
//! Raw rows go through column filters, the global search, the multi-column
//! sort and finally the page window. The pipeline caches the result as raw
//! indices so every display coordinate can be mapped back to the row it was
//! derived from.

use datagrid_core::{ColumnDef, Row};

use crate::filter_types::{ColumnFilters, ColumnSorts, FilterCondition, SortConfig};
use crate::filtering::{row_matches_filters, row_matches_search};
use crate::pagination::{self, PaginationConfig};
use crate::sorting::MultiColumnSort;

/// Filter, sort and page state plus the derived index caches
#[derive(Debug, Clone, Default)]
pub struct ViewPipeline {
    filters: ColumnFilters,
    sorts: ColumnSorts,
    pagination: PaginationConfig,
    search: String,
    /// Raw indices surviving filter and search, in sorted order
    ordered: Vec<usize>,
    /// Raw indices on the current page
    display: Vec<usize>,
}

impl ViewPipeline {
    pub fn new(pagination: PaginationConfig) -> Self {
        Self {
            pagination,
            ..Self::default()
        }
    }

    pub fn filters(&self) -> &ColumnFilters {
        &self.filters
    }

    pub fn sorts(&self) -> &ColumnSorts {
        &self.sorts
    }

    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace the conditions of one column; an empty list removes the column
    pub fn set_column_filter(&mut self, column_id: &str, conditions: Vec<FilterCondition>) {
        if conditions.is_empty() {
            self.filters.shift_remove(column_id);
        } else {
            self.filters.insert(column_id.to_string(), conditions);
        }
    }

    pub fn set_filters(&mut self, filters: ColumnFilters) {
        self.filters = filters;
        self.filters.retain(|_, conditions| !conditions.is_empty());
    }

    /// Set one column's sort; an inactive config removes the column from the
    /// sort order so it loses its priority slot.
    pub fn set_sort(&mut self, column_id: &str, config: SortConfig) {
        if config.is_active() {
            self.sorts.insert(column_id.to_string(), config);
        } else {
            self.sorts.shift_remove(column_id);
        }
    }

    pub fn set_sorts(&mut self, sorts: ColumnSorts) {
        self.sorts = sorts;
    }

    pub fn set_pagination(&mut self, pagination: PaginationConfig) {
        self.pagination = pagination;
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        self.pagination.page_index = page_index;
    }

    /// Change the page size; the page index is left for the caller to clamp
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.page_size = page_size;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Recompute the cached indices against the current data
    ///
    /// `columns` resolves filter and sort ids to row fields. `search_columns`
    /// are the columns the global search looks at.
    pub fn refresh(&mut self, data: &[Row], columns: &[ColumnDef], search_columns: &[&ColumnDef]) {
        let mut ordered: Vec<usize> = data
            .iter()
            .enumerate()
            .filter(|(_, row)| row_matches_filters(row, &self.filters, columns))
            .filter(|(_, row)| row_matches_search(row, search_columns, &self.search))
            .map(|(idx, _)| idx)
            .collect();

        MultiColumnSort::from_configs(&self.sorts, columns).sort_indices(&mut ordered, data);

        self.display = pagination::slice(&ordered, &self.pagination).to_vec();
        self.ordered = ordered;

        tracing::debug!(
            "view refreshed: {} of {} rows pass filters, {} on page {}",
            self.ordered.len(),
            data.len(),
            self.display.len(),
            self.pagination.page_index
        );
    }

    /// Raw index of the row shown at `display_index`
    pub fn display_to_raw(&self, display_index: usize) -> Option<usize> {
        self.display.get(display_index).copied()
    }

    /// Display index of a raw row, if it is on the current page
    pub fn raw_to_display(&self, raw_index: usize) -> Option<usize> {
        self.display.iter().position(|&idx| idx == raw_index)
    }

    /// Raw indices on the current page, in display order
    pub fn display_indices(&self) -> &[usize] {
        &self.display
    }

    /// Raw indices of the whole filtered and sorted set
    pub fn ordered_indices(&self) -> &[usize] {
        &self.ordered
    }

    pub fn display_len(&self) -> usize {
        self.display.len()
    }

    pub fn filtered_len(&self) -> usize {
        self.ordered.len()
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(self.ordered.len(), &self.pagination)
    }

    /// Rows on the current page
    pub fn display_rows<'a>(&self, data: &'a [Row]) -> Vec<&'a Row> {
        self.display.iter().filter_map(|&idx| data.get(idx)).collect()
    }
}
