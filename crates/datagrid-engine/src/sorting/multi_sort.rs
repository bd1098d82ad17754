//! Multi-column sorting for the grid
//!
//! Sort columns are applied in priority order: the first configured column
//! is the primary key and each later column only breaks ties left by the
//! ones before it. The underlying sort is stable, so rows that compare equal
//! on every key keep their incoming order.

use std::cmp::Ordering;

use datagrid_core::{ColumnDef, Row, Value};

use crate::filter_types::{ColumnSorts, SortDirection, SortType};

/// A column to sort by with its row key, comparison type and direction
#[derive(Debug, Clone)]
pub struct SortColumn {
    /// Row field to read
    pub key: String,
    pub sort_type: SortType,
    pub direction: SortDirection,
}

impl SortColumn {
    pub fn new(key: impl Into<String>, sort_type: SortType, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            sort_type,
            direction,
        }
    }
}

/// Precomputed comparison key for one cell
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    /// Lower-cased text
    Text(String),
    /// Numeric sort over a value that is not a number
    NaN,
    Null,
}

/// Number a cell sorts as: booleans are 0 and 1, blank text is 0
fn numeric_value(value: &Value) -> Option<f64> {
    if let Some(b) = value.as_bool() {
        return Some(if b { 1.0 } else { 0.0 });
    }
    if value.is_blank() {
        return Some(0.0);
    }
    value.as_f64()
}

impl SortKey {
    pub fn from_value(value: &Value, sort_type: SortType) -> Self {
        if value.is_null() {
            return SortKey::Null;
        }
        match sort_type {
            SortType::Alpha => SortKey::Text(value.display_text().to_lowercase()),
            SortType::Numeric => match numeric_value(value) {
                Some(n) if !n.is_nan() => SortKey::Number(n),
                _ => SortKey::NaN,
            },
        }
    }

    /// Compare two keys; nulls go last and NaN just before them, whatever
    /// the direction.
    fn compare(&self, other: &SortKey, direction: SortDirection) -> Ordering {
        let ordering = match (self, other) {
            (SortKey::Null, SortKey::Null) => return Ordering::Equal,
            (SortKey::Null, _) => return Ordering::Greater,
            (_, SortKey::Null) => return Ordering::Less,
            (SortKey::NaN, SortKey::NaN) => return Ordering::Equal,
            (SortKey::NaN, _) => return Ordering::Greater,
            (_, SortKey::NaN) => return Ordering::Less,
            (SortKey::Number(a), SortKey::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // Keys of one column share a sort type, so these never meet
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        };

        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Multi-column sort configuration
#[derive(Debug, Clone, Default)]
pub struct MultiColumnSort {
    /// Columns to sort by, in priority order (first = highest priority)
    columns: Vec<SortColumn>,
}

impl MultiColumnSort {
    /// Create a new empty multi-column sort
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sort column
    pub fn add_column(&mut self, column: SortColumn) {
        self.columns.push(column);
    }

    /// Check if any sort columns are configured
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get the number of sort columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the sort columns
    pub fn columns(&self) -> &[SortColumn] {
        &self.columns
    }

    /// Build from per-column sort configs.
    ///
    /// Inactive configs (no direction) are skipped. Ids that are not known
    /// columns are read as row fields of the same name.
    pub fn from_configs(sorts: &ColumnSorts, columns: &[ColumnDef]) -> Self {
        let mut sort = Self::new();
        for (column_id, config) in sorts {
            let Some(direction) = config.direction else {
                continue;
            };
            let key = columns
                .iter()
                .find(|c| &c.id == column_id)
                .map(|c| c.key())
                .unwrap_or(column_id.as_str());
            sort.add_column(SortColumn::new(key, config.sort_type, direction));
        }
        sort
    }

    fn keys_for(&self, row: &Row) -> Vec<SortKey> {
        self.columns
            .iter()
            .map(|col| SortKey::from_value(row.get(&col.key), col.sort_type))
            .collect()
    }

    /// Compare two rows using all configured sort columns
    pub fn compare_rows(&self, row_a: &Row, row_b: &Row) -> Ordering {
        self.compare_keys(&self.keys_for(row_a), &self.keys_for(row_b))
    }

    fn compare_keys(&self, a: &[SortKey], b: &[SortKey]) -> Ordering {
        for ((ka, kb), col) in a.iter().zip(b.iter()).zip(self.columns.iter()) {
            let ordering = ka.compare(kb, col.direction);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Sort raw row indices in place, reading cells from `data`
    pub fn sort_indices(&self, indices: &mut Vec<usize>, data: &[Row]) {
        if self.is_empty() {
            return;
        }

        let mut keyed: Vec<(usize, Vec<SortKey>)> = indices
            .iter()
            .filter_map(|&idx| data.get(idx).map(|row| (idx, self.keys_for(row))))
            .collect();
        keyed.sort_by(|(_, a), (_, b)| self.compare_keys(a, b));

        *indices = keyed.into_iter().map(|(idx, _)| idx).collect();
    }

    /// Sort a vector of rows in place
    pub fn sort_rows(&self, rows: &mut [Row]) {
        if self.is_empty() {
            return;
        }
        rows.sort_by(|a, b| self.compare_rows(a, b));
    }
}
