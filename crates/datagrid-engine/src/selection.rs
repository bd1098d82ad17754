//! Rectangular cell selection over display coordinates

use datagrid_core::{ColumnDef, Row};
use serde::{Deserialize, Serialize};

/// A cell in display coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellCoord {
    pub row_index: usize,
    pub column_index: usize,
}

impl CellCoord {
    pub fn new(row_index: usize, column_index: usize) -> Self {
        Self {
            row_index,
            column_index,
        }
    }
}

/// Anchor and focus of a drag, in the order the user made them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: CellCoord,
    pub end: CellCoord,
}

impl SelectionRange {
    pub fn new(start: CellCoord, end: CellCoord) -> Self {
        Self { start, end }
    }

    /// Bounds regardless of drag direction
    pub fn normalized(&self) -> NormalizedRange {
        NormalizedRange {
            min_row: self.start.row_index.min(self.end.row_index),
            max_row: self.start.row_index.max(self.end.row_index),
            min_col: self.start.column_index.min(self.end.column_index),
            max_col: self.start.column_index.max(self.end.column_index),
        }
    }
}

/// Inclusive selection bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRange {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl NormalizedRange {
    pub fn contains(&self, row_index: usize, column_index: usize) -> bool {
        (self.min_row..=self.max_row).contains(&row_index)
            && (self.min_col..=self.max_col).contains(&column_index)
    }

    pub fn row_count(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn column_count(&self) -> usize {
        self.max_col - self.min_col + 1
    }
}

/// One selected cell with its resolved column id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCell {
    pub row_index: usize,
    pub column_index: usize,
    pub column_id: String,
}

/// Selection reported on pointer release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionInfo {
    pub range: NormalizedRange,
    /// Cells in row-major order
    pub cells: Vec<SelectedCell>,
}

/// Tracks a drag selection
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    range: Option<SelectionRange>,
    dragging: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection at a single cell, replacing any previous one
    pub fn begin_selection(&mut self, row_index: usize, column_index: usize) {
        let cell = CellCoord::new(row_index, column_index);
        self.range = Some(SelectionRange::new(cell, cell));
        self.dragging = true;
    }

    /// Move the focus corner while the pointer is down.
    ///
    /// Returns false when no drag is in progress.
    pub fn extend_selection(&mut self, row_index: usize, column_index: usize) -> bool {
        if !self.dragging {
            return false;
        }
        match self.range.as_mut() {
            Some(range) => {
                range.end = CellCoord::new(row_index, column_index);
                true
            }
            None => false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Raw anchor and focus
    pub fn selection(&self) -> Option<SelectionRange> {
        self.range
    }

    pub fn range(&self) -> Option<NormalizedRange> {
        self.range.map(|r| r.normalized())
    }

    /// Finish the drag and materialize the selected cells.
    ///
    /// Column positions beyond `visible_columns` are left out.
    pub fn end_selection(&mut self, visible_columns: &[&ColumnDef]) -> Option<SelectionInfo> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        let range = self.range()?;

        let mut cells = Vec::with_capacity(range.row_count() * range.column_count());
        for row_index in range.min_row..=range.max_row {
            for column_index in range.min_col..=range.max_col {
                let Some(column) = visible_columns.get(column_index) else {
                    break;
                };
                cells.push(SelectedCell {
                    row_index,
                    column_index,
                    column_id: column.id.clone(),
                });
            }
        }

        Some(SelectionInfo { range, cells })
    }

    pub fn clear(&mut self) {
        self.range = None;
        self.dragging = false;
    }

    pub fn is_selected(&self, row_index: usize, column_index: usize) -> bool {
        self.range()
            .is_some_and(|range| range.contains(row_index, column_index))
    }
}

/// Render a rectangle of display rows as tab-separated text.
///
/// `rows` are the display rows and `columns` the visible columns; positions
/// outside either are skipped.
pub fn copy_range(range: &NormalizedRange, rows: &[&Row], columns: &[&ColumnDef]) -> String {
    let mut lines = Vec::with_capacity(range.row_count());
    for row_index in range.min_row..=range.max_row {
        let Some(row) = rows.get(row_index) else {
            break;
        };
        let cells: Vec<String> = (range.min_col..=range.max_col)
            .filter_map(|column_index| columns.get(column_index))
            .map(|column| row.get(column.key()).display_text())
            .collect();
        lines.push(cells.join("\t"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_range_is_direction_independent() {
        for (a, b) in [((0, 0), (3, 2)), ((5, 1), (2, 4)), ((7, 7), (7, 7))] {
            let forward = SelectionRange::new(CellCoord::new(a.0, a.1), CellCoord::new(b.0, b.1));
            let backward = SelectionRange::new(CellCoord::new(b.0, b.1), CellCoord::new(a.0, a.1));
            assert_eq!(forward.normalized(), backward.normalized());
        }
    }

    #[test]
    fn test_extend_only_while_dragging() {
        let mut selection = SelectionController::new();
        assert!(!selection.extend_selection(1, 1));

        selection.begin_selection(2, 1);
        assert!(selection.extend_selection(0, 3));
        let columns = [ColumnDef::new("a"), ColumnDef::new("b"), ColumnDef::new("c")];
        let visible: Vec<&ColumnDef> = columns.iter().collect();
        let info = selection.end_selection(&visible).unwrap();

        assert!(!selection.extend_selection(9, 9));
        assert_eq!(
            info.range,
            NormalizedRange {
                min_row: 0,
                max_row: 2,
                min_col: 1,
                max_col: 3
            }
        );
        // Column 3 is past the visible set
        assert_eq!(info.cells.len(), 6);
        let order: Vec<(usize, &str)> = info
            .cells
            .iter()
            .map(|c| (c.row_index, c.column_id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(0, "b"), (0, "c"), (1, "b"), (1, "c"), (2, "b"), (2, "c")]
        );
    }

    #[test]
    fn test_begin_replaces_previous_selection() {
        let mut selection = SelectionController::new();
        selection.begin_selection(0, 0);
        selection.extend_selection(4, 4);
        selection.begin_selection(1, 1);
        assert_eq!(
            selection.range(),
            Some(NormalizedRange {
                min_row: 1,
                max_row: 1,
                min_col: 1,
                max_col: 1
            })
        );
        selection.clear();
        assert!(selection.range().is_none());
        assert!(!selection.is_selected(1, 1));
    }

    #[test]
    fn test_copy_range_as_tsv() {
        let rows = [
            Row::new().with("a", "1").with("b", 2i64),
            Row::new().with("a", "3"),
        ];
        let row_refs: Vec<&Row> = rows.iter().collect();
        let columns = [ColumnDef::new("a"), ColumnDef::new("b")];
        let visible: Vec<&ColumnDef> = columns.iter().collect();
        let range = NormalizedRange {
            min_row: 0,
            max_row: 5,
            min_col: 0,
            max_col: 1,
        };
        assert_eq!(copy_range(&range, &row_refs, &visible), "1\t2\n3\t");
    }
}
