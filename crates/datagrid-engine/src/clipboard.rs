//! Spreadsheet-style paste
//!
//! Tab and newline separated text is spread over the grid starting at a
//! display cell. Target rows are resolved through the display-to-raw
//! mapping that was current when the paste started; rows past the end of
//! the display are appended to the raw data.

use datagrid_core::{ColumnDef, Row};

use crate::editing::{EditPolicy, coerce_input};
use crate::events::{ChangeType, DataChangeInfo, DataChangeItem};

/// Split clipboard text into trimmed cells.
///
/// `\r\n` and lone `\r` count as line breaks. Lines that are blank after
/// trimming are dropped. There is no quoting, so cells cannot contain tabs
/// or newlines.
pub fn parse_clipboard(text: &str) -> Vec<Vec<String>> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('\t').map(|cell| cell.trim().to_string()).collect())
        .collect()
}

/// Where and into what a paste writes
pub struct PasteTarget<'a> {
    pub start_row: usize,
    pub start_col: usize,
    /// Raw index of each display row at paste time
    pub display_to_raw: &'a [usize],
    /// Visible columns in display order
    pub columns: &'a [&'a ColumnDef],
    pub policy: &'a EditPolicy,
}

/// Apply pasted text to `data`.
///
/// Returns `None` when the paste touched nothing, i.e. the text had no
/// non-blank lines, or every target cell was read-only, off-grid or failed
/// coercion and no row was appended.
pub fn apply_paste(text: &str, target: &PasteTarget<'_>, data: &mut Vec<Row>) -> Option<DataChangeInfo> {
    let lines = parse_clipboard(text);
    if lines.is_empty() {
        return None;
    }

    let mut changes = Vec::new();
    let mut appended = Vec::new();

    for (r, cells) in lines.iter().enumerate() {
        let display_row = target.start_row + r;
        let raw_index = match target.display_to_raw.get(display_row) {
            Some(&raw_index) if raw_index < data.len() => raw_index,
            Some(_) => continue,
            None => {
                let template = data
                    .last()
                    .map(Row::blank_template)
                    .unwrap_or_default();
                data.push(template);
                let raw_index = data.len() - 1;
                appended.push(raw_index);
                raw_index
            }
        };

        let first_change = changes.len();
        for (c, text) in cells.iter().enumerate() {
            let Some(column) = target.columns.get(target.start_col + c) else {
                break;
            };
            if !target.policy.is_editable(&data[raw_index], raw_index, column) {
                tracing::debug!(
                    "Skipping read-only cell {} in raw row {}",
                    column.id,
                    raw_index
                );
                continue;
            }
            let value = match coerce_input(text, column.value_type_or_default()) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!("Skipping pasted cell {}: {}", column.id, err);
                    continue;
                }
            };

            let old_value = data[raw_index].set(column.key(), value.clone());
            changes.push(DataChangeItem {
                row_index: raw_index,
                column_id: column.id.clone(),
                old_value,
                new_value: value,
                row_data: Row::new(),
            });
        }

        for change in &mut changes[first_change..] {
            change.row_data = data[raw_index].clone();
        }
    }

    if changes.is_empty() && appended.is_empty() {
        return None;
    }

    tracing::info!(
        "Pasted {} cells across {} lines ({} rows appended)",
        changes.len(),
        lines.len(),
        appended.len()
    );

    Some(DataChangeInfo::new(ChangeType::Paste, changes, appended, data))
}
