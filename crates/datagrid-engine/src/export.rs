//! Export views handed to external serializers

use datagrid_core::{ColumnDef, Row};
use serde::{Deserialize, Serialize};

/// Which rows an export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportScope {
    /// Rows on the current page
    #[default]
    CurrentPage,
    /// Every row passing the filters, in sorted order
    Filtered,
    /// The raw data, unfiltered and unsorted
    All,
}

/// Column description in an export view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportColumn {
    pub id: String,
    pub header: String,
    pub accessor_key: String,
    pub exportable: bool,
}

impl From<&ColumnDef> for ExportColumn {
    fn from(def: &ColumnDef) -> Self {
        Self {
            id: def.id.clone(),
            header: def.label().to_string(),
            accessor_key: def.key().to_string(),
            exportable: def.is_exportable(),
        }
    }
}

/// Ordered columns plus the rows of one scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportView {
    pub scope: ExportScope,
    pub columns: Vec<ExportColumn>,
    pub rows: Vec<Row>,
}

impl ExportView {
    pub fn new(scope: ExportScope, columns: &[&ColumnDef], rows: Vec<Row>) -> Self {
        Self {
            scope,
            columns: columns.iter().map(|def| ExportColumn::from(*def)).collect(),
            rows,
        }
    }

    /// Columns that end up in the output
    pub fn exportable_columns(&self) -> impl Iterator<Item = &ExportColumn> {
        self.columns.iter().filter(|c| c.exportable)
    }

    /// Render as CSV with a header line; NULL cells are empty
    pub fn to_csv(&self) -> String {
        let columns: Vec<&ExportColumn> = self.exportable_columns().collect();

        let mut csv = String::new();
        let header: Vec<String> = columns.iter().map(|c| escape_csv_field(&c.header)).collect();
        csv.push_str(&header.join(","));
        csv.push('\n');

        for row in &self.rows {
            let escaped_row: Vec<String> = columns
                .iter()
                .map(|c| escape_csv_field(&row.get(&c.accessor_key).display_text()))
                .collect();
            csv.push_str(&escaped_row.join(","));
            csv.push('\n');
        }

        tracing::info!("Exported {} rows as CSV", self.rows.len());
        csv
    }
}

pub(crate) fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
