//! Column schema types

use serde::{Deserialize, Serialize};

/// Smallest width any column may take, in pixels
pub const MIN_COLUMN_WIDTH: f32 = 50.0;

/// Largest width any column may take, in pixels
pub const MAX_COLUMN_WIDTH: f32 = 500.0;

/// Width used when the host does not supply one
pub const DEFAULT_COLUMN_WIDTH: f32 = 150.0;

/// Side a column is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pin {
    Left,
    Right,
}

impl Pin {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Kind of value a column holds, used to coerce edited text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Text,
    Number,
    Email,
    Date,
}

/// Optional per-column behaviour flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<Pin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exportable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
}

/// Column definition supplied by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Unique column id
    pub id: String,
    /// Row field this column reads; defaults to `id`
    #[serde(default)]
    pub accessor_key: String,
    /// Header label; opaque to the engine
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub size: Option<f32>,
    #[serde(default)]
    pub min_size: Option<f32>,
    #[serde(default)]
    pub max_size: Option<f32>,
    #[serde(default)]
    pub meta: ColumnMeta,
}

impl ColumnDef {
    /// Create a column whose accessor key equals its id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor_key: id.clone(),
            id,
            header: None,
            size: None,
            min_size: None,
            max_size: None,
            meta: ColumnMeta::default(),
        }
    }

    pub fn accessor(mut self, key: impl Into<String>) -> Self {
        self.accessor_key = key.into();
        self
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn min_size(mut self, size: f32) -> Self {
        self.min_size = Some(size);
        self
    }

    pub fn max_size(mut self, size: f32) -> Self {
        self.max_size = Some(size);
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.meta.editable = Some(editable);
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.meta.draggable = Some(draggable);
        self
    }

    pub fn fixed(mut self, pin: Pin) -> Self {
        self.meta.fixed = Some(pin);
        self
    }

    pub fn exportable(mut self, exportable: bool) -> Self {
        self.meta.exportable = Some(exportable);
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.meta.value_type = Some(value_type);
        self
    }

    /// Row field read by this column
    ///
    /// Deserialized definitions may omit `accessorKey`, in which case the id
    /// doubles as the key.
    pub fn key(&self) -> &str {
        if self.accessor_key.is_empty() {
            &self.id
        } else {
            &self.accessor_key
        }
    }

    /// Header text, falling back to the column id
    pub fn label(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.id)
    }

    pub fn value_type_or_default(&self) -> ValueType {
        self.meta.value_type.unwrap_or_default()
    }

    pub fn is_draggable(&self) -> bool {
        self.meta.draggable != Some(false)
    }

    pub fn is_exportable(&self) -> bool {
        self.meta.exportable != Some(false)
    }

    /// Width bounds for this column, always within the global band
    pub fn size_bounds(&self) -> (f32, f32) {
        let min = self
            .min_size
            .filter(|w| !w.is_nan())
            .unwrap_or(MIN_COLUMN_WIDTH)
            .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        let max = self
            .max_size
            .filter(|w| !w.is_nan())
            .unwrap_or(MAX_COLUMN_WIDTH)
            .clamp(min, MAX_COLUMN_WIDTH);
        (min, max)
    }

    /// Clamp a candidate width into this column's bounds
    pub fn clamp_width(&self, width: f32) -> f32 {
        let (min, max) = self.size_bounds();
        if width.is_nan() {
            return min;
        }
        width.clamp(min, max)
    }

    /// Initial width, clamped
    pub fn initial_width(&self) -> f32 {
        self.clamp_width(self.size.unwrap_or(DEFAULT_COLUMN_WIDTH))
    }
}
