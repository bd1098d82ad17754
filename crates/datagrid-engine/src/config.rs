//! Grid configuration
//!
//! Every field has a default, so a host only spells out what it changes.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::editing::EditTrigger;
use crate::pagination::{DEFAULT_PAGE_SIZE, PaginationMode};

/// Pagination settings a grid starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationSettings {
    pub mode: PaginationMode,
    pub page_size: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            mode: PaginationMode::Client,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Key for the persisted layout; `None` disables persistence
    pub table_id: Option<String>,
    pub edit_trigger: EditTrigger,
    /// Commit edits when the editor loses focus
    pub auto_commit: bool,
    /// Global editing toggle
    pub editing_enabled: bool,
    pub pagination: PaginationSettings,
    pub persist_debounce_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            table_id: None,
            edit_trigger: EditTrigger::Double,
            auto_commit: true,
            editing_enabled: true,
            pagination: PaginationSettings::default(),
            persist_debounce_ms: 500,
        }
    }
}

impl GridConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse grid config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read grid config from {:?}", path))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid grid config in {:?}", path))
    }

    pub fn persist_debounce(&self) -> Duration {
        Duration::from_millis(self.persist_debounce_ms)
    }
}
