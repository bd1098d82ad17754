//! Layout persistence
//!
//! The column layout is written to an external key-value store under the
//! host's table id. Writes are debounced: a layout change only schedules a
//! save, and `poll` performs it once the layout has been quiet long enough.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use datagrid_core::Pin;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::columns::ColumnLayoutManager;

/// Quiet period before a layout change is written
pub const DEFAULT_PERSIST_DEBOUNCE: Duration = Duration::from_millis(500);

/// Persisted layout of one table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutRecord {
    pub column_order: Vec<String>,
    pub column_visibility: IndexMap<String, bool>,
    pub column_sizing: IndexMap<String, f32>,
    pub column_fixed: IndexMap<String, Option<Pin>>,
}

impl LayoutRecord {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse layout JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize layout")
    }
}

/// Key-value store holding serialized layouts
pub trait LayoutStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, json: &str) -> Result<()>;
}

/// Store that keeps layouts in memory for the life of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryLayoutStore {
    entries: HashMap<String, String>,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, json: &str) -> Result<()> {
        self.entries.insert(key.to_string(), json.to_string());
        Ok(())
    }
}

/// Default directory for layout files
pub fn layouts_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .context("Could not determine data directory")
        .map(|p| p.join("datagrid").join("layouts"))
}

/// Store writing one JSON file per table under a directory
#[derive(Debug, Clone)]
pub struct FileLayoutStore {
    dir: PathBuf,
}

impl FileLayoutStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform data directory
    pub fn default_location() -> Result<Self> {
        layouts_dir().map(Self::new)
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// File holding the layout for `key`; keys are hashed so any host id is
    /// a valid file name
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        self.dir.join(format!("{:016x}.json", hasher.finish()))
    }
}

impl LayoutStore for FileLayoutStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read layout from {:?}", path))?;
        Ok(Some(content))
    }

    fn save(&mut self, key: &str, json: &str) -> Result<()> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create layouts directory: {:?}", parent))?;
        }

        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write layout to {:?}", path))?;

        tracing::debug!("Saved layout to {:?}", path);
        Ok(())
    }
}

/// Debounced writer of one table's layout
pub struct LayoutPersistence {
    table_id: String,
    store: Box<dyn LayoutStore>,
    debounce: Duration,
    saved_version: Option<u64>,
    /// Version waiting to be written and when it was last changed
    scheduled: Option<(u64, Instant)>,
}

impl std::fmt::Debug for LayoutPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutPersistence")
            .field("table_id", &self.table_id)
            .field("debounce", &self.debounce)
            .field("saved_version", &self.saved_version)
            .field("scheduled", &self.scheduled)
            .finish()
    }
}

impl LayoutPersistence {
    pub fn new(table_id: impl Into<String>, store: Box<dyn LayoutStore>) -> Self {
        Self {
            table_id: table_id.into(),
            store,
            debounce: DEFAULT_PERSIST_DEBOUNCE,
            saved_version: None,
            scheduled: None,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Read the stored layout, if there is one
    pub fn load(&self) -> Result<Option<LayoutRecord>> {
        let Some(json) = self
            .store
            .load(&self.table_id)
            .with_context(|| format!("Failed to load layout for table {}", self.table_id))?
        else {
            return Ok(None);
        };
        LayoutRecord::from_json(&json).map(Some)
    }

    /// Treat `version` as already stored, e.g. right after a load
    pub fn mark_saved(&mut self, version: u64) {
        self.saved_version = Some(version);
        self.scheduled = None;
    }

    /// Note the layout version after a change at `now`.
    ///
    /// Each new version restarts the quiet period.
    pub fn schedule(&mut self, version: u64, now: Instant) {
        if self.saved_version == Some(version) {
            self.scheduled = None;
            return;
        }
        match self.scheduled {
            Some((scheduled, _)) if scheduled == version => {}
            _ => self.scheduled = Some((version, now)),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.scheduled.is_some()
    }

    /// Write the layout if a change has been quiet for the debounce period.
    ///
    /// Returns true when a write happened. A failed write is logged and
    /// stays scheduled so the next poll retries it.
    pub fn poll(&mut self, now: Instant, layout: &ColumnLayoutManager) -> bool {
        let Some((_, changed_at)) = self.scheduled else {
            return false;
        };
        if now.saturating_duration_since(changed_at) < self.debounce {
            return false;
        }

        match self.flush(layout) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Failed to persist layout for {}: {:#}", self.table_id, err);
                self.scheduled = Some((layout.version(), now));
                false
            }
        }
    }

    /// Write the layout now
    pub fn flush(&mut self, layout: &ColumnLayoutManager) -> Result<()> {
        let json = layout.to_record().to_json()?;
        self.store
            .save(&self.table_id, &json)
            .with_context(|| format!("Failed to save layout for table {}", self.table_id))?;
        self.mark_saved(layout.version());
        tracing::debug!(
            "Persisted layout for {} at version {}",
            self.table_id,
            layout.version()
        );
        Ok(())
    }
}
