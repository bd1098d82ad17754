//! Column order, visibility, width and pinning

use std::collections::HashSet;

use datagrid_core::{ColumnDef, GridError, Pin, Result};
use indexmap::IndexMap;

use super::persistence::LayoutRecord;

/// Owns the layout of the active column set
///
/// Definitions are kept in the order the host supplied them; display order,
/// visibility, width and pin live in separate maps keyed by column id. Every
/// user-facing change bumps `version`, which drives debounced persistence.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayoutManager {
    defs: Vec<ColumnDef>,
    order: Vec<String>,
    visibility: IndexMap<String, bool>,
    sizing: IndexMap<String, f32>,
    fixed: IndexMap<String, Option<Pin>>,
    version: u64,
}

impl ColumnLayoutManager {
    pub fn new(defs: Vec<ColumnDef>) -> Result<Self> {
        let mut manager = Self::default();
        manager.set_columns(defs)?;
        manager.version = 0;
        Ok(manager)
    }

    /// Replace the column set.
    ///
    /// Columns that survive keep their order, visibility, width and pin;
    /// new columns are appended with their defaults.
    pub fn set_columns(&mut self, defs: Vec<ColumnDef>) -> Result<()> {
        let mut seen = HashSet::new();
        for def in &defs {
            if !seen.insert(def.id.as_str()) {
                return Err(GridError::DuplicateColumn(def.id.clone()));
            }
        }

        let mut order: Vec<String> = self
            .order
            .iter()
            .filter(|id| seen.contains(id.as_str()))
            .cloned()
            .collect();
        for def in &defs {
            if !order.contains(&def.id) {
                order.push(def.id.clone());
            }
        }

        let mut visibility = IndexMap::new();
        let mut sizing = IndexMap::new();
        let mut fixed = IndexMap::new();
        for def in &defs {
            let id = def.id.clone();
            visibility.insert(id.clone(), self.visibility.get(&id).copied().unwrap_or(true));
            let width = self
                .sizing
                .get(&id)
                .map(|w| def.clamp_width(*w))
                .unwrap_or_else(|| def.initial_width());
            sizing.insert(id.clone(), width);
            let pin = match self.fixed.get(&id) {
                Some(pin) => *pin,
                None => def.meta.fixed,
            };
            fixed.insert(id, pin);
        }

        self.defs = defs;
        self.order = order;
        self.visibility = visibility;
        self.sizing = sizing;
        self.fixed = fixed;
        self.bump();
        Ok(())
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn require(&self, id: &str) -> Result<&ColumnDef> {
        self.column(id)
            .ok_or_else(|| GridError::UnknownColumn(id.to_string()))
    }

    /// Layout version; changes whenever the layout does
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Column definitions in host order
    pub fn defs(&self) -> &[ColumnDef] {
        &self.defs
    }

    pub fn column(&self, id: &str) -> Option<&ColumnDef> {
        self.defs.iter().find(|def| def.id == id)
    }

    /// Column ids in display order, hidden columns included
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Columns in display order, hidden columns included
    pub fn ordered_columns(&self) -> Vec<&ColumnDef> {
        self.order.iter().filter_map(|id| self.column(id)).collect()
    }

    /// Visible columns in display order
    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        self.order
            .iter()
            .filter(|id| self.is_visible(id))
            .filter_map(|id| self.column(id))
            .collect()
    }

    /// Visible column at display position `index`
    pub fn visible_column_at(&self, index: usize) -> Option<&ColumnDef> {
        self.order
            .iter()
            .filter(|id| self.is_visible(id))
            .nth(index)
            .and_then(|id| self.column(id))
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visibility.get(id).copied().unwrap_or(false)
    }

    pub fn width(&self, id: &str) -> Option<f32> {
        self.sizing.get(id).copied()
    }

    pub fn fixed(&self, id: &str) -> Option<Pin> {
        self.fixed.get(id).copied().flatten()
    }

    /// Move a column to `new_index` in the display order.
    ///
    /// Indices past the end move the column to the end.
    pub fn reorder(&mut self, id: &str, new_index: usize) -> Result<()> {
        if !self.require(id)?.is_draggable() {
            return Err(GridError::NotDraggable(id.to_string()));
        }
        let Some(current) = self.order.iter().position(|c| c == id) else {
            return Err(GridError::UnknownColumn(id.to_string()));
        };

        let column = self.order.remove(current);
        let target = new_index.min(self.order.len());
        self.order.insert(target, column);
        self.bump();

        tracing::info!("Column {} moved from {} to {}", id, current, target);
        Ok(())
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) -> Result<()> {
        self.require(id)?;
        self.visibility.insert(id.to_string(), visible);
        self.bump();
        tracing::debug!("Column {} visibility set to {}", id, visible);
        Ok(())
    }

    /// Grow or shrink a column by `delta` pixels, returning the clamped width
    pub fn resize(&mut self, id: &str, delta: f32) -> Result<f32> {
        let current = self.width(id).unwrap_or_default();
        self.set_width(id, current + delta)
    }

    /// Set a column's width, returning the clamped width
    pub fn set_width(&mut self, id: &str, width: f32) -> Result<f32> {
        let width = self.require(id)?.clamp_width(width);
        self.sizing.insert(id.to_string(), width);
        self.bump();
        Ok(width)
    }

    pub fn set_fixed(&mut self, id: &str, pin: Option<Pin>) -> Result<()> {
        self.require(id)?;
        self.fixed.insert(id.to_string(), pin);
        self.bump();
        match pin {
            Some(pin) => tracing::info!("Column {} pinned {}", id, pin.label()),
            None => tracing::info!("Column {} unpinned", id),
        }
        Ok(())
    }

    /// Step the pin through none, left, right and back to none
    pub fn cycle_fixed(&mut self, id: &str) -> Result<Option<Pin>> {
        let next = match self.fixed(id) {
            None => Some(Pin::Left),
            Some(Pin::Left) => Some(Pin::Right),
            Some(Pin::Right) => None,
        };
        self.set_fixed(id, next)?;
        Ok(next)
    }

    /// Sticky offsets of the pinned visible columns, keyed by column id
    pub fn fixed_offsets(&self) -> IndexMap<String, f32> {
        let visible: Vec<(&str, f32, Option<Pin>)> = self
            .visible_columns()
            .into_iter()
            .map(|def| {
                (
                    def.id.as_str(),
                    self.width(&def.id).unwrap_or_default(),
                    self.fixed(&def.id),
                )
            })
            .collect();
        let layout: Vec<(f32, Option<Pin>)> =
            visible.iter().map(|(_, width, pin)| (*width, *pin)).collect();

        visible
            .iter()
            .zip(compute_fixed_offsets(&layout))
            .filter_map(|((id, _, _), offset)| offset.map(|o| (id.to_string(), o)))
            .collect()
    }

    /// Snapshot for persistence
    pub fn to_record(&self) -> LayoutRecord {
        LayoutRecord {
            column_order: self.order.clone(),
            column_visibility: self.visibility.clone(),
            column_sizing: self.sizing.clone(),
            column_fixed: self.fixed.clone(),
        }
    }

    /// Restore a persisted layout.
    ///
    /// Ids that are no longer columns are dropped and columns missing from
    /// the stored order are appended at the end. Restoring does not bump the
    /// version, so it never schedules a save by itself.
    pub fn apply_record(&mut self, record: &LayoutRecord) {
        let mut order = Vec::with_capacity(self.defs.len());
        for id in &record.column_order {
            if self.column(id).is_some() && !order.contains(id) {
                order.push(id.clone());
            }
        }
        for def in &self.defs {
            if !order.contains(&def.id) {
                order.push(def.id.clone());
            }
        }
        let pruned = record.column_order.len().saturating_sub(
            record
                .column_order
                .iter()
                .filter(|id| self.column(id).is_some())
                .count(),
        );
        self.order = order;

        for def in &self.defs {
            if let Some(visible) = record.column_visibility.get(&def.id) {
                self.visibility.insert(def.id.clone(), *visible);
            }
            if let Some(width) = record.column_sizing.get(&def.id) {
                self.sizing.insert(def.id.clone(), def.clamp_width(*width));
            }
            if let Some(pin) = record.column_fixed.get(&def.id) {
                self.fixed.insert(def.id.clone(), *pin);
            }
        }

        if pruned > 0 {
            tracing::debug!("Dropped {} stale column ids from stored layout", pruned);
        }
    }
}

/// Sticky offsets for pinned columns.
///
/// `columns` are the visible columns in display order as `(width, pin)`.
/// Left-pinned columns accumulate from the left edge and right-pinned ones
/// from the right edge. Each pinned column after the first on its side sits
/// one pixel closer so adjacent borders overlap. Unpinned columns get `None`.
pub fn compute_fixed_offsets(columns: &[(f32, Option<Pin>)]) -> Vec<Option<f32>> {
    let mut offsets = vec![None; columns.len()];

    let mut previous: Option<(f32, f32)> = None;
    for (idx, (width, pin)) in columns.iter().enumerate() {
        if *pin != Some(Pin::Left) {
            continue;
        }
        let offset = match previous {
            None => 0.0,
            Some((prev_offset, prev_width)) => prev_offset + prev_width - 1.0,
        };
        offsets[idx] = Some(offset);
        previous = Some((offset, *width));
    }

    let mut previous: Option<(f32, f32)> = None;
    for (idx, (width, pin)) in columns.iter().enumerate().rev() {
        if *pin != Some(Pin::Right) {
            continue;
        }
        let offset = match previous {
            None => 0.0,
            Some((prev_offset, prev_width)) => prev_offset + prev_width - 1.0,
        };
        offsets[idx] = Some(offset);
        previous = Some((offset, *width));
    }

    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn manager() -> ColumnLayoutManager {
        ColumnLayoutManager::new(vec![
            ColumnDef::new("id").draggable(false).size(60.0),
            ColumnDef::new("name").size(120.0),
            ColumnDef::new("email"),
            ColumnDef::new("age").fixed(Pin::Right).size(80.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let result = ColumnLayoutManager::new(vec![ColumnDef::new("a"), ColumnDef::new("a")]);
        assert_eq!(result.unwrap_err(), GridError::DuplicateColumn("a".into()));
    }

    #[test]
    fn test_reorder_clamps_and_respects_draggable() {
        let mut layout = manager();
        layout.reorder("name", 99).unwrap();
        assert_eq!(layout.order(), &["id", "email", "age", "name"]);

        layout.reorder("name", 0).unwrap();
        assert_eq!(layout.order(), &["name", "id", "email", "age"]);

        assert_eq!(
            layout.reorder("id", 3),
            Err(GridError::NotDraggable("id".into()))
        );
        assert_eq!(
            layout.reorder("missing", 0),
            Err(GridError::UnknownColumn("missing".into()))
        );
    }

    #[test]
    fn test_resize_clamps() {
        let mut layout = manager();
        assert_eq!(layout.resize("name", -500.0).unwrap(), 50.0);
        assert_eq!(layout.resize("name", 10_000.0).unwrap(), 500.0);
        assert_eq!(layout.resize("name", -100.0).unwrap(), 400.0);
    }

    #[test]
    fn test_every_change_bumps_version() {
        let mut layout = manager();
        let start = layout.version();
        layout.set_visible("email", false).unwrap();
        layout.resize("name", 5.0).unwrap();
        layout.cycle_fixed("name").unwrap();
        assert_eq!(layout.version(), start + 3);
    }

    #[test]
    fn test_cycle_fixed() {
        let mut layout = manager();
        assert_eq!(layout.cycle_fixed("name").unwrap(), Some(Pin::Left));
        assert_eq!(layout.cycle_fixed("name").unwrap(), Some(Pin::Right));
        assert_eq!(layout.cycle_fixed("name").unwrap(), None);
        assert_eq!(layout.fixed("age"), Some(Pin::Right));
    }

    #[test]
    fn test_visible_columns_follow_order() {
        let mut layout = manager();
        layout.set_visible("name", false).unwrap();
        let ids: Vec<&str> = layout.visible_columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["id", "email", "age"]);
        assert_eq!(layout.visible_column_at(1).map(|c| c.id.as_str()), Some("email"));
        assert!(layout.visible_column_at(3).is_none());
    }

    #[test]
    fn test_fixed_offsets_accumulate_with_border_overlap() {
        let columns = vec![
            (100.0, Some(Pin::Left)),
            (80.0, Some(Pin::Left)),
            (200.0, None),
            (60.0, Some(Pin::Left)),
            (70.0, Some(Pin::Right)),
            (90.0, Some(Pin::Right)),
        ];
        assert_eq!(
            compute_fixed_offsets(&columns),
            vec![
                Some(0.0),
                Some(99.0),
                None,
                Some(178.0),
                Some(89.0),
                Some(0.0),
            ]
        );
    }

    #[test]
    fn test_fixed_offsets_by_id_skip_hidden_columns() {
        let mut layout = manager();
        layout.set_fixed("id", Some(Pin::Left)).unwrap();
        layout.set_fixed("name", Some(Pin::Left)).unwrap();
        let offsets = layout.fixed_offsets();
        assert_eq!(offsets.get("id"), Some(&0.0));
        assert_eq!(offsets.get("name"), Some(&59.0));
        assert_eq!(offsets.get("age"), Some(&0.0));
        assert!(!offsets.contains_key("email"));

        layout.set_visible("id", false).unwrap();
        assert_eq!(layout.fixed_offsets().get("name"), Some(&0.0));
    }

    #[test]
    fn test_apply_record_prunes_and_appends() {
        let mut layout = manager();
        let mut record = LayoutRecord::default();
        record.column_order = vec!["age".into(), "gone".into(), "name".into()];
        record.column_visibility.insert("email".into(), false);
        record.column_visibility.insert("gone".into(), false);
        record.column_sizing.insert("name".into(), 9000.0);
        record.column_fixed.insert("age".into(), None);

        let version = layout.version();
        layout.apply_record(&record);

        assert_eq!(layout.order(), &["age", "name", "id", "email"]);
        assert!(!layout.is_visible("email"));
        assert_eq!(layout.width("name"), Some(500.0));
        assert_eq!(layout.fixed("age"), None);
        assert_eq!(layout.version(), version);
        assert!(!layout.to_record().column_visibility.contains_key("gone"));
    }

    #[test]
    fn test_set_columns_keeps_existing_state() {
        let mut layout = manager();
        layout.reorder("email", 0).unwrap();
        layout.set_width("email", 222.0).unwrap();
        layout
            .set_columns(vec![
                ColumnDef::new("name"),
                ColumnDef::new("email"),
                ColumnDef::new("city"),
            ])
            .unwrap();
        assert_eq!(layout.order(), &["email", "name", "city"]);
        assert_eq!(layout.width("email"), Some(222.0));
        assert_eq!(layout.width("city"), Some(150.0));
    }
}
