//! Column layout persistence through a file-backed store

mod common;

use std::time::{Duration, Instant};

use datagrid_engine::{
    ColumnDef, FileLayoutStore, Grid, GridConfig, LayoutRecord, LayoutStore, MemoryLayoutStore,
    Pin,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use common::{people, people_columns};

fn config(table_id: &str) -> GridConfig {
    GridConfig {
        table_id: Some(table_id.to_string()),
        ..GridConfig::default()
    }
}

fn open(dir: &TempDir, table_id: &str) -> Grid {
    Grid::new(people_columns(), people(), config(table_id))
        .unwrap()
        .with_layout_store(Box::new(FileLayoutStore::new(dir.path())))
        .unwrap()
}

fn order(grid: &Grid) -> Vec<&str> {
    grid.layout().order().iter().map(String::as_str).collect()
}

#[test]
fn layout_survives_a_reload() {
    let dir = TempDir::new().unwrap();
    let store = FileLayoutStore::new(dir.path());

    let mut grid = open(&dir, "people");
    grid.reorder_column("email", 1).unwrap();
    grid.resize_column("name", 40.0).unwrap();
    grid.set_column_visible("age", false).unwrap();
    grid.set_column_fixed("id", Some(Pin::Left)).unwrap();
    grid.flush_layout().unwrap();
    assert!(store.path_for("people").exists());

    let reloaded = open(&dir, "people");
    assert_eq!(order(&reloaded), vec!["id", "email", "name", "age"]);
    assert_eq!(reloaded.layout().width("name"), Some(190.0));
    assert!(!reloaded.layout().is_visible("age"));
    assert_eq!(reloaded.layout().fixed("id"), Some(Pin::Left));

    // Other tables are unaffected
    let other = open(&dir, "invoices");
    assert_eq!(order(&other), vec!["id", "name", "age", "email"]);
}

#[test]
fn writes_wait_for_the_quiet_period() {
    let dir = TempDir::new().unwrap();
    let store = FileLayoutStore::new(dir.path());
    let mut grid = open(&dir, "people");
    let start = Instant::now();

    // Loading alone schedules nothing
    assert!(!grid.poll_persistence(start + Duration::from_secs(5)));

    grid.set_column_width("name", 220.0).unwrap();
    assert!(!grid.poll_persistence(start));
    assert!(!store.path_for("people").exists());

    assert!(grid.poll_persistence(Instant::now() + Duration::from_secs(1)));
    let json = store.load("people").unwrap().unwrap();
    let record = LayoutRecord::from_json(&json).unwrap();
    assert_eq!(record.column_sizing.get("name"), Some(&220.0));

    // Nothing left to write
    assert!(!grid.poll_persistence(Instant::now() + Duration::from_secs(2)));
}

#[test]
fn stale_ids_are_dropped_and_new_columns_appended() {
    let dir = TempDir::new().unwrap();
    let mut store = FileLayoutStore::new(dir.path());
    store
        .save(
            "people",
            r#"{
                "columnOrder": ["ghost", "email", "name", "id"],
                "columnVisibility": {"ghost": false, "name": false},
                "columnSizing": {"email": 9000.0, "ghost": 10.0},
                "columnFixed": {"email": "right"}
            }"#,
        )
        .unwrap();

    let grid = open(&dir, "people");

    assert_eq!(order(&grid), vec!["email", "name", "id", "age"]);
    assert!(!grid.layout().is_visible("name"));
    assert!(grid.layout().is_visible("age"));
    // Stored widths are clamped to the column bounds
    assert_eq!(grid.layout().width("email"), Some(500.0));
    assert_eq!(grid.layout().fixed("email"), Some(Pin::Right));
    assert_eq!(grid.layout().column("ghost"), None);
}

#[test]
fn unreadable_layout_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let store = FileLayoutStore::new(dir.path());
    std::fs::write(store.path_for("people"), "{ not json").unwrap();

    let grid = open(&dir, "people");
    assert_eq!(order(&grid), vec!["id", "name", "age", "email"]);
    assert_eq!(grid.layout().width("id"), Some(60.0));
}

#[test]
fn memory_store_round_trip() {
    let mut grid = Grid::new(
        vec![ColumnDef::new("a"), ColumnDef::new("b")],
        Vec::new(),
        config("scratch"),
    )
    .unwrap()
    .with_layout_store(Box::new(MemoryLayoutStore::new()))
    .unwrap();

    grid.cycle_column_fixed("b").unwrap();
    assert_eq!(grid.cycle_column_fixed("b").unwrap(), Some(Pin::Right));
    grid.flush_layout().unwrap();

    assert_eq!(grid.layout().fixed_offsets().get("b"), Some(&0.0));
    assert!(!grid.poll_persistence(Instant::now() + Duration::from_secs(1)));
}
