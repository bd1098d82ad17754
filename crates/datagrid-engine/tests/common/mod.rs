//! Common test fixtures and event capture

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use datagrid_engine::{ColumnDef, Grid, GridConfig, GridEvent, Row, Value, ValueType};

/// Rows with a single `name` field
pub fn name_rows(names: &[&str]) -> Vec<Row> {
    names.iter().map(|name| Row::new().with("name", *name)).collect()
}

/// A small people table with ids, names, ages and emails
pub fn people() -> Vec<Row> {
    vec![
        Row::new()
            .with("id", 1i64)
            .with("name", "Alice")
            .with("age", 34i64)
            .with("email", "alice@example.com"),
        Row::new()
            .with("id", 2i64)
            .with("name", "bob")
            .with("age", 20i64)
            .with("email", ""),
        Row::new()
            .with("id", 3i64)
            .with("name", "Carol")
            .with("age", Value::Null)
            .with("email", "carol@example.com"),
        Row::new()
            .with("id", 4i64)
            .with("name", "dave")
            .with("age", "41")
            .with("email", Value::Null),
    ]
}

pub fn people_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id").editable(false).draggable(false).size(60.0),
        ColumnDef::new("name").header("Name"),
        ColumnDef::new("age").value_type(ValueType::Number),
        ColumnDef::new("email").value_type(ValueType::Email),
    ]
}

pub fn people_grid(config: GridConfig) -> Grid {
    Grid::new(people_columns(), people(), config).expect("valid columns")
}

/// Events seen by a subscriber, with the data length at delivery time
pub type Captured = Rc<RefCell<Vec<(GridEvent, usize)>>>;

/// Subscribe a recorder to `grid`
pub fn capture(grid: &mut Grid) -> Captured {
    let captured: Captured = Rc::new(RefCell::new(Vec::new()));
    let sink = captured.clone();
    grid.subscribe(move |event, data| {
        sink.borrow_mut().push((event.clone(), data.len()));
    });
    captured
}

/// `field` of every display row, in display order
pub fn display_column(grid: &Grid, field: &str) -> Vec<Value> {
    grid.display_rows()
        .into_iter()
        .map(|row| row.get(field).clone())
        .collect()
}
