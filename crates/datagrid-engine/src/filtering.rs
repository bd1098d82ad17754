//! Client-side row filtering
//!
//! Evaluates per-column filter conditions against in-memory rows. Cell and
//! condition values are classified into a [`CellKind`] once so that operator
//! dispatch never re-coerces at each call site.

use std::cmp::Ordering;

use datagrid_core::{ColumnDef, Row, Value};

use crate::filter_types::{ColumnFilters, FilterCondition, FilterOperator};

/// Tagged view of a value used for comparisons
#[derive(Debug, Clone, PartialEq)]
pub enum CellKind {
    Blank,
    Number(f64),
    /// Lower-cased text
    Text(String),
}

impl CellKind {
    pub fn classify(value: &Value) -> Self {
        if value.is_blank() {
            return CellKind::Blank;
        }
        match value.as_f64() {
            Some(n) if !n.is_nan() => CellKind::Number(n),
            _ => CellKind::Text(value.display_text().to_lowercase()),
        }
    }

    fn as_text(&self) -> String {
        match self {
            CellKind::Blank => String::new(),
            CellKind::Number(n) => n.to_string(),
            CellKind::Text(s) => s.clone(),
        }
    }
}

/// Check if a row passes every column's conditions.
///
/// Columns are resolved by id against `columns` to find the row field; an id
/// that is not a known column is read as a row field of the same name.
pub fn row_matches_filters(row: &Row, filters: &ColumnFilters, columns: &[ColumnDef]) -> bool {
    filters.iter().all(|(column_id, conditions)| {
        let key = columns
            .iter()
            .find(|c| &c.id == column_id)
            .map(|c| c.key())
            .unwrap_or(column_id.as_str());
        value_matches_conditions(row.get(key), conditions)
    })
}

/// Check a single cell against a column's conditions (AND semantics).
///
/// Invalid conditions are dropped first; with none left the cell passes.
pub fn value_matches_conditions(value: &Value, conditions: &[FilterCondition]) -> bool {
    conditions
        .iter()
        .filter(|c| c.is_valid())
        .all(|c| evaluate_condition(c, value))
}

/// Keep only the conditions that take part in evaluation
pub fn validate_conditions(conditions: &[FilterCondition]) -> Vec<FilterCondition> {
    conditions.iter().filter(|c| c.is_valid()).cloned().collect()
}

/// Evaluate one (valid) condition against a cell value.
pub fn evaluate_condition(condition: &FilterCondition, value: &Value) -> bool {
    match condition.operator {
        FilterOperator::IsEmpty => return value.is_blank(),
        FilterOperator::IsNotEmpty => return !value.is_blank(),
        FilterOperator::Unknown => return true,
        _ => {}
    }

    let Some(filter_value) = condition.value.as_ref() else {
        return true;
    };

    evaluate_operator(
        condition.operator,
        &CellKind::classify(value),
        &CellKind::classify(filter_value),
    )
}

/// Evaluate a filter operator against a classified cell value.
fn evaluate_operator(operator: FilterOperator, cell: &CellKind, filter: &CellKind) -> bool {
    let cell_text = cell.as_text();
    let filter_text = filter.as_text();

    match operator {
        FilterOperator::Equals => compare(cell, filter).is_eq(),
        FilterOperator::NotEquals => !compare(cell, filter).is_eq(),

        FilterOperator::GreaterThan => compare(cell, filter).is_gt(),
        FilterOperator::LessThan => compare(cell, filter).is_lt(),
        FilterOperator::GreaterThanOrEqual => compare(cell, filter).is_ge(),
        FilterOperator::LessThanOrEqual => compare(cell, filter).is_le(),

        FilterOperator::Contains => cell_text.contains(&filter_text),
        FilterOperator::NotContains => !cell_text.contains(&filter_text),
        FilterOperator::StartsWith => cell_text.starts_with(&filter_text),
        FilterOperator::EndsWith => cell_text.ends_with(&filter_text),

        FilterOperator::IsEmpty => matches!(cell, CellKind::Blank),
        FilterOperator::IsNotEmpty => !matches!(cell, CellKind::Blank),
        FilterOperator::Unknown => true,
    }
}

/// Compare numerically when both sides are numbers, else as lower-cased text.
fn compare(cell: &CellKind, filter: &CellKind) -> Ordering {
    match (cell, filter) {
        (CellKind::Number(a), CellKind::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        _ => cell.as_text().cmp(&filter.as_text()),
    }
}

/// Case-insensitive substring match across the given columns.
pub fn row_matches_search(row: &Row, columns: &[&ColumnDef], search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    columns.iter().any(|column| {
        row.get(column.key())
            .display_text()
            .to_lowercase()
            .contains(&needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_types::FilterCondition;

    fn cond(operator: FilterOperator, value: impl Into<Value>) -> FilterCondition {
        FilterCondition::new("c", operator, value)
    }

    #[test]
    fn test_numeric_comparison_when_cell_is_numeric() {
        let gt = cond(FilterOperator::GreaterThan, "30");
        assert!(evaluate_condition(&gt, &Value::Int64(40)));
        assert!(!evaluate_condition(&gt, &Value::Int64(20)));
        // "100" > "30" numerically even though it sorts lower as text
        assert!(evaluate_condition(&gt, &Value::from("100")));
    }

    #[test]
    fn test_null_cell_is_excluded_by_comparison() {
        let gt = cond(FilterOperator::GreaterThan, 30i64);
        assert!(!evaluate_condition(&gt, &Value::Null));
    }

    #[test]
    fn test_string_fallback_is_case_insensitive() {
        assert!(evaluate_condition(&cond(FilterOperator::Equals, "ALICE"), &Value::from("alice")));
        assert!(evaluate_condition(&cond(FilterOperator::GreaterThan, "apple"), &Value::from("Banana")));
        assert!(evaluate_condition(&cond(FilterOperator::LessThanOrEqual, "b"), &Value::from("B")));
    }

    #[test]
    fn test_numeric_cell_against_text_value_compares_as_text() {
        let gt = cond(FilterOperator::GreaterThan, "abc");
        // "5" < "abc" lexicographically
        assert!(!evaluate_condition(&gt, &Value::Int64(5)));
    }

    #[test]
    fn test_equals_numeric_normalizes_representation() {
        assert!(evaluate_condition(&cond(FilterOperator::Equals, "40.0"), &Value::Int64(40)));
        assert!(evaluate_condition(&cond(FilterOperator::NotEquals, "41"), &Value::Int64(40)));
    }

    #[test]
    fn test_string_operators() {
        let cell = Value::from("Hello World");
        assert!(evaluate_condition(&cond(FilterOperator::Contains, "lo wo"), &cell));
        assert!(evaluate_condition(&cond(FilterOperator::NotContains, "xyz"), &cell));
        assert!(evaluate_condition(&cond(FilterOperator::StartsWith, "HELLO"), &cell));
        assert!(evaluate_condition(&cond(FilterOperator::EndsWith, "world"), &cell));
        assert!(!evaluate_condition(&cond(FilterOperator::StartsWith, "world"), &cell));
    }

    #[test]
    fn test_blank_operators() {
        let empty = FilterCondition::unary("c", FilterOperator::IsEmpty);
        let not_empty = FilterCondition::unary("c", FilterOperator::IsNotEmpty);
        for blank in [Value::Null, Value::from(""), Value::from("  ")] {
            assert!(evaluate_condition(&empty, &blank));
            assert!(!evaluate_condition(&not_empty, &blank));
        }
        assert!(evaluate_condition(&not_empty, &Value::Int64(0)));
    }

    #[test]
    fn test_invalid_conditions_are_ignored() {
        let conditions = vec![
            FilterCondition::unary("a", FilterOperator::Equals),
            cond(FilterOperator::Contains, ""),
        ];
        assert!(value_matches_conditions(&Value::from("anything"), &conditions));
    }

    #[test]
    fn test_validate_conditions() {
        let conditions = vec![
            cond(FilterOperator::Equals, "x"),
            FilterCondition::unary("b", FilterOperator::LessThan),
            FilterCondition::unary("c", FilterOperator::IsEmpty),
        ];
        let valid = validate_conditions(&conditions);
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[1].operator, FilterOperator::IsEmpty);
    }

    #[test]
    fn test_unknown_operator_passes() {
        let unknown = cond(FilterOperator::Unknown, "x");
        assert!(evaluate_condition(&unknown, &Value::from("y")));
        assert!(evaluate_condition(&unknown, &Value::Null));
    }

    #[test]
    fn test_search_matches_any_column() {
        let a = ColumnDef::new("name");
        let b = ColumnDef::new("city");
        let row = Row::new().with("name", "Alice").with("city", "Oslo");
        assert!(row_matches_search(&row, &[&a, &b], "OSL"));
        assert!(!row_matches_search(&row, &[&a], "oslo"));
        assert!(row_matches_search(&row, &[&a], "   "));
    }
}
