//! Filter and sort types
//!
//! Shared data structures for per-column filter conditions and sort configs.

use datagrid_core::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Filter operators for client-side row evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    // Equality operators
    #[default]
    Equals,
    NotEquals,

    // Comparison operators
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,

    // String operators
    Contains,
    NotContains,
    StartsWith,
    EndsWith,

    // Blank operators
    IsEmpty,
    IsNotEmpty,

    /// Operator name the engine does not recognise; always passes
    #[serde(other)]
    Unknown,
}

impl FilterOperator {
    /// Returns true if this operator requires a value input
    pub fn requires_value(&self) -> bool {
        !matches!(self, Self::IsEmpty | Self::IsNotEmpty | Self::Unknown)
    }
}

/// A single filter condition on one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    /// Unique ID for this condition within its column
    pub id: String,
    pub operator: FilterOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FilterCondition {
    pub fn new(id: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            operator,
            value: Some(value.into()),
        }
    }

    /// A condition for an operator that takes no value
    pub fn unary(id: impl Into<String>, operator: FilterOperator) -> Self {
        Self {
            id: id.into(),
            operator,
            value: None,
        }
    }

    /// Check if this is a complete condition
    ///
    /// A value-requiring operator with a missing or blank value is invalid
    /// and is left out of evaluation entirely.
    pub fn is_valid(&self) -> bool {
        if !self.operator.requires_value() {
            return true;
        }
        self.value.as_ref().is_some_and(|v| !v.is_blank())
    }
}

/// Conditions keyed by column id, AND-combined within and across columns
pub type ColumnFilters = IndexMap<String, Vec<FilterCondition>>;

/// How a column's values are compared when sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    #[default]
    Alpha,
    Numeric,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort configuration for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    #[serde(rename = "type")]
    pub sort_type: SortType,
    /// `None` means the column is not sorted
    pub direction: Option<SortDirection>,
}

impl SortConfig {
    pub fn new(sort_type: SortType, direction: Option<SortDirection>) -> Self {
        Self {
            sort_type,
            direction,
        }
    }

    pub fn alpha(direction: SortDirection) -> Self {
        Self::new(SortType::Alpha, Some(direction))
    }

    pub fn numeric(direction: SortDirection) -> Self {
        Self::new(SortType::Numeric, Some(direction))
    }

    pub fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    /// Next state when a header is clicked: asc, desc, then unsorted
    pub fn cycle(&self) -> Self {
        let direction = match self.direction {
            None => Some(SortDirection::Asc),
            Some(SortDirection::Asc) => Some(SortDirection::Desc),
            Some(SortDirection::Desc) => None,
        };
        Self {
            sort_type: self.sort_type,
            direction,
        }
    }
}

/// Sort configs keyed by column id, in priority order
pub type ColumnSorts = IndexMap<String, SortConfig>;
