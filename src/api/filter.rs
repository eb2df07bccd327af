//! Filter and sort clause parsing for list requests
//!
//! Filters are written on the command line as
//! `property[:operator]=value[,value...]`. When the operator is omitted it is
//! inferred from the shape of the value.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a `--filter` value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    #[error("missing value for filtering")]
    MissingValue,

    #[error("missing property for filtering")]
    MissingProperty,

    #[error("missing operator for filtering")]
    MissingOperator,

    #[error("invalid filtering operator '{0}'")]
    InvalidOperator(String),
}

/// Comparison operator of a filter clause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    #[default]
    Eq,
    Lk,
    Gt,
    Lt,
    In,
    Neq,
    Nin,
    Nlk,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 8] = [
        FilterOperator::Eq,
        FilterOperator::Lk,
        FilterOperator::Gt,
        FilterOperator::Lt,
        FilterOperator::In,
        FilterOperator::Neq,
        FilterOperator::Nin,
        FilterOperator::Nlk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Lk => "lk",
            FilterOperator::Gt => "gt",
            FilterOperator::Lt => "lt",
            FilterOperator::In => "in",
            FilterOperator::Neq => "neq",
            FilterOperator::Nin => "nin",
            FilterOperator::Nlk => "nlk",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == lower)
            .ok_or_else(|| FilterParseError::InvalidOperator(s.to_string()))
    }
}

/// Sort direction of a sort clause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Only a case-insensitive `desc` selects descending order
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A single property/operator/values constraint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterClause {
    pub property: String,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl FilterClause {
    pub fn new(property: impl Into<String>, operator: FilterOperator, values: Vec<String>) -> Self {
        Self {
            property: property.into(),
            operator,
            values,
        }
    }

    /// True for the "no filter" sentinel returned when parsing an empty string
    pub fn is_empty(&self) -> bool {
        self.property.is_empty() && self.values.is_empty()
    }
}

/// A property plus direction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortClause {
    pub property: String,
    pub descending: bool,
}

impl SortClause {
    pub fn is_empty(&self) -> bool {
        self.property.is_empty()
    }

    pub fn direction(&self) -> SortDirection {
        if self.descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Parse `property[:operator]=value[,value...]` into a filter clause.
///
/// An empty input yields `FilterClause::default()` without error; callers
/// should check [`FilterClause::is_empty`] before attaching it to a request.
pub fn parse_filter_clause(raw: &str) -> Result<FilterClause, FilterParseError> {
    if raw.is_empty() {
        return Ok(FilterClause::default());
    }

    let (left, value) = raw
        .split_once('=')
        .ok_or(FilterParseError::MissingValue)?;
    if value.is_empty() {
        return Err(FilterParseError::MissingValue);
    }

    let (property, operator) = match left.split_once(':') {
        Some((property, operator)) => (property, Some(operator)),
        None => (left, None),
    };

    if property.is_empty() {
        return Err(FilterParseError::MissingProperty);
    }

    let operator = match operator {
        None => infer_operator(value),
        Some("") => return Err(FilterParseError::MissingOperator),
        Some(op) => op.parse()?,
    };

    Ok(FilterClause::new(property, operator, split_values(value)))
}

/// Parse `property[:desc]` into a sort clause. Never fails.
pub fn parse_sort_clause(raw: &str) -> SortClause {
    let mut parts = raw.split(':');
    let property = parts.next().unwrap_or_default().to_string();
    let descending = parts
        .next()
        .map(|d| SortDirection::parse(d) == SortDirection::Desc)
        .unwrap_or(false);

    SortClause {
        property,
        descending,
    }
}

/// Build a clause from an already separated property/value pair, inferring
/// the operator from the value.
pub fn infer_filter_operator(property: &str, value: &str) -> FilterClause {
    FilterClause::new(property, infer_operator(value), split_values(value))
}

/// `,` selects IN, `*` selects LK, anything else is EQ
pub fn infer_operator(value: &str) -> FilterOperator {
    if value.contains(',') {
        FilterOperator::In
    } else if value.contains('*') {
        FilterOperator::Lk
    } else {
        FilterOperator::Eq
    }
}

fn split_values(value: &str) -> Vec<String> {
    value.split(',').map(|v| v.trim().to_string()).collect()
}
