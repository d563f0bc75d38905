//! Filter tree types.
//!
//! A filter is a nested AND/OR tree over single-field leaves. Trees are
//! ephemeral: built per call from caller input, compiled once, discarded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar filter/cursor value.
///
/// Deliberately limited to the JSON scalars a transport layer produces;
/// the backend coerces them to column types at bind time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Bool(v)
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Int(v)
    }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        ScalarValue::Int(i64::from(v))
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Float(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::String(v.to_owned())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::String(v)
    }
}

/// Value attached to a filter leaf: a scalar, or a list for the set
/// operators (`in`, `notIn`).
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Scalar(ScalarValue),
    List(Vec<ScalarValue>),
}

impl From<ScalarValue> for FilterValue {
    fn from(v: ScalarValue) -> Self {
        FilterValue::Scalar(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Scalar(v.into())
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Scalar(v.into())
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        FilterValue::Scalar(v.into())
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Scalar(v.into())
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Scalar(v.into())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Scalar(v.into())
    }
}

impl From<Vec<ScalarValue>> for FilterValue {
    fn from(v: Vec<ScalarValue>) -> Self {
        FilterValue::List(v)
    }
}

impl FilterValue {
    /// The scalar inside, unless this is a list.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            FilterValue::Scalar(v) => Some(v),
            FilterValue::List(_) => None,
        }
    }
}

/// Leaf operators supported in filter trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    /// Equality: `field = value`
    Is,
    /// Negated equality: `field != value`
    Not,
    /// Set membership: `field IN (…)`
    In,
    /// Negated set membership: `field NOT IN (…)`
    NotIn,
    Lt,
    Lte,
    Gt,
    Gte,
    /// Case-insensitive substring match.
    Contains,
    NotContains,
    /// Case-insensitive prefix match.
    StartsWith,
    NotStartsWith,
    /// Case-insensitive suffix match.
    EndsWith,
    NotEndsWith,
    /// Whitespace-tokenizing multi-term wildcard match. Compiles to
    /// nothing for empty or oversized input.
    Search,
}

impl FilterOp {
    /// API-visible operator name, as it appears in filter input.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FilterOp::Is => "is",
            FilterOp::Not => "not",
            FilterOp::In => "in",
            FilterOp::NotIn => "notIn",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Contains => "contains",
            FilterOp::NotContains => "notContains",
            FilterOp::StartsWith => "startsWith",
            FilterOp::NotStartsWith => "notStartsWith",
            FilterOp::EndsWith => "endsWith",
            FilterOp::NotEndsWith => "notEndsWith",
            FilterOp::Search => "search",
        }
    }

    /// Resolve an operator by its API name.
    ///
    /// Unknown names resolve to `None`. Boundaries that build trees from
    /// loosely-typed input drop such leaves instead of failing: an operator
    /// this engine does not know yet is a forward-compatible no-op, never
    /// an error.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "is" => Some(FilterOp::Is),
            "not" => Some(FilterOp::Not),
            "in" => Some(FilterOp::In),
            "notIn" => Some(FilterOp::NotIn),
            "lt" => Some(FilterOp::Lt),
            "lte" => Some(FilterOp::Lte),
            "gt" => Some(FilterOp::Gt),
            "gte" => Some(FilterOp::Gte),
            "contains" => Some(FilterOp::Contains),
            "notContains" => Some(FilterOp::NotContains),
            "startsWith" => Some(FilterOp::StartsWith),
            "notStartsWith" => Some(FilterOp::NotStartsWith),
            "endsWith" => Some(FilterOp::EndsWith),
            "notEndsWith" => Some(FilterOp::NotEndsWith),
            "search" => Some(FilterOp::Search),
            _ => None,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Filter AST node.
///
/// Nesting depth is unbounded; compilation wraps each composite in its own
/// group so regrouping (`And([And([a,b]),c])` vs `And([a,b,c])`) cannot
/// change meaning under outer composition.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterNode {
    /// Every child must match.
    And(Vec<FilterNode>),
    /// At least one child must match.
    Or(Vec<FilterNode>),
    /// Single-field comparison.
    Leaf {
        field: String,
        op: FilterOp,
        value: FilterValue,
    },
}

impl FilterNode {
    /// Create an AND composite node.
    #[must_use]
    pub fn and(children: Vec<FilterNode>) -> Self {
        FilterNode::And(children)
    }

    /// Create an OR composite node.
    #[must_use]
    pub fn or(children: Vec<FilterNode>) -> Self {
        FilterNode::Or(children)
    }

    /// Create a leaf comparison node.
    pub fn leaf(field: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        FilterNode::Leaf {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}
