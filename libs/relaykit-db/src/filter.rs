//! Filter tree → `sea_orm::Condition` compiler (AST in, SQL out).
//!
//! Pure transform: no store access, no state. Every value is bound through
//! sea-query's positional parameters, so repeated use of the same field or
//! operator across branches can never collide on a bind name.

use relaykit::{Error, FilterNode, FilterOp, FilterValue, ScalarValue};
use sea_orm::{
    sea_query::{Alias, Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr},
    Condition,
};

use crate::fields::FieldMap;

/// Longest `search` input that still compiles to a predicate. Anything
/// longer is a no-op, which bounds worst-case pattern cost and blocks
/// wildcard stuffing through oversized input.
pub const SEARCH_LENGTH_LIMIT: usize = 2000;

/// Compile a filter tree into a condition composable with other predicates
/// under AND.
///
/// `And`/`Or` nodes become their own condition groups, so regrouping a tree
/// never changes its meaning under outer composition. A `search` leaf with
/// empty or oversized input compiles to an empty (always-true) group rather
/// than failing.
///
/// # Errors
/// Returns [`Error::UnknownField`] when a leaf names a field absent from
/// the entity metadata.
pub fn filter_condition(node: &FilterNode, fields: &FieldMap) -> Result<Condition, Error> {
    match node {
        FilterNode::And(children) => {
            let mut cond = Condition::all();
            for child in children {
                cond = cond.add(filter_condition(child, fields)?);
            }
            Ok(cond)
        }
        FilterNode::Or(children) => {
            let mut cond = Condition::any();
            for child in children {
                cond = cond.add(filter_condition(child, fields)?);
            }
            Ok(cond)
        }
        FilterNode::Leaf { field, op, value } => {
            let def = fields
                .get(field)
                .ok_or_else(|| Error::UnknownField(field.clone()))?;
            Ok(leaf_condition(&def.column, *op, value))
        }
    }
}

fn leaf_condition(column: &str, op: FilterOp, value: &FilterValue) -> Condition {
    match op {
        FilterOp::Is => match value.as_scalar() {
            Some(ScalarValue::Null) => Condition::all().add(col(column).is_null()),
            Some(v) => Condition::all().add(col(column).eq(scalar_to_sea(v))),
            None => Condition::all(),
        },
        FilterOp::Not => match value.as_scalar() {
            Some(ScalarValue::Null) => Condition::all().add(col(column).is_not_null()),
            Some(v) => Condition::all().add(col(column).ne(scalar_to_sea(v))),
            None => Condition::all(),
        },
        FilterOp::In => {
            let vals = set_values(value);
            if vals.is_empty() {
                // IN () → always false
                deny_all()
            } else {
                Condition::all().add(col(column).is_in(vals))
            }
        }
        FilterOp::NotIn => {
            let vals = set_values(value);
            if vals.is_empty() {
                Condition::all()
            } else {
                Condition::all().add(col(column).is_not_in(vals))
            }
        }
        FilterOp::Lt => ordered(column, value, |c, v| c.lt(v)),
        FilterOp::Lte => ordered(column, value, |c, v| c.lte(v)),
        FilterOp::Gt => ordered(column, value, |c, v| c.gt(v)),
        FilterOp::Gte => ordered(column, value, |c, v| c.gte(v)),
        FilterOp::Contains => pattern(column, value, like_contains, false),
        FilterOp::NotContains => pattern(column, value, like_contains, true),
        FilterOp::StartsWith => pattern(column, value, like_starts, false),
        FilterOp::NotStartsWith => pattern(column, value, like_starts, true),
        FilterOp::EndsWith => pattern(column, value, like_ends, false),
        FilterOp::NotEndsWith => pattern(column, value, like_ends, true),
        FilterOp::Search => search_condition(column, value),
    }
}

/// Ordered comparison. Comparing against null can never be true in SQL, so
/// a null operand compiles to an always-false group instead of a bind.
fn ordered(
    column: &str,
    value: &FilterValue,
    cmp: impl FnOnce(Expr, sea_orm::Value) -> SimpleExpr,
) -> Condition {
    match value.as_scalar() {
        Some(ScalarValue::Null) | None => deny_all(),
        Some(v) => Condition::all().add(cmp(col(column), scalar_to_sea(v))),
    }
}

/// Case-insensitive LIKE against a shaped pattern, optionally negated.
fn pattern(
    column: &str,
    value: &FilterValue,
    shape: fn(&str) -> String,
    negated: bool,
) -> Condition {
    let Some(term) = pattern_term(value) else {
        return Condition::all();
    };
    let pat = like_pattern(&shape(&term));
    let lowered = Expr::expr(Func::lower(col(column)));
    let expr = if negated {
        lowered.not_like(pat)
    } else {
        lowered.like(pat)
    };
    Condition::all().add(expr)
}

/// `search`: whitespace tokens joined into one `%t1%t2%…%` pattern, each
/// token escaped. Empty, whitespace-only, and oversized input compile to
/// nothing — deliberately a no-op, never an error.
fn search_condition(column: &str, value: &FilterValue) -> Condition {
    let Some(term) = pattern_term(value) else {
        return Condition::all();
    };
    if term.trim().is_empty() || term.len() > SEARCH_LENGTH_LIMIT {
        return Condition::all();
    }
    let tokens: Vec<String> = term.split_whitespace().map(like_escape).collect();
    let pat = like_pattern(&format!("%{}%", tokens.join("%")));
    Condition::all().add(Expr::expr(Func::lower(col(column))).like(pat))
}

/* ---------- LIKE helpers ---------- */

// The ESCAPE clause is spelled out because not every backend (SQLite) has a
// default escape character.
fn like_pattern(pat: &str) -> LikeExpr {
    LikeExpr::new(pat.to_lowercase()).escape('\\')
}

fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c => out.push(c),
        }
    }
    out
}

fn like_contains(s: &str) -> String {
    format!("%{}%", like_escape(s))
}

fn like_starts(s: &str) -> String {
    format!("{}%", like_escape(s))
}

fn like_ends(s: &str) -> String {
    format!("%{}", like_escape(s))
}

/* ---------- value plumbing ---------- */

/// Set operand for `in`/`notIn`. A bare scalar coerces to a one-element
/// set; nulls inside the set are dropped.
fn set_values(value: &FilterValue) -> Vec<sea_orm::Value> {
    let items: &[ScalarValue] = match value {
        FilterValue::List(items) => items,
        FilterValue::Scalar(v) => std::slice::from_ref(v),
    };
    items
        .iter()
        .filter(|v| !matches!(v, ScalarValue::Null))
        .map(scalar_to_sea)
        .collect()
}

/// Text form of a scalar for LIKE shaping; `None` for null or list input,
/// which makes the enclosing leaf a no-op.
fn pattern_term(value: &FilterValue) -> Option<String> {
    match value.as_scalar()? {
        ScalarValue::Null => None,
        ScalarValue::Bool(b) => Some(b.to_string()),
        ScalarValue::Int(i) => Some(i.to_string()),
        ScalarValue::Float(f) => Some(f.to_string()),
        ScalarValue::String(s) => Some(s.clone()),
    }
}

pub(crate) fn scalar_to_sea(v: &ScalarValue) -> sea_orm::Value {
    match v {
        ScalarValue::Null => sea_orm::Value::BigInt(None),
        ScalarValue::Bool(b) => sea_orm::Value::Bool(Some(*b)),
        ScalarValue::Int(i) => sea_orm::Value::BigInt(Some(*i)),
        ScalarValue::Float(f) => sea_orm::Value::Double(Some(*f)),
        ScalarValue::String(s) => sea_orm::Value::String(Some(Box::new(s.clone()))),
    }
}

pub(crate) fn col(column: &str) -> Expr {
    Expr::col(Alias::new(column))
}

pub(crate) fn col_expr(column: &str) -> SimpleExpr {
    SimpleExpr::Column(Alias::new(column).into_column_ref())
}

fn deny_all() -> Condition {
    Condition::all().add(Expr::cust("1=0"))
}
