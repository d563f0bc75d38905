//! Per-value aggregation over a single field.

use relaykit::Error;
use sea_orm::{
    sea_query::Expr, Condition, ConnectionTrait, Order, QueryFilter, QueryOrder, QuerySelect,
    TryGetable,
};

use crate::fields::{ConnectionEntity, FieldMap, ARCHIVED_COLUMN};
use crate::filter::{col, col_expr};

/// Count rows per distinct value of one field, archived rows excluded,
/// values ascending.
///
/// The value type `V` must match the storage column (`String` for text
/// columns, `i64` for integer columns, …).
///
/// # Errors
/// - [`Error::UnknownField`] when the field is absent from the metadata.
/// - [`Error::Db`] wrapping backing-store failures.
pub async fn field_value_counts<E, C, V>(
    conn: &C,
    fields: &FieldMap,
    field: &str,
) -> Result<Vec<(V, i64)>, Error>
where
    E: ConnectionEntity,
    C: ConnectionTrait,
    V: TryGetable,
{
    let def = fields
        .get(field)
        .ok_or_else(|| Error::UnknownField(field.to_owned()))?;

    E::find()
        .select_only()
        .expr_as(col_expr(&def.column), "value")
        .expr_as(Expr::asterisk().count(), "count")
        .filter(Condition::all().add(col(ARCHIVED_COLUMN).eq(false)))
        .group_by(col_expr(&def.column))
        .order_by(col_expr(&def.column), Order::Asc)
        .into_tuple::<(V, i64)>()
        .all(conn)
        .await
        .map_err(|e| Error::Db(e.to_string()))
}
