//! Connection assembler: the only component that talks to the store.

use relaykit::{
    Connection, ConnectionArgs, Cursor, Direction, Edge, Error, PageInfo, ScalarValue,
};
use sea_orm::{
    sea_query::NullOrdering, Condition, ConnectionTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use crate::fields::{ConnectionEntity, FieldMap, ARCHIVED_COLUMN, DEFAULT_SORT_KEY, SEQUENCE_COLUMN};
use crate::filter::{col, col_expr, filter_condition};
use crate::pagination::{resolve_pagination, Pagination};

/// Execute a connection query and assemble the page.
///
/// `select` is the caller's base query; the archived exclusion, the user
/// filter, the keyset boundary, ordering and the limit are layered on top.
/// Rows fetched for a backward page come back in reverse physical order
/// (a bounded scan from the tail) and are flipped in memory, so edges are
/// always returned in the display's natural forward order. `map` converts
/// each row into the caller's node type.
///
/// The query itself issues no writes and holds no state across calls; the
/// two store round trips (count, fetch) are the only suspension points.
///
/// # Errors
/// - Argument, sort-key and cursor errors from [`resolve_pagination`].
/// - [`Error::UnknownField`] from filter compilation.
/// - [`Error::InvalidSortKey`] when a non-default sort key is not
///   projectable on the returned rows.
/// - [`Error::Db`] wrapping backing-store failures, surfaced verbatim.
pub async fn create_cursor_connection<E, C, D, F>(
    select: Select<E>,
    conn: &C,
    args: &ConnectionArgs,
    fields: &FieldMap,
    map: F,
) -> Result<Connection<D>, Error>
where
    E: ConnectionEntity,
    E::Model: Send + Sync,
    C: ConnectionTrait,
    F: Fn(E::Model) -> D,
{
    let Pagination {
        limit,
        sort_column,
        direction,
        boundary,
    } = resolve_pagination(args, fields)?;

    // Archived rows never leave the store; this clause is not
    // user-overridable.
    let mut base = Condition::all().add(col(ARCHIVED_COLUMN).eq(false));
    if let Some(filter) = &args.filter {
        base = base.add(filter_condition(filter, fields)?);
    }

    // The count shares `base` with the row fetch and ignores boundary and
    // limit: totalCount reflects all filter matches, and the page flags
    // below require both queries to see the same predicate.
    let total_count = select
        .clone()
        .filter(base.clone())
        .count(conn)
        .await
        .map_err(|e| Error::Db(e.to_string()))?;

    let fetch_direction = if args.reverse {
        direction.reverse()
    } else {
        direction
    };
    let order = match fetch_direction {
        Direction::Forward => Order::Asc,
        Direction::Backward => Order::Desc,
    };

    tracing::debug!(?direction, ?limit, sort_column = %sort_column, "executing connection query");

    let mut query = select.filter(base);
    if let Some(boundary) = boundary {
        query = query.filter(boundary);
    }
    let mut rows = query
        .order_by_with_nulls(col_expr(&sort_column), order.clone(), NullOrdering::Last)
        .order_by(col_expr(SEQUENCE_COLUMN), order)
        .limit(limit)
        .all(conn)
        .await
        .map_err(|e| Error::Db(e.to_string()))?;

    // A sort key can exist in metadata yet not be projectable on this row
    // type; catch that before handing out cursors that could never anchor.
    let sort_key = args.sort_key.as_deref().unwrap_or(DEFAULT_SORT_KEY);
    if sort_key != DEFAULT_SORT_KEY {
        if let Some(first_row) = rows.first() {
            if E::sort_value(first_row, sort_key).is_none() {
                return Err(Error::InvalidSortKey);
            }
        }
    }

    if direction == Direction::Backward {
        rows.reverse();
    }

    let returned = rows.len() as u64;
    let mut edges = Vec::with_capacity(rows.len());
    for model in rows {
        let cursor = model_cursor::<E>(&model, sort_key)?;
        edges.push(Edge {
            node: map(model),
            cursor,
        });
    }

    let has_next_page = args.first.unwrap_or(0) != 0 && total_count > returned;
    let has_previous_page = args.last.unwrap_or(0) != 0 && total_count > returned;

    Ok(Connection {
        total_count,
        page_info: PageInfo {
            has_next_page,
            has_previous_page,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
            count: returned,
        },
        edges,
    })
}

fn model_cursor<E: ConnectionEntity>(model: &E::Model, sort_key: &str) -> Result<String, Error> {
    let primary = E::sequence_id(model);
    let secondary = E::sort_value(model, sort_key).unwrap_or(ScalarValue::Int(primary));
    Cursor::new(primary, secondary, sort_key)
        .encode()
        .map_err(|_| Error::InvalidCursor)
}
