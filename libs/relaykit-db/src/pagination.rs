//! Sort-key resolution and the keyset boundary predicate.

use relaykit::{parse_pagination, ConnectionArgs, Cursor, Direction, Error, PaginationMeta};
use sea_orm::Condition;

use crate::fields::{FieldMap, DEFAULT_SORT_KEY, SEQUENCE_COLUMN};
use crate::filter::{col, scalar_to_sea};

/// Fully resolved paging plan for one connection query.
#[derive(Clone, Debug)]
pub struct Pagination {
    /// Page size; `None` when the caller asked for an unbounded page.
    pub limit: Option<u64>,
    /// Storage column of the effective sort key.
    pub sort_column: String,
    pub direction: Direction,
    /// Keyset predicate anchored at the boundary cursor, when one was
    /// supplied.
    pub boundary: Option<Condition>,
}

/// Validate connection arguments against the entity metadata and resolve
/// direction, limit, sort column and the boundary predicate.
///
/// # Errors
/// - Argument validation errors from [`parse_pagination`].
/// - [`Error::InvalidSortKey`] when the requested sort key is unknown or
///   not sort-eligible.
/// - [`Error::InvalidCursor`] when the boundary cursor does not decode.
/// - [`Error::CursorNotMatchingSort`] when the boundary cursor was issued
///   under a different sort key than the effective one.
pub fn resolve_pagination(args: &ConnectionArgs, fields: &FieldMap) -> Result<Pagination, Error> {
    let meta = parse_pagination(args)?;
    let sort_key = args.sort_key.as_deref().unwrap_or(DEFAULT_SORT_KEY);
    let sort_column = fields.sort_column(sort_key)?.to_owned();

    let direction = meta.direction();
    let (limit, cursor) = match meta {
        PaginationMeta::Forward { first, after } => (first, after),
        PaginationMeta::Backward { last, before } => (last, Some(before)),
    };

    let boundary = cursor
        .map(|token| boundary_condition(&token, sort_key, &sort_column, direction))
        .transpose()?;

    Ok(Pagination {
        limit: (limit > 0).then_some(limit),
        sort_column,
        direction,
        boundary,
    })
}

/// Keyset boundary: the row tuple `(sort, sequence)` must compare strictly
/// beyond the cursor tuple `(secondary, primary)` in lexicographic order.
/// The sequence id breaks ties, so the order stays strict and total even
/// when many rows share the same sort value.
fn boundary_condition(
    token: &str,
    sort_key: &str,
    sort_column: &str,
    direction: Direction,
) -> Result<Condition, Error> {
    let cursor = Cursor::decode(token)?;
    if cursor.sort_key != sort_key {
        return Err(Error::CursorNotMatchingSort);
    }

    let secondary = scalar_to_sea(&cursor.secondary);

    // forward:  sort > s OR (sort = s AND seq > p)
    // backward: sort < s OR (sort = s AND seq < p)
    let cond = match direction {
        Direction::Forward => Condition::any()
            .add(col(sort_column).gt(secondary.clone()))
            .add(
                Condition::all()
                    .add(col(sort_column).eq(secondary))
                    .add(col(SEQUENCE_COLUMN).gt(cursor.primary)),
            ),
        Direction::Backward => Condition::any()
            .add(col(sort_column).lt(secondary.clone()))
            .add(
                Condition::all()
                    .add(col(sort_column).eq(secondary))
                    .add(col(SEQUENCE_COLUMN).lt(cursor.primary)),
            ),
    };
    Ok(cond)
}
