//! Pagination arguments and intent resolution.

use crate::filter::FilterNode;
use crate::Error;

/// Display-order paging direction.
///
/// Backward ("last N") pages are *fetched* in the opposite physical order
/// and reversed in memory before edges are returned, so the external
/// direction and the query direction are not the same thing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Reverse the direction (Forward <-> Backward).
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Raw connection arguments as supplied by the caller.
///
/// `first`/`last` are signed so out-of-range input reaches validation
/// instead of failing at the type boundary; zero counts as absent.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct ConnectionArgs {
    pub first: Option<i64>,
    pub last: Option<i64>,
    pub after: Option<String>,
    pub before: Option<String>,
    /// Reverses the sorting of elements.
    pub reverse: bool,
    /// Sort list by the given key instead of creation order.
    pub sort_key: Option<String>,
    pub filter: Option<FilterNode>,
}

impl ConnectionArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first(mut self, first: i64) -> Self {
        self.first = Some(first);
        self
    }

    pub fn with_last(mut self, last: i64) -> Self {
        self.last = Some(last);
        self
    }

    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_sort_key(mut self, sort_key: impl Into<String>) -> Self {
        self.sort_key = Some(sort_key.into());
        self
    }

    pub fn with_filter(mut self, filter: FilterNode) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Validated pagination intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaginationMeta {
    Forward { first: u64, after: Option<String> },
    Backward { last: u64, before: String },
}

impl PaginationMeta {
    #[must_use]
    pub fn direction(&self) -> Direction {
        match self {
            PaginationMeta::Forward { .. } => Direction::Forward,
            PaginationMeta::Backward { .. } => Direction::Backward,
        }
    }
}

/// Validate connection arguments and resolve the paging direction.
///
/// Exactly one of `{first, optionally after}` or `{last, before}` must
/// hold. Checks run in a fixed order so conflicting input always maps to
/// the same error.
///
/// # Errors
/// - [`Error::InvalidPaginationArgument`] when neither `first` nor `last`
///   is given, when cursor arguments are mixed across directions, or when
///   `last` comes without `before`.
/// - [`Error::InvalidPagination`] when both directions are requested at
///   once or a page size is negative.
pub fn parse_pagination(args: &ConnectionArgs) -> Result<PaginationMeta, Error> {
    let first = args.first.unwrap_or(0);
    let last = args.last.unwrap_or(0);

    if first == 0 && last == 0 {
        return Err(Error::InvalidPaginationArgument(
            "you must provide one of first or last".to_owned(),
        ));
    }

    let forward = first != 0 || args.after.is_some();
    let backward = last != 0 || args.before.is_some();

    if forward && backward {
        return Err(Error::InvalidPagination(
            "cannot paginate forward and backward at the same time".to_owned(),
        ));
    }

    if (forward && args.before.is_some()) || (backward && args.after.is_some()) {
        return Err(Error::InvalidPaginationArgument(
            "must use either first/after or last/before".to_owned(),
        ));
    }

    if forward {
        let first = u64::try_from(first)
            .map_err(|_| Error::InvalidPagination("pagination must be positive".to_owned()))?;
        return Ok(PaginationMeta::Forward {
            first,
            after: args.after.clone(),
        });
    }

    let last = u64::try_from(last)
        .map_err(|_| Error::InvalidPagination("pagination must be positive".to_owned()))?;
    let Some(before) = args.before.clone() else {
        return Err(Error::InvalidPaginationArgument(
            "when paginating backwards, a \"before\" argument is required".to_owned(),
        ));
    };
    Ok(PaginationMeta::Backward { last, before })
}
