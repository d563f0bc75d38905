//! Connection result types.

use serde::Serialize;

/// Position and reachability of the current page, in accordance with the
/// GraphQL connection conventions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Only meaningful when paginating with `first`: true when elements
    /// exist after the current page.
    pub has_next_page: bool,
    /// Only meaningful when paginating with `last`: true when elements
    /// exist before the current page.
    pub has_previous_page: bool,
    /// Cursor of the first element in the list.
    pub start_cursor: Option<String>,
    /// Cursor of the last element in the list.
    pub end_cursor: Option<String>,
    /// Number of elements in the current page.
    pub count: u64,
}

/// One returned record plus the cursor that re-anchors pagination at it.
#[derive(Clone, Debug, Serialize)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

/// A page of results with pagination metadata.
///
/// `total_count` reflects all records matching the filter, not the window
/// size; edges are always in display order regardless of paging direction.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub total_count: u64,
    pub page_info: PageInfo,
    pub edges: Vec<Edge<T>>,
}
