//! SeaORM execution backend for relaykit connection queries.
//!
//! This crate turns the backend-agnostic types from `relaykit` into real
//! queries:
//! - `fields`: per-entity metadata table (field name → storage column) and
//!   the row-projection trait connection queries need from an entity
//! - `filter`: filter tree → `sea_orm::Condition` compiler
//! - `pagination`: sort-key resolution and the keyset boundary predicate
//! - `connection`: the connection assembler, the only place that talks to
//!   the store
//! - `aggregate`: per-value row counts for a single field

pub mod aggregate;
pub mod connection;
pub mod fields;
pub mod filter;
pub mod pagination;

pub use aggregate::field_value_counts;
pub use connection::create_cursor_connection;
pub use fields::{
    ConnectionEntity, FieldDef, FieldMap, ARCHIVED_COLUMN, DEFAULT_SORT_KEY, SEQUENCE_COLUMN,
};
pub use filter::{filter_condition, SEARCH_LENGTH_LIMIT};
pub use pagination::{resolve_pagination, Pagination};
