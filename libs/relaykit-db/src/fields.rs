//! Entity metadata: API-visible field names → storage columns.

use std::collections::HashMap;

use relaykit::{Error, ScalarValue};
use sea_orm::EntityTrait;

/// Default sort key: the monotonically increasing creation-order id every
/// record carries.
pub const DEFAULT_SORT_KEY: &str = "sequenceId";

/// Storage column backing the default sort key.
pub const SEQUENCE_COLUMN: &str = "sequence_id";

/// Soft-delete marker column. Rows with `archived = true` never leave the
/// store through a connection query; the exclusion is not user-overridable.
pub const ARCHIVED_COLUMN: &str = "archived";

/// One registered field.
#[derive(Clone, Debug)]
pub struct FieldDef {
    pub column: String,
    pub sortable: bool,
}

/// Statically registered metadata table for one entity type.
///
/// Maps API-visible field names to storage columns and records sort-key
/// eligibility. Built once at startup and passed by reference into each
/// call. Lookup is exact-case: field names are the same strings cursors
/// embed as their sort-key name.
#[derive(Clone, Debug)]
#[must_use]
pub struct FieldMap {
    map: HashMap<String, FieldDef>,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMap {
    /// Create a map with the default sort key pre-registered.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
        .insert(DEFAULT_SORT_KEY, SEQUENCE_COLUMN)
    }

    /// Register a filterable field that is also eligible as a sort key.
    pub fn insert(mut self, name: impl Into<String>, column: impl Into<String>) -> Self {
        self.map.insert(
            name.into(),
            FieldDef {
                column: column.into(),
                sortable: true,
            },
        );
        self
    }

    /// Register a field usable in filters but not as a sort key.
    pub fn insert_filter_only(
        mut self,
        name: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        self.map.insert(
            name.into(),
            FieldDef {
                column: column.into(),
                sortable: false,
            },
        );
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.map.get(name)
    }

    /// Resolve the storage column for a sort key.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSortKey`] for unknown or filter-only fields.
    pub fn sort_column(&self, sort_key: &str) -> Result<&str, Error> {
        match self.map.get(sort_key) {
            Some(f) if f.sortable => Ok(&f.column),
            _ => Err(Error::InvalidSortKey),
        }
    }
}

/// Row projection a SeaORM entity must provide to flow through connection
/// queries.
///
/// `sort_value` feeds cursor construction and the sort-key projectability
/// guard: returning `None` for a non-default sort key fails the query with
/// [`Error::InvalidSortKey`] even when the key exists in metadata.
pub trait ConnectionEntity: EntityTrait {
    /// The record's immutable creation-order id.
    fn sequence_id(model: &Self::Model) -> i64;

    /// The row's value for `field`, or `None` when the field is not
    /// projectable on this row type.
    fn sort_value(model: &Self::Model, field: &str) -> Option<ScalarValue>;
}
