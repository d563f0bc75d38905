//! Relay-style connection core.
//!
//! Backend-agnostic building blocks for cursor-paginated "connection"
//! queries: pagination arguments and their validation, the nested AND/OR
//! filter tree, the opaque cursor codec, and the page/edge result types.
//! Executing a connection against a store lives in `relaykit-db`.

pub mod filter;
pub mod page;
pub mod pagination;

pub use filter::{FilterNode, FilterOp, FilterValue, ScalarValue};
pub use page::{Connection, Edge, PageInfo};
pub use pagination::{parse_pagination, ConnectionArgs, Direction, PaginationMeta};

/// Unified error type for connection queries.
///
/// Every variant is a caller-input error surfaced verbatim to the caller;
/// nothing here is retried internally. `Db` wraps backing-store failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required pagination argument is missing or arguments are mixed
    /// (e.g. `last` without `before`, or `first` combined with `before`).
    #[error("invalid pagination argument: {0}")]
    InvalidPaginationArgument(String),

    /// Pagination arguments conflict or are out of range.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// The requested sort key is unknown for the entity, not eligible for
    /// sorting, or not projectable on the returned rows.
    #[error("invalid sort key")]
    InvalidSortKey,

    /// The cursor token could not be decoded into a cursor payload.
    #[error("invalid cursor")]
    InvalidCursor,

    /// The cursor decoded fine but was issued under a different sort key.
    #[error("cursor does not match the current sort key")]
    CursorNotMatchingSort,

    /// A filter leaf names a field absent from the entity metadata.
    #[error("unknown filter field: {0}")]
    UnknownField(String),

    #[error("database error: {0}")]
    Db(String),
}

/// Opaque pagination cursor.
///
/// Binds a record's immutable sequence id (`primary`) to the value the
/// active sort key had when the cursor was issued (`secondary`), plus the
/// name of that sort key. A cursor is only meaningful under the sort key it
/// was issued for; [`Cursor::decode`] callers must check `sort_key` against
/// the effective sort key before using the payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Cursor {
    pub primary: i64,
    pub secondary: ScalarValue,
    pub sort_key: String,
}

impl Cursor {
    pub fn new(primary: i64, secondary: ScalarValue, sort_key: impl Into<String>) -> Self {
        Self {
            primary,
            secondary,
            sort_key: sort_key.into(),
        }
    }

    /// Encode the cursor to a base64url token.
    ///
    /// The token is an obfuscation boundary, not a security boundary. Its
    /// wire form (`{"v":1,"p":…,"s":…,"k":…}`) is stable across versions so
    /// outstanding client-held cursors keep working; `v` guards future
    /// revisions.
    ///
    /// # Errors
    /// Returns a JSON serialization error if encoding fails.
    pub fn encode(&self) -> serde_json::Result<String> {
        #[derive(serde::Serialize)]
        struct Wire<'a> {
            v: u8,
            p: i64,
            s: &'a ScalarValue,
            k: &'a str,
        }
        let w = Wire {
            v: 1,
            p: self.primary,
            s: &self.secondary,
            k: &self.sort_key,
        };
        serde_json::to_vec(&w).map(|x| base64_url::encode(&x))
    }

    /// Decode a cursor from a base64url token.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCursor`] if the token is not valid base64url,
    /// is not the canonical JSON payload, or carries an unsupported version.
    pub fn decode(token: &str) -> Result<Self, Error> {
        #[derive(serde::Deserialize)]
        struct Wire {
            v: u8,
            p: i64,
            s: ScalarValue,
            k: String,
        }
        let bytes = base64_url::decode(token).map_err(|_| Error::InvalidCursor)?;
        let w: Wire = serde_json::from_slice(&bytes).map_err(|_| Error::InvalidCursor)?;
        if w.v != 1 {
            return Err(Error::InvalidCursor);
        }
        Ok(Cursor {
            primary: w.p,
            secondary: w.s,
            sort_key: w.k,
        })
    }
}

// base64url helpers (no padding)
mod base64_url {
    use base64::Engine;

    pub fn encode(bytes: &[u8]) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
    }

    pub fn decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(s)
    }
}

#[cfg(test)]
mod tests;
