//! A typed access layer on top of the sqlite3-sys crate
//! Every engine outcome code is mapped to a single [`Error`] type, parameters are bound by
//! 1-based position and column values are extracted by 0-based position with explicit null handling.
//! Query building, migrations, pooling and statement caching are out of scope, use rusqlite or sqlx for that.

mod bind;
mod column;
mod connection;
mod error;
mod flags;
mod statement;
mod value;

/// Convenience mapping to the most common open flag combinations
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
    Create,
}

/// How a connection is released
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CloseMode {
    /// `sqlite3_close`: fails with `SQLITE_BUSY` while engine resources are still in use
    #[default]
    Graceful,
    /// `sqlite3_close_v2`: the handle becomes a zombie that is released once outstanding resources are gone
    Forceful,
}

pub use connection::Connection;
pub use error::{Error, Result, error_string};
pub use flags::OpenFlags;
pub use statement::Statement;
pub use value::{BoundParameter, ColumnType, ParamValue, Value};
