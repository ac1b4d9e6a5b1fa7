//! Typed access to the SQLite C API, see the [`sqlite`] crate

#[cfg(feature = "sqlite")]
#[doc(inline)]
pub use sqlite;
