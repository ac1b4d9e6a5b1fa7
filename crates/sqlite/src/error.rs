use std::ffi::{CStr, c_int};

use thiserror::Error;

use crate::ColumnType;

#[derive(Error, Debug)]
pub enum Error {
    /// The engine returned an outcome code other than the one the operation expects.
    #[error("SQLite3 failure: {code} {message}")]
    EngineFailure { code: c_int, message: String },
    #[error("Unexpected column type {0}")]
    UnexpectedColumnType(ColumnType),
    #[error("Unexpected null value")]
    UnexpectedNull,
    #[error("Blob data is empty")]
    EmptyData,
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(std::path::PathBuf),
    #[error("Invalid string: {0}")]
    InvalidString(#[from] std::ffi::NulError),
    #[error("Invalid utf-8 text: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}

impl Error {
    /// Maps an engine outcome code to an `EngineFailure`, the message comes from `sqlite3_errstr`
    pub fn from_code(code: c_int) -> Self {
        Error::EngineFailure {
            code,
            message: error_string(code),
        }
    }

    /// The raw engine outcome code for engine failures
    pub fn engine_code(&self) -> Option<c_int> {
        match self {
            Error::EngineFailure { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T = ()> = std::result::Result<T, Error>;

pub fn error_string(code: c_int) -> String {
    let msg = unsafe { libsqlite3_sys::sqlite3_errstr(code) };
    if msg.is_null() {
        return String::new();
    }

    unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
}

/// Succeeds when `rc` equals the outcome the caller expected
pub(crate) fn check_rc(rc: c_int, expected: c_int) -> Result<()> {
    if rc != expected {
        return Err(Error::from_code(rc));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_failure_message_comes_from_engine() {
        let err = Error::from_code(libsqlite3_sys::SQLITE_RANGE);
        assert_eq!(err.engine_code(), Some(libsqlite3_sys::SQLITE_RANGE));
        match &err {
            Error::EngineFailure { code, message } => {
                assert_eq!(*code, 25);
                assert_eq!(message, "column index out of range");
            }
            _ => panic!("Expected engine failure"),
        }

        assert_eq!(err.to_string(), "SQLite3 failure: 25 column index out of range");
    }

    #[test]
    fn check_rc_accepts_expected_code_only() {
        assert!(check_rc(libsqlite3_sys::SQLITE_DONE, libsqlite3_sys::SQLITE_DONE).is_ok());

        let err = check_rc(libsqlite3_sys::SQLITE_ROW, libsqlite3_sys::SQLITE_DONE).unwrap_err();
        assert_eq!(err.engine_code(), Some(libsqlite3_sys::SQLITE_ROW));
    }

    #[test]
    fn layer_errors_have_no_engine_code() {
        assert_eq!(Error::EmptyData.engine_code(), None);
        assert_eq!(Error::UnexpectedColumnType(ColumnType::Text).to_string(), "Unexpected column type TEXT");
    }
}
