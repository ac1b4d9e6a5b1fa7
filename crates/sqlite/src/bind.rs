//! Parameter binding, positions are 1-based and passed to the engine unchecked.
//! Text and blob buffers are copied by the engine (`SQLITE_TRANSIENT`) so the caller's buffer
//! does not have to outlive the call.

use crate::error::check_rc;
use crate::{BoundParameter, Error, ParamValue, Result, Statement};
use std::ffi::{c_double, c_int, c_longlong};

impl Statement<'_> {
    pub fn bind_text(&mut self, index: c_int, value: &str) -> Result<()> {
        let len = buffer_len(value.len())?;
        self.check_bind(unsafe {
            libsqlite3_sys::sqlite3_bind_text(
                self.stmt,
                index,
                value.as_ptr().cast::<std::ffi::c_char>(),
                len,
                libsqlite3_sys::SQLITE_TRANSIENT(),
            )
        })
    }

    /// Binds the text when present, SQL NULL otherwise
    pub fn bind_text_nullable(&mut self, index: c_int, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.bind_text(index, value),
            None => self.bind_null(index),
        }
    }

    pub fn bind_int64(&mut self, index: c_int, value: c_longlong) -> Result<()> {
        self.check_bind(unsafe { libsqlite3_sys::sqlite3_bind_int64(self.stmt, index, value) })
    }

    pub fn bind_double(&mut self, index: c_int, value: c_double) -> Result<()> {
        self.check_bind(unsafe { libsqlite3_sys::sqlite3_bind_double(self.stmt, index, value) })
    }

    /// An empty slice is bound as a zero-length blob, never as NULL
    pub fn bind_blob(&mut self, index: c_int, value: &[u8]) -> Result<()> {
        if value.is_empty() {
            return self.check_bind(unsafe { libsqlite3_sys::sqlite3_bind_zeroblob(self.stmt, index, 0) });
        }

        let len = buffer_len(value.len())?;
        self.check_bind(unsafe {
            libsqlite3_sys::sqlite3_bind_blob(
                self.stmt,
                index,
                value.as_ptr().cast::<std::ffi::c_void>(),
                len,
                libsqlite3_sys::SQLITE_TRANSIENT(),
            )
        })
    }

    pub fn bind_null(&mut self, index: c_int) -> Result<()> {
        self.check_bind(unsafe { libsqlite3_sys::sqlite3_bind_null(self.stmt, index) })
    }

    pub fn bind(&mut self, parameter: &BoundParameter) -> Result<()> {
        let index = parameter.position;
        match &parameter.value {
            ParamValue::TextNullable(value) => self.bind_text_nullable(index, value.as_deref()),
            ParamValue::Text(value) => self.bind_text(index, value),
            ParamValue::Int64(value) => self.bind_int64(index, *value),
            ParamValue::Double(value) => self.bind_double(index, *value),
            ParamValue::Blob(value) => self.bind_blob(index, value),
        }
    }

    /// Binds the parameters in order, the first failure aborts and is returned
    /// Parameters bound before the failure stay bound
    pub fn bind_all(&mut self, parameters: &[BoundParameter]) -> Result<()> {
        for parameter in parameters {
            self.bind(parameter)?;
        }
        Ok(())
    }

    fn check_bind(&self, rc: c_int) -> Result<()> {
        check_rc(rc, libsqlite3_sys::SQLITE_OK)
    }
}

fn buffer_len(len: usize) -> Result<c_int> {
    c_int::try_from(len).map_err(|_| Error::from_code(libsqlite3_sys::SQLITE_TOOBIG))
}
