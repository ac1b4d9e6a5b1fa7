use crate::error::check_rc;
use crate::{Connection, Error, Result};
use std::ffi::{CStr, c_int};
use std::marker::PhantomData;

/// A compiled statement, it can not outlive the connection it was prepared on
pub struct Statement<'conn> {
    pub(crate) stmt: *mut libsqlite3_sys::sqlite3_stmt,
    completed: bool,
    _conn: PhantomData<&'conn Connection>,
}

impl Statement<'_> {
    pub(crate) fn new(stmt: *mut libsqlite3_sys::sqlite3_stmt) -> Self {
        Self {
            stmt,
            completed: false,
            _conn: PhantomData,
        }
    }

    /// Advances a statement that produces no result set (INSERT, UPDATE, DELETE, DDL)
    /// Any outcome other than completion, a result row included, is a failure
    pub fn step_done(&mut self) -> Result<()> {
        check_rc(self.step()?, libsqlite3_sys::SQLITE_DONE)
    }

    /// Advances to the next result row, returns false once the statement completed
    pub fn step_row(&mut self) -> Result<bool> {
        match self.step()? {
            libsqlite3_sys::SQLITE_ROW => Ok(true),
            libsqlite3_sys::SQLITE_DONE => Ok(false),
            rc => Err(Error::from_code(rc)),
        }
    }

    /// A completed statement has to be reset before it can be stepped again
    fn step(&mut self) -> Result<c_int> {
        if self.completed {
            return Err(Error::from_code(libsqlite3_sys::SQLITE_MISUSE));
        }

        let rc = unsafe { libsqlite3_sys::sqlite3_step(self.stmt) };
        match rc {
            libsqlite3_sys::SQLITE_DONE => self.completed = true,
            libsqlite3_sys::SQLITE_ROW => {}
            _ => log::debug!("Step failed: {}", self.error_message()),
        }
        Ok(rc)
    }

    /// Rewinds the statement so it can be stepped again, bindings are retained
    pub fn reset(&mut self) -> Result<()> {
        self.completed = false;
        check_rc(unsafe { libsqlite3_sys::sqlite3_reset(self.stmt) }, libsqlite3_sys::SQLITE_OK)
    }

    /// Sets all parameters back to NULL
    pub fn clear_bindings(&mut self) -> Result<()> {
        check_rc(
            unsafe { libsqlite3_sys::sqlite3_clear_bindings(self.stmt) },
            libsqlite3_sys::SQLITE_OK,
        )
    }

    pub fn finalize(mut self) -> Result<()> {
        let rc = unsafe { libsqlite3_sys::sqlite3_finalize(self.stmt) };
        self.stmt = std::ptr::null_mut();
        check_rc(rc, libsqlite3_sys::SQLITE_OK)
    }

    pub fn parameter_count(&self) -> c_int {
        unsafe { libsqlite3_sys::sqlite3_bind_parameter_count(self.stmt) }
    }

    pub fn column_count(&self) -> c_int {
        unsafe { libsqlite3_sys::sqlite3_column_count(self.stmt) }
    }

    pub fn column_name(&self, index: c_int) -> Option<&str> {
        let name = unsafe { libsqlite3_sys::sqlite3_column_name(self.stmt, index) };
        if name.is_null() {
            return None;
        }

        unsafe { CStr::from_ptr(name) }.to_str().ok()
    }

    fn error_message(&self) -> String {
        let error_message = unsafe { libsqlite3_sys::sqlite3_errmsg(libsqlite3_sys::sqlite3_db_handle(self.stmt)) };
        if error_message.is_null() {
            return String::new();
        }

        let c_str = unsafe { CStr::from_ptr(error_message) };
        c_str.to_string_lossy().into_owned()
    }
}

impl Drop for Statement<'_> {
    fn drop(&mut self) {
        if self.stmt.is_null() {
            return;
        }

        // A non OK code here repeats the error of the last failed step
        let rc = unsafe { libsqlite3_sys::sqlite3_finalize(self.stmt) };
        if rc != libsqlite3_sys::SQLITE_OK {
            log::debug!("Finalize on drop: {}", Error::from_code(rc));
        }
    }
}
