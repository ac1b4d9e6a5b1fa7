use crate::error::check_rc;
use crate::{AccessMode, CloseMode, Error, OpenFlags, Result, Statement};
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::path::Path;

unsafe extern "C" {
    // Not re-exported by libsqlite3-sys, the bundled engine still provides it
    fn sqlite3_close_v2(db: *mut libsqlite3_sys::sqlite3) -> c_int;
}

pub struct Connection {
    db: *mut libsqlite3_sys::sqlite3,
}

impl Connection {
    /// Opens (and creates if needed) the database using the engine's default flags
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let c_path = path_to_cstring(db_path.as_ref())?;
        let mut db: *mut libsqlite3_sys::sqlite3 = std::ptr::null_mut();
        let rc = unsafe { libsqlite3_sys::sqlite3_open(c_path.as_ptr(), &mut db) };
        Connection::from_open_result(db, rc, db_path.as_ref())
    }

    pub fn open_with_flags(db_path: impl AsRef<Path>, flags: OpenFlags, vfs: Option<&str>) -> Result<Self> {
        let c_path = path_to_cstring(db_path.as_ref())?;
        let c_vfs = vfs.map(CString::new).transpose()?;
        let vfs_ptr = c_vfs.as_ref().map_or(std::ptr::null(), |vfs| vfs.as_ptr());

        let mut db: *mut libsqlite3_sys::sqlite3 = std::ptr::null_mut();
        let rc = unsafe { libsqlite3_sys::sqlite3_open_v2(c_path.as_ptr(), &mut db, flags.bits(), vfs_ptr) };
        Connection::from_open_result(db, rc, db_path.as_ref())
    }

    pub fn new(db_path: &Path, mode: AccessMode) -> Result<Self> {
        Connection::open_with_flags(db_path, OpenFlags::from(mode), None)
    }

    pub fn open_in_memory() -> Result<Self> {
        Connection::open(":memory:")
    }

    fn from_open_result(db: *mut libsqlite3_sys::sqlite3, rc: c_int, db_path: &Path) -> Result<Self> {
        if rc != libsqlite3_sys::SQLITE_OK {
            // The engine hands out a handle even on failure, it still has to be released
            if !db.is_null() {
                log::debug!("Open {} failed: {}", db_path.display(), Connection::last_sqlite_error(db));
                unsafe { libsqlite3_sys::sqlite3_close(db) };
            }
            return Err(Error::from_code(rc));
        }

        log::debug!("Opened database {}", db_path.display());
        Ok(Self { db })
    }

    /// Releases the connection, when the engine refuses the handle is passed to `sqlite3_close_v2` on drop
    pub fn close(mut self, mode: CloseMode) -> Result<()> {
        let rc = unsafe {
            match mode {
                CloseMode::Graceful => libsqlite3_sys::sqlite3_close(self.db),
                CloseMode::Forceful => sqlite3_close_v2(self.db),
            }
        };

        if rc == libsqlite3_sys::SQLITE_OK {
            self.db = std::ptr::null_mut();
            log::debug!("Closed database ({mode:?})");
        }

        check_rc(rc, libsqlite3_sys::SQLITE_OK)
    }

    pub fn path(&self) -> Option<String> {
        let filename = unsafe { libsqlite3_sys::sqlite3_db_filename(self.db, c"main".as_ptr()) };
        if !filename.is_null() {
            let c_str = unsafe { CStr::from_ptr(filename.cast::<c_char>()) };
            let path = c_str.to_string_lossy().to_string();
            // In memory and temporary databases report an empty filename
            if !path.is_empty() {
                return Some(path);
            }
        }
        None
    }

    /// Compiles the first statement of `sql`, trailing text is ignored
    pub fn prepare(&self, sql: &str) -> Result<Statement<'_>> {
        let c_sql = CString::new(sql)?;
        match self.prepare_next(&c_sql)? {
            (Some(stmt), _) => Ok(stmt),
            // Whitespace or comment only sql compiles to nothing
            (None, _) => Err(Error::from_code(libsqlite3_sys::SQLITE_MISUSE)),
        }
    }

    /// Compiles the first statement of `sql` and returns the number of bytes the engine consumed
    fn prepare_next(&self, sql: &CStr) -> Result<(Option<Statement<'_>>, usize)> {
        let mut stmt: *mut libsqlite3_sys::sqlite3_stmt = std::ptr::null_mut();
        let mut tail: *const c_char = std::ptr::null();
        let rc = unsafe { libsqlite3_sys::sqlite3_prepare_v2(self.db, sql.as_ptr(), -1, &mut stmt, &mut tail) };
        if rc != libsqlite3_sys::SQLITE_OK {
            log::debug!("Prepare failed: {}", self.last_error_message());
            if !stmt.is_null() {
                unsafe { libsqlite3_sys::sqlite3_finalize(stmt) };
            }
            return Err(Error::from_code(rc));
        }

        let consumed = if tail.is_null() {
            sql.to_bytes().len()
        } else {
            usize::try_from(unsafe { tail.offset_from(sql.as_ptr()) }).unwrap_or_default()
        };

        let stmt = (!stmt.is_null()).then(|| Statement::new(stmt));
        Ok((stmt, consumed))
    }

    /// Runs a statement that produces no result rows
    pub fn execute(&self, sql: &str) -> Result<()> {
        let mut stmt = self.prepare(sql)?;
        if let Err(err) = stmt.step_done() {
            log::debug!("Execute failed: {}", self.last_error_message());
            return Err(err);
        }
        stmt.finalize()
    }

    /// Runs every statement in `sql_contents` in order, stops at the first failure
    pub fn execute_sql_statements(&self, sql_contents: &str) -> Result<()> {
        let c_sql = CString::new(sql_contents)?;
        let mut remaining: &CStr = &c_sql;
        while !remaining.is_empty() {
            let (stmt, consumed) = self.prepare_next(remaining)?;
            if let Some(mut stmt) = stmt {
                if let Err(err) = stmt.step_done() {
                    log::debug!("Execute failed: {}", self.last_error_message());
                    return Err(err);
                }
                stmt.finalize()?;
            }

            if consumed == 0 {
                break;
            }
            remaining = unsafe { CStr::from_ptr(remaining.as_ptr().add(consumed)) };
        }
        Ok(())
    }

    pub fn execute_sql_file(&self, sql_path: &Path) -> Result<()> {
        let sql_contents = std::fs::read_to_string(sql_path)?;
        self.execute_sql_statements(&sql_contents)
    }

    /// Detailed message of the most recent failure on this connection (`sqlite3_errmsg`)
    pub fn last_error_message(&self) -> String {
        Connection::last_sqlite_error(self.db)
    }

    fn last_sqlite_error(db: *mut libsqlite3_sys::sqlite3) -> String {
        let error_message = unsafe { libsqlite3_sys::sqlite3_errmsg(db) };
        if error_message.is_null() {
            return String::new();
        }

        let c_str = unsafe { CStr::from_ptr(error_message) };
        c_str.to_string_lossy().into_owned()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if self.db.is_null() {
            return;
        }

        let rc = unsafe { sqlite3_close_v2(self.db) };
        if rc != libsqlite3_sys::SQLITE_OK {
            log::warn!("Failed to close database: {}", Error::from_code(rc));
        }
    }
}

#[cfg(unix)]
fn path_to_cstring(path: &Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;
    Ok(CString::new(path.as_os_str().as_bytes())?)
}

#[cfg(not(unix))]
fn path_to_cstring(path: &Path) -> Result<CString> {
    // the engine expects utf-8 file names on these platforms
    let utf8_path = path.to_str().ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?;
    Ok(CString::new(utf8_path)?)
}
