use std::ffi::c_int;
use std::ops::{BitOr, BitOrAssign};

use crate::AccessMode;

/// Open mode flags forwarded unmodified to `sqlite3_open_v2`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OpenFlags(c_int);

impl OpenFlags {
    pub const READ_ONLY: OpenFlags = OpenFlags(libsqlite3_sys::SQLITE_OPEN_READONLY);
    pub const READ_WRITE: OpenFlags = OpenFlags(libsqlite3_sys::SQLITE_OPEN_READWRITE);
    pub const CREATE: OpenFlags = OpenFlags(libsqlite3_sys::SQLITE_OPEN_CREATE);
    pub const URI: OpenFlags = OpenFlags(libsqlite3_sys::SQLITE_OPEN_URI);
    pub const MEMORY: OpenFlags = OpenFlags(libsqlite3_sys::SQLITE_OPEN_MEMORY);
    pub const NO_MUTEX: OpenFlags = OpenFlags(libsqlite3_sys::SQLITE_OPEN_NOMUTEX);
    pub const FULL_MUTEX: OpenFlags = OpenFlags(libsqlite3_sys::SQLITE_OPEN_FULLMUTEX);
    pub const SHARED_CACHE: OpenFlags = OpenFlags(libsqlite3_sys::SQLITE_OPEN_SHAREDCACHE);
    pub const PRIVATE_CACHE: OpenFlags = OpenFlags(libsqlite3_sys::SQLITE_OPEN_PRIVATECACHE);
    pub const NO_FOLLOW: OpenFlags = OpenFlags(libsqlite3_sys::SQLITE_OPEN_NOFOLLOW);

    /// Wraps raw flag bits without validation, the engine decides what is acceptable
    pub const fn from_bits(bits: c_int) -> Self {
        OpenFlags(bits)
    }

    pub const fn bits(self) -> c_int {
        self.0
    }

    pub const fn contains(self, other: OpenFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for OpenFlags {
    fn default() -> Self {
        OpenFlags::READ_WRITE | OpenFlags::CREATE
    }
}

impl BitOr for OpenFlags {
    type Output = OpenFlags;

    fn bitor(self, rhs: OpenFlags) -> OpenFlags {
        OpenFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for OpenFlags {
    fn bitor_assign(&mut self, rhs: OpenFlags) {
        self.0 |= rhs.0;
    }
}

impl From<AccessMode> for OpenFlags {
    fn from(mode: AccessMode) -> Self {
        match mode {
            AccessMode::ReadOnly => OpenFlags::READ_ONLY,
            AccessMode::ReadWrite => OpenFlags::READ_WRITE,
            AccessMode::Create => OpenFlags::READ_WRITE | OpenFlags::CREATE,
        }
    }
}
