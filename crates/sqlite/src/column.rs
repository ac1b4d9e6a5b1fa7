//! Column extraction from the current result row, positions are 0-based.
//! Values are only valid directly after [`Statement::step_row`] returned true.
//!
//! The typed extractors check the runtime column type before touching the data:
//! a mismatch is reported as [`Error::UnexpectedColumnType`], the `_nullable` variants map NULL to `None`.
//! A zero-length blob counts as absent data: [`Error::EmptyData`] for [`Statement::column_blob`]
//! and `None` for [`Statement::column_blob_nullable`].
//! [`Statement::read_column`] never fails on the type and returns a [`Value`] to match on instead.

use crate::{ColumnType, Error, Result, Statement, Value};
use std::ffi::{c_double, c_int, c_longlong};
use std::slice;

impl Statement<'_> {
    /// Runtime type of the value in the current row
    pub fn column_type(&self, index: c_int) -> ColumnType {
        let column_type = unsafe { libsqlite3_sys::sqlite3_column_type(self.stmt, index) };
        // the engine only reports the five fundamental types
        ColumnType::from_raw(column_type).unwrap_or(ColumnType::Null)
    }

    pub fn column_is_null(&self, index: c_int) -> bool {
        self.column_type(index) == ColumnType::Null
    }

    pub fn column_text(&self, index: c_int) -> Result<String> {
        match self.column_type(index) {
            ColumnType::Text => self.text_value(index),
            other => Err(Error::UnexpectedColumnType(other)),
        }
    }

    pub fn column_text_nullable(&self, index: c_int) -> Result<Option<String>> {
        match self.column_type(index) {
            ColumnType::Text => self.text_value(index).map(Some),
            ColumnType::Null => Ok(None),
            other => Err(Error::UnexpectedColumnType(other)),
        }
    }

    pub fn column_int64(&self, index: c_int) -> Result<c_longlong> {
        match self.column_type(index) {
            ColumnType::Integer => Ok(self.int64_value(index)),
            other => Err(Error::UnexpectedColumnType(other)),
        }
    }

    pub fn column_int64_nullable(&self, index: c_int) -> Result<Option<c_longlong>> {
        match self.column_type(index) {
            ColumnType::Integer => Ok(Some(self.int64_value(index))),
            ColumnType::Null => Ok(None),
            other => Err(Error::UnexpectedColumnType(other)),
        }
    }

    pub fn column_double(&self, index: c_int) -> Result<c_double> {
        match self.column_type(index) {
            ColumnType::Float => Ok(self.double_value(index)),
            other => Err(Error::UnexpectedColumnType(other)),
        }
    }

    pub fn column_double_nullable(&self, index: c_int) -> Result<Option<c_double>> {
        match self.column_type(index) {
            ColumnType::Float => Ok(Some(self.double_value(index))),
            ColumnType::Null => Ok(None),
            other => Err(Error::UnexpectedColumnType(other)),
        }
    }

    pub fn column_blob(&self, index: c_int) -> Result<Vec<u8>> {
        match self.column_type(index) {
            ColumnType::Blob => match self.blob_value(index) {
                BlobData::Bytes(data) => Ok(data.to_vec()),
                BlobData::Empty => Err(Error::EmptyData),
                BlobData::Missing => Err(Error::UnexpectedNull),
            },
            other => Err(Error::UnexpectedColumnType(other)),
        }
    }

    pub fn column_blob_nullable(&self, index: c_int) -> Result<Option<Vec<u8>>> {
        match self.column_type(index) {
            ColumnType::Blob => match self.blob_value(index) {
                BlobData::Bytes(data) => Ok(Some(data.to_vec())),
                BlobData::Empty | BlobData::Missing => Ok(None),
            },
            ColumnType::Null => Ok(None),
            other => Err(Error::UnexpectedColumnType(other)),
        }
    }

    /// Reads the value as whatever type the engine reports, zero-length blobs are returned as empty blobs
    pub fn read_column(&self, index: c_int) -> Result<Value> {
        Ok(match self.column_type(index) {
            ColumnType::Integer => Value::Int64(self.int64_value(index)),
            ColumnType::Float => Value::Double(self.double_value(index)),
            ColumnType::Text => Value::Text(self.text_value(index)?),
            ColumnType::Blob => match self.blob_value(index) {
                BlobData::Bytes(data) => Value::Blob(data.to_vec()),
                BlobData::Empty => Value::Blob(Vec::new()),
                BlobData::Missing => return Err(Error::UnexpectedNull),
            },
            ColumnType::Null => Value::Null,
        })
    }

    /// All values of the current row
    pub fn read_row(&self) -> Result<Vec<Value>> {
        (0..self.column_count()).map(|index| self.read_column(index)).collect()
    }

    fn text_value(&self, index: c_int) -> Result<String> {
        let data = unsafe { libsqlite3_sys::sqlite3_column_text(self.stmt, index) };
        if data.is_null() {
            return Err(Error::UnexpectedNull);
        }

        // the byte count has to be queried after the text conversion
        let size = unsafe { libsqlite3_sys::sqlite3_column_bytes(self.stmt, index) };
        let bytes = unsafe { slice::from_raw_parts(data, usize::try_from(size).unwrap_or_default()) };
        Ok(std::str::from_utf8(bytes)?.to_string())
    }

    fn int64_value(&self, index: c_int) -> c_longlong {
        unsafe { libsqlite3_sys::sqlite3_column_int64(self.stmt, index) }
    }

    fn double_value(&self, index: c_int) -> c_double {
        unsafe { libsqlite3_sys::sqlite3_column_double(self.stmt, index) }
    }

    fn blob_value(&self, index: c_int) -> BlobData<'_> {
        let data = unsafe { libsqlite3_sys::sqlite3_column_blob(self.stmt, index) };
        let size = unsafe { libsqlite3_sys::sqlite3_column_bytes(self.stmt, index) };
        if size <= 0 {
            BlobData::Empty
        } else if data.is_null() {
            BlobData::Missing
        } else {
            BlobData::Bytes(unsafe { slice::from_raw_parts(data.cast::<u8>(), size as usize) })
        }
    }
}

enum BlobData<'a> {
    Bytes(&'a [u8]),
    Empty,
    Missing,
}
