use std::ffi::c_int;
use std::fmt;

/// Runtime type the engine attaches to a result cell
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Blob,
    Null,
    Text,
}

impl ColumnType {
    /// Maps a `sqlite3_column_type` result, returns `None` for codes the engine does not define
    pub fn from_raw(column_type: c_int) -> Option<Self> {
        match column_type {
            libsqlite3_sys::SQLITE_INTEGER => Some(ColumnType::Integer),
            libsqlite3_sys::SQLITE_FLOAT => Some(ColumnType::Float),
            libsqlite3_sys::SQLITE_BLOB => Some(ColumnType::Blob),
            libsqlite3_sys::SQLITE_NULL => Some(ColumnType::Null),
            libsqlite3_sys::SQLITE_TEXT => Some(ColumnType::Text),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Float => "FLOAT",
            ColumnType::Blob => "BLOB",
            ColumnType::Null => "NULL",
            ColumnType::Text => "TEXT",
        };

        f.write_str(name)
    }
}

/// A column value as reported by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int64(i64),
    Double(f64),
    Blob(Vec<u8>),
    Null,
}

impl Value {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Text(_) => ColumnType::Text,
            Value::Int64(_) => ColumnType::Integer,
            Value::Double(_) => ColumnType::Float,
            Value::Blob(_) => ColumnType::Blob,
            Value::Null => ColumnType::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// A value that can be bound to a statement parameter slot
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    TextNullable(Option<String>),
    Text(String),
    Int64(i64),
    Double(f64),
    Blob(Vec<u8>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Option<String>> for ParamValue {
    fn from(value: Option<String>) -> Self {
        ParamValue::TextNullable(value)
    }
}

impl From<Option<&str>> for ParamValue {
    fn from(value: Option<&str>) -> Self {
        ParamValue::TextNullable(value.map(str::to_string))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int64(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int64(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Double(value)
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(value: Vec<u8>) -> Self {
        ParamValue::Blob(value)
    }
}

impl From<&[u8]> for ParamValue {
    fn from(value: &[u8]) -> Self {
        ParamValue::Blob(value.to_vec())
    }
}

/// A value together with the 1-based parameter position it is bound to
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameter {
    pub position: c_int,
    pub value: ParamValue,
}

impl BoundParameter {
    pub fn new(position: c_int, value: impl Into<ParamValue>) -> Self {
        Self {
            position,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_type_from_raw() {
        assert_eq!(ColumnType::from_raw(libsqlite3_sys::SQLITE_TEXT), Some(ColumnType::Text));
        assert_eq!(ColumnType::from_raw(libsqlite3_sys::SQLITE_NULL), Some(ColumnType::Null));
        assert_eq!(ColumnType::from_raw(42), None);
    }

    #[test]
    fn bound_parameter_conversions() {
        assert_eq!(BoundParameter::new(1, "a").value, ParamValue::Text("a".to_string()));
        assert_eq!(BoundParameter::new(2, None::<&str>).value, ParamValue::TextNullable(None));
        assert_eq!(BoundParameter::new(3, 7i64).value, ParamValue::Int64(7));
        assert_eq!(BoundParameter::new(4, vec![1u8, 2]).value, ParamValue::Blob(vec![1, 2]));
        assert_eq!(Value::Double(1.5).column_type(), ColumnType::Float);
    }
}
