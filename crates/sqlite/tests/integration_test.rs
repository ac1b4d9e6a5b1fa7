use approx::assert_relative_eq;
use sqlite::{BoundParameter, CloseMode, ColumnType, Connection, Error, OpenFlags, Result, Value};

#[test_log::test]
fn create_insert_select() -> Result<()> {
    let conn = Connection::open(":memory:")?;

    let mut stmt = conn.prepare("CREATE TABLE t(a TEXT, b INTEGER)")?;
    stmt.step_done()?;
    stmt.finalize()?;

    let mut stmt = conn.prepare("INSERT INTO t VALUES(?, ?)")?;
    stmt.bind_text(1, "hello")?;
    stmt.bind_int64(2, 42)?;
    stmt.step_done()?;
    stmt.finalize()?;

    let mut stmt = conn.prepare("SELECT a, b FROM t")?;
    assert!(stmt.step_row()?);
    assert_eq!(stmt.column_text(0)?, "hello");
    assert_eq!(stmt.column_int64(1)?, 42);
    assert!(!stmt.step_row()?);
    stmt.finalize()?;

    conn.close(CloseMode::Graceful)
}

#[test_log::test]
fn bound_values_round_trip() -> Result<()> {
    let conn = Connection::open_in_memory()?;
    let mut stmt = conn.prepare("SELECT ?, ?, ?, ?")?;
    stmt.bind_text(1, "grüße")?;
    stmt.bind_int64(2, i64::MIN)?;
    stmt.bind_double(3, -1234.5678)?;
    stmt.bind_blob(4, &[0, 255, 1, 254])?;

    assert!(stmt.step_row()?);
    assert_eq!(stmt.column_text(0)?, "grüße");
    assert_eq!(stmt.column_int64(1)?, i64::MIN);
    assert_relative_eq!(stmt.column_double(2)?, -1234.5678);
    assert_eq!(stmt.column_blob(3)?, vec![0, 255, 1, 254]);
    stmt.finalize()
}

#[test_log::test]
fn nullable_text_round_trip() -> Result<()> {
    let conn = Connection::open_in_memory()?;
    let mut stmt = conn.prepare("SELECT ?")?;
    stmt.bind_text_nullable(1, None)?;

    assert!(stmt.step_row()?);
    assert_eq!(stmt.column_text_nullable(0)?, None);
    assert!(matches!(stmt.column_text(0), Err(Error::UnexpectedColumnType(ColumnType::Null))));
    stmt.finalize()
}

#[test_log::test]
fn zero_rows_never_yield_a_row() -> Result<()> {
    let conn = Connection::open_in_memory()?;
    conn.execute("CREATE TABLE empty(x INTEGER)")?;

    let mut stmt = conn.prepare("SELECT x FROM empty")?;
    assert!(!stmt.step_row()?);
    stmt.finalize()
}

#[test_log::test]
fn multi_row_result_yields_each_row_once() -> Result<()> {
    let conn = Connection::open_in_memory()?;
    conn.execute("CREATE TABLE items(id INTEGER, name TEXT, weight REAL, payload BLOB)")?;

    let mut insert = conn.prepare("INSERT INTO items VALUES(?1, ?2, ?3, ?4)")?;
    for id in 0..5i64 {
        insert.reset()?;
        insert.bind_all(&[
            BoundParameter::new(1, id),
            BoundParameter::new(2, if id % 2 == 0 { Some(format!("item {id}")) } else { None }),
            BoundParameter::new(3, id as f64 * 0.5),
            BoundParameter::new(4, vec![id as u8; id as usize]),
        ])?;
        insert.step_done()?;
    }
    insert.finalize()?;

    let mut select = conn.prepare("SELECT id, name, weight, payload FROM items ORDER BY id")?;
    let mut rows = 0;
    while select.step_row()? {
        let id = select.column_int64(0)?;
        assert_eq!(id, rows);
        assert_eq!(select.column_text_nullable(1)?.is_some(), id % 2 == 0);
        assert_relative_eq!(select.column_double(2)?, id as f64 * 0.5);
        if id == 0 {
            assert!(matches!(select.column_blob(3), Err(Error::EmptyData)));
            assert_eq!(select.column_blob_nullable(3)?, None);
        } else {
            assert_eq!(select.column_blob(3)?.len(), id as usize);
        }
        rows += 1;
    }
    assert_eq!(rows, 5);
    select.finalize()
}

#[test_log::test]
fn invalid_sql_is_an_engine_failure() -> Result<()> {
    let conn = Connection::open_in_memory()?;
    match conn.prepare("SELECT FROM WHERE") {
        Err(Error::EngineFailure { code, message }) => {
            assert_eq!(code, 1);
            assert!(!message.is_empty());
        }
        Err(err) => panic!("Unexpected error: {err}"),
        Ok(_) => panic!("Invalid sql should not prepare"),
    }
    Ok(())
}

#[test_log::test]
fn read_column_on_file_database() -> Result<()> {
    let tmp = tempfile::tempdir().expect("Failed to create temporary directory");
    let db_path = tmp.path().join("values.db");

    {
        let conn = Connection::open_with_flags(&db_path, OpenFlags::READ_WRITE | OpenFlags::CREATE, None)?;
        conn.execute_sql_statements(
            "CREATE TABLE v(x);
             INSERT INTO v VALUES(1);
             INSERT INTO v VALUES(2.5);
             INSERT INTO v VALUES('three');
             INSERT INTO v VALUES(X'04');
             INSERT INTO v VALUES(NULL);",
        )?;
        conn.close(CloseMode::Graceful)?;
    }

    let conn = Connection::open_with_flags(&db_path, OpenFlags::READ_ONLY, None)?;
    let mut stmt = conn.prepare("SELECT x FROM v ORDER BY rowid")?;
    let mut values = Vec::new();
    while stmt.step_row()? {
        values.push(stmt.read_column(0)?);
    }
    stmt.finalize()?;

    assert_eq!(
        values,
        vec![
            Value::Int64(1),
            Value::Double(2.5),
            Value::Text("three".to_string()),
            Value::Blob(vec![4]),
            Value::Null,
        ]
    );

    conn.close(CloseMode::Forceful)
}
