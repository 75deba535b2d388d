use rusqlite::Connection;
use userdata_core::db::migrations::latest_version;
use userdata_core::db::{open_db, open_db_in_memory, DbError};
use userdata_core::{CrudRepository, NewUser, SqliteUserRepository};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "users");
}

#[test]
fn reopening_file_database_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("userdata.sqlite3");

    let conn_first = open_db(&path).unwrap();
    let saved = SqliteUserRepository::try_new(&conn_first)
        .unwrap()
        .save(NewUser::new("Alice", "alice@example.com").into())
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let repo = SqliteUserRepository::try_new(&conn_second).unwrap();
    assert_eq!(repo.find_by_id(saved.id).unwrap(), Some(saved));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_a_directory_fails_with_sqlite_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = open_db(dir.path()).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
    assert!(!err.is_constraint_violation());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
