use rusqlite::Connection;
use stocklog_core::db::migrations::latest_version;
use stocklog_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(latest_version(), 2);
    for table in [
        "users",
        "locations",
        "purposes",
        "categories",
        "products",
        "registrations",
    ] {
        assert_table_exists(&conn, table);
    }
    assert_column_exists(&conn, "products", "attachment_url");
    assert_column_exists(&conn, "products", "attachment_name");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stocklog.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "registrations");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match &err {
        DbError::SchemaTooNew {
            target,
            found,
            supported,
        } => {
            assert_eq!(*found, 999);
            assert_eq!(*supported, latest_version());
            assert!(target.ends_with("future.db"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("future.db"));
}

#[test]
fn open_failure_names_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("stocklog.db");

    let err = open_db(&path).unwrap_err();

    assert!(matches!(err, DbError::Open { .. }));
    assert_eq!(err.target(), Some(path.display().to_string().as_str()));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn statement_errors_carry_no_target() {
    let err = DbError::from(rusqlite::Error::QueryReturnedNoRows);

    assert_eq!(err.target(), None);
    assert!(err.to_string().starts_with("stock database query failed"));
}

#[test]
fn version_one_database_is_upgraded_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v1.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE products (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            qr_code TEXT,
            category_id TEXT,
            created_at TEXT
        );
        INSERT INTO products (id, name) VALUES ('p1', 'Grease');
        PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_column_exists(&conn, "products", "attachment_url");
    let name: String = conn
        .query_row("SELECT name FROM products WHERE id = 'p1';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "Grease");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "missing table {table}");
}

fn assert_column_exists(conn: &Connection, table: &str, column: &str) {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert!(
        columns.iter().any(|name| name == column),
        "missing column {table}.{column}"
    );
}
