use roommates_core::db::migrations::latest_version;
use roommates_core::db::{ConnectionProvider, DbError, MigrationError};
use rusqlite::Connection;

#[test]
fn connect_creates_database_and_applies_all_migrations() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::new(dir.path().join("roommates.sqlite3"));

    let conn = provider.connect().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["Room", "Roommate", "Chore", "RoommateChore"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn connecting_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::new(dir.path().join("roommates.sqlite3"));

    let first = provider.connect().unwrap();
    first
        .execute("INSERT INTO Chore (Name) VALUES ('Dishes');", [])
        .unwrap();
    drop(first);

    let second = provider.connect().unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM Chore;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn connecting_to_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = ConnectionProvider::new(&path).connect().unwrap_err();
    assert_eq!(err.address(), path.as_path());
    assert_eq!(err.phase(), "migrate");
    match err {
        DbError::Migrate {
            source:
                MigrationError::UnsupportedVersion {
                    db_version,
                    latest_supported,
                },
            ..
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_parent_directory_fails_in_open_phase_with_address() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("roommates.sqlite3");

    let err = ConnectionProvider::new(&path).connect().unwrap_err();

    assert!(matches!(err, DbError::Open { .. }));
    assert_eq!(err.address(), path.as_path());
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
fn non_database_file_fails_in_migrate_phase() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.sqlite3");
    std::fs::write(&path, b"this is definitely not a sqlite database file, just text padding")
        .unwrap();

    let err = ConnectionProvider::new(&path).connect().unwrap_err();

    assert!(matches!(
        err,
        DbError::Migrate {
            source: MigrationError::ReadVersion(_),
            ..
        }
    ));
    assert!(err.to_string().starts_with("cannot migrate"));
}

#[test]
fn schema_declares_no_foreign_keys() {
    let dir = tempfile::tempdir().unwrap();
    let conn = ConnectionProvider::new(dir.path().join("roommates.sqlite3"))
        .connect()
        .unwrap();

    for table in ["Roommate", "RoommateChore"] {
        let count: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM pragma_foreign_key_list('{table}');"),
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0, "{table} should not declare foreign keys");
    }
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
