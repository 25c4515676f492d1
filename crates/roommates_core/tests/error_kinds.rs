use roommates_core::{
    ChoreRepository, ConnectionProvider, RepoError, RoomRepository, RoommateRepository,
    SqliteChoreRepository, SqliteRoomRepository, SqliteRoommateRepository,
};
use rusqlite::Connection;

#[test]
fn unreachable_database_path_returns_connection_failure() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::new(dir.path().join("missing").join("roommates.sqlite3"));

    let err = SqliteRoomRepository::new(provider.clone())
        .get_all()
        .unwrap_err();
    assert!(matches!(err, RepoError::ConnectionFailure(_)));

    let err = SqliteChoreRepository::new(provider.clone())
        .get_all()
        .unwrap_err();
    match err {
        RepoError::ConnectionFailure(db_err) => {
            assert_eq!(db_err.address(), provider.address());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn file_that_is_not_a_database_returns_connection_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.sqlite3");
    std::fs::write(&path, b"this is definitely not a sqlite database file, just text padding").unwrap();

    let err = SqliteRoommateRepository::new(ConnectionProvider::new(&path))
        .get_all()
        .unwrap_err();
    assert!(matches!(err, RepoError::ConnectionFailure(_)));
}

#[test]
fn newer_schema_version_returns_connection_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = SqliteRoomRepository::new(ConnectionProvider::new(&path))
        .get_all()
        .unwrap_err();
    assert!(matches!(err, RepoError::ConnectionFailure(_)));
}

#[test]
fn unparsable_move_in_date_returns_data_shape_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::new(dir.path().join("roommates.sqlite3"));
    provider
        .connect()
        .unwrap()
        .execute(
            "INSERT INTO Roommate (FirstName, LastName, RentPortion, MoveInDate, RoomId)
             VALUES ('Ada', 'Lovelace', 40, 'sometime last spring', 1);",
            [],
        )
        .unwrap();

    let err = SqliteRoommateRepository::new(provider).get_all().unwrap_err();
    assert!(matches!(err, RepoError::DataShapeMismatch(_)));
}

#[test]
fn non_text_room_name_returns_data_shape_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::new(dir.path().join("roommates.sqlite3"));
    provider
        .connect()
        .unwrap()
        .execute(
            "INSERT INTO Room (Name, MaxOccupancy) VALUES (X'00FF', 1);",
            [],
        )
        .unwrap();

    let err = SqliteRoomRepository::new(provider).get_all().unwrap_err();
    assert!(matches!(err, RepoError::DataShapeMismatch(_)));
}

#[test]
fn error_display_is_human_readable() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::new(dir.path().join("missing").join("db.sqlite3"));

    let err = SqliteChoreRepository::new(provider)
        .get_unassigned_chores()
        .unwrap_err();
    assert!(err.to_string().starts_with("cannot connect to database"));
    assert!(err.to_string().contains("db.sqlite3"));
    assert!(std::error::Error::source(&err).is_some());
}
