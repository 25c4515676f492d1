use chrono::NaiveDate;
use roommates_core::{
    ConnectionProvider, RepoError, Room, RoomId, RoomRepository, RoommateId, RoommateRepository,
    SqliteRoomRepository, SqliteRoommateRepository,
};
use rusqlite::params;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    provider: ConnectionProvider,
    rooms: SqliteRoomRepository,
    roommates: SqliteRoommateRepository,
}

fn setup() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::new(dir.path().join("roommates.sqlite3"));
    Fixture {
        rooms: SqliteRoomRepository::new(provider.clone()),
        roommates: SqliteRoommateRepository::new(provider.clone()),
        provider,
        _dir: dir,
    }
}

fn seed_roommate(
    provider: &ConnectionProvider,
    first_name: &str,
    last_name: &str,
    rent_portion: i64,
    move_in_date: &str,
    room_id: RoomId,
) -> RoommateId {
    let conn = provider.connect().unwrap();
    conn.execute(
        "INSERT INTO Roommate (FirstName, LastName, RentPortion, MoveInDate, RoomId)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![first_name, last_name, rent_portion, move_in_date, room_id.get()],
    )
    .unwrap();
    RoommateId(conn.last_insert_rowid())
}

#[test]
fn get_all_on_empty_relation_returns_empty_vec() {
    let fixture = setup();
    assert!(fixture.roommates.get_all().unwrap().is_empty());
}

#[test]
fn get_all_maps_scalar_columns_and_raw_room_id() {
    let fixture = setup();
    let mut room = Room::new("Blue", 2);
    fixture.rooms.insert(&mut room).unwrap();
    seed_roommate(&fixture.provider, "Ada", "Lovelace", 40, "2024-01-15", room.id);
    seed_roommate(&fixture.provider, "Alan", "Turing", 60, "2023-09-01", RoomId(99));

    let mut roommates = fixture.roommates.get_all().unwrap();
    roommates.sort_by_key(|roommate| roommate.id);

    assert_eq!(roommates.len(), 2);
    assert_eq!(roommates[0].first_name, "Ada");
    assert_eq!(roommates[0].last_name, "Lovelace");
    assert_eq!(roommates[0].rent_portion, 40);
    assert_eq!(
        roommates[0].move_in_date,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    );
    assert_eq!(roommates[0].room_id, room.id);
    // No join in get_all: a dangling room id is still reported.
    assert_eq!(roommates[1].room_id, RoomId(99));
    assert_eq!(roommates[1].full_name(), "Alan Turing");
}

#[test]
fn get_by_id_resolves_room_name() {
    let fixture = setup();
    let mut room = Room::new("Blue", 2);
    fixture.rooms.insert(&mut room).unwrap();
    let id = seed_roommate(&fixture.provider, "Ada", "Lovelace", 40, "2024-01-15", room.id);

    let detail = fixture.roommates.get_by_id(id).unwrap();

    assert_eq!(detail.roommate.id, id);
    assert_eq!(detail.roommate.first_name, "Ada");
    assert_eq!(detail.roommate.room_id, room.id);
    assert_eq!(detail.room_name, "Blue");
}

#[test]
fn get_by_id_for_missing_roommate_returns_not_found() {
    let fixture = setup();
    let err = fixture.roommates.get_by_id(RoommateId(3)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "roommate",
            id: 3
        }
    ));
}

#[test]
fn get_by_id_for_roommate_whose_room_was_deleted_returns_not_found() {
    let fixture = setup();
    let mut room = Room::new("Blue", 2);
    fixture.rooms.insert(&mut room).unwrap();
    let id = seed_roommate(&fixture.provider, "Ada", "Lovelace", 40, "2024-01-15", room.id);

    fixture.rooms.delete(room.id).unwrap();

    assert!(fixture.roommates.get_by_id(id).unwrap_err().is_not_found());
    assert_eq!(fixture.roommates.get_all().unwrap().len(), 1);
}

#[test]
fn roommate_detail_serializes_flat() {
    let fixture = setup();
    let mut room = Room::new("Attic", 1);
    fixture.rooms.insert(&mut room).unwrap();
    let id = seed_roommate(&fixture.provider, "Grace", "Hopper", 100, "2022-05-02", room.id);

    let detail = fixture.roommates.get_by_id(id).unwrap();
    let json = serde_json::to_value(&detail).unwrap();

    assert_eq!(json["first_name"], "Grace");
    assert_eq!(json["move_in_date"], "2022-05-02");
    assert_eq!(json["room_id"], room.id.get());
    assert_eq!(json["room_name"], "Attic");
}
