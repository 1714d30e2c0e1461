// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use chrono::{DateTime, TimeZone as _, Utc};
use database::{DatabaseError, DbConnection, OptionalExt as _};
use meetbase_db_storage::events::{Event, EventId, NewEvent, UpdateEvent};
use meetbase_db_storage::guests::{Guest, GuestId, GuestStatus, NewGuest};
use meetbase_db_storage::users::UserId;
use pretty_assertions::assert_eq;
use serial_test::serial;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
}

fn make_event(conn: &mut DbConnection, owner: &str, hour: u32) -> Event {
    NewEvent {
        id: EventId::generate(),
        owner_id: UserId::from(owner.to_owned()),
        name: format!("Event at {hour}"),
        description: None,
        date: "2024-06-01T18:00:00Z".into(),
        duration: 90,
        location: Some("Town hall".into()),
        event_password: Some("secret".into()),
        is_public: false,
        max_attendees: Some(40),
        created_at: at(hour),
        updated_at: at(hour),
    }
    .insert(conn)
    .unwrap()
}

fn make_guest(conn: &mut DbConnection, event_id: EventId, hour: u32) -> Guest {
    let id = GuestId::generate();

    NewGuest {
        id,
        event_id,
        name: "Ada".into(),
        email: "ada@example.org".into(),
        notes: None,
        status: GuestStatus::Pending,
        invite_link: format!("https://meetbase.com/book/{event_id}?guest={id}"),
        invited_at: at(hour),
    }
    .insert(conn)
    .unwrap()
}

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres"]
async fn events_are_scoped_to_their_owner() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;
    let mut conn = db_ctx.db.get_conn().unwrap();

    let second = make_event(&mut conn, "alice", 11);
    let first = make_event(&mut conn, "alice", 10);
    let _foreign = make_event(&mut conn, "bob", 9);

    let events =
        Event::get_all_for_owner(&mut conn, &UserId::from("alice".to_owned())).unwrap();

    assert_eq!(events, vec![first.clone(), second]);
    assert_eq!(Event::get(&mut conn, first.id).unwrap(), first);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres"]
async fn update_only_touches_present_fields() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;
    let mut conn = db_ctx.db.get_conn().unwrap();

    let event = make_event(&mut conn, "alice", 10);

    let changeset = UpdateEvent {
        name: Some("Renamed".into()),
        duration: Some(30),
        updated_at: at(12),
        ..Default::default()
    };

    let mut expected = event.clone();
    changeset.clone().merge_into(&mut expected);

    let updated = changeset.apply(&mut conn, event.id).unwrap();

    assert_eq!(updated, expected);
    assert_eq!(updated.location, event.location);
    assert_eq!(updated.created_at, event.created_at);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres"]
async fn delete_keeps_guests() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;
    let mut conn = db_ctx.db.get_conn().unwrap();

    let event = make_event(&mut conn, "alice", 10);
    let guest_b = make_guest(&mut conn, event.id, 12);
    let guest_a = make_guest(&mut conn, event.id, 11);

    Event::delete_by_id(&mut conn, event.id).unwrap();

    assert!(Event::get(&mut conn, event.id).optional().unwrap().is_none());
    assert!(matches!(
        Event::delete_by_id(&mut conn, event.id),
        Err(DatabaseError::NotFound)
    ));

    let guests = Guest::get_all_for_event(&mut conn, event.id).unwrap();
    assert_eq!(guests, vec![guest_a, guest_b]);

    assert_eq!(Guest::delete_all_for_event(&mut conn, event.id).unwrap(), 2);
    assert!(Guest::get_all_for_event(&mut conn, event.id)
        .unwrap()
        .is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres"]
async fn delete_with_guests_removes_both() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;
    let mut conn = db_ctx.db.get_conn().unwrap();

    let event = make_event(&mut conn, "alice", 10);
    let other = make_event(&mut conn, "alice", 11);
    make_guest(&mut conn, event.id, 12);
    make_guest(&mut conn, event.id, 13);
    let kept = make_guest(&mut conn, other.id, 14);

    assert_eq!(Event::delete_with_guests(&mut conn, event.id).unwrap(), 2);

    assert!(Event::get(&mut conn, event.id).optional().unwrap().is_none());
    assert!(Guest::get_all_for_event(&mut conn, event.id)
        .unwrap()
        .is_empty());
    assert_eq!(
        Guest::get_all_for_event(&mut conn, other.id).unwrap(),
        vec![kept]
    );

    // a missing event rolls back and leaves unrelated guests alone
    assert!(matches!(
        Event::delete_with_guests(&mut conn, event.id),
        Err(DatabaseError::NotFound)
    ));
}
