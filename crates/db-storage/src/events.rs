// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Contains the event specific database structs and queries
use crate::schema::events;
use crate::users::UserId;
use chrono::{DateTime, Utc};
use crate::guests::Guest;
use database::{DatabaseError, DbConnection, Result};
use diesel::{Connection, ExpressionMethods, QueryDsl, RunQueryDsl};

diesel_newtype! {
    #[derive(Copy)] EventId(uuid::Uuid) => diesel::sql_types::Uuid
}

impl EventId {
    /// Generate a new random event id
    pub fn generate() -> Self {
        Self::from(uuid::Uuid::new_v4())
    }
}

/// Diesel event struct
///
/// Is used as a result in various queries. Represents an event row
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = events)]
pub struct Event {
    pub id: EventId,
    pub owner_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub date: String,
    /// Duration in minutes
    pub duration: i32,
    pub location: Option<String>,
    pub event_password: Option<String>,
    pub is_public: bool,
    pub max_attendees: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Diesel insertable event struct
///
/// Represents fields that have to be provided on event insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub struct NewEvent {
    pub id: EventId,
    pub owner_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub date: String,
    pub duration: i32,
    pub location: Option<String>,
    pub event_password: Option<String>,
    pub is_public: bool,
    pub max_attendees: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewEvent {
    #[tracing::instrument(err, skip_all)]
    pub fn insert(self, conn: &mut DbConnection) -> Result<Event> {
        let event = diesel::insert_into(events::table)
            .values(self)
            .get_result(conn)?;

        Ok(event)
    }

    /// Build the [`Event`] that results from inserting this struct
    ///
    /// Used by stores which do not go through the database.
    pub fn into_event(self) -> Event {
        Event {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            description: self.description,
            date: self.date,
            duration: self.duration,
            location: self.location,
            event_password: self.event_password,
            is_public: self.is_public,
            max_attendees: self.max_attendees,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Diesel event struct for updates
///
/// Is used in update queries. None fields will be ignored on update queries
#[derive(Debug, Clone, Default, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = events)]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i32>,
    pub location: Option<String>,
    pub event_password: Option<String>,
    pub is_public: Option<bool>,
    pub max_attendees: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl UpdateEvent {
    #[tracing::instrument(err, skip_all)]
    pub fn apply(self, conn: &mut DbConnection, event_id: EventId) -> Result<Event> {
        let query = diesel::update(events::table.filter(events::id.eq(event_id))).set(self);

        let event = query.get_result(conn)?;

        Ok(event)
    }

    /// Merge this changeset into an already loaded event
    ///
    /// Mirrors what [`UpdateEvent::apply`] does inside the database: every `Some` field
    /// overwrites, every `None` field keeps the current value.
    pub fn merge_into(self, event: &mut Event) {
        let UpdateEvent {
            name,
            description,
            date,
            duration,
            location,
            event_password,
            is_public,
            max_attendees,
            updated_at,
        } = self;

        if let Some(name) = name {
            event.name = name;
        }
        if description.is_some() {
            event.description = description;
        }
        if let Some(date) = date {
            event.date = date;
        }
        if let Some(duration) = duration {
            event.duration = duration;
        }
        if location.is_some() {
            event.location = location;
        }
        if event_password.is_some() {
            event.event_password = event_password;
        }
        if let Some(is_public) = is_public {
            event.is_public = is_public;
        }
        if max_attendees.is_some() {
            event.max_attendees = max_attendees;
        }

        event.updated_at = updated_at;
    }
}

impl Event {
    #[tracing::instrument(err, skip_all)]
    pub fn get(conn: &mut DbConnection, event_id: EventId) -> Result<Event> {
        let query = events::table.filter(events::id.eq(event_id));

        let event = query.first(conn)?;

        Ok(event)
    }

    /// Returns all events owned by the given user, oldest first
    #[tracing::instrument(err, skip_all)]
    pub fn get_all_for_owner(conn: &mut DbConnection, owner_id: &UserId) -> Result<Vec<Event>> {
        let query = events::table
            .filter(events::owner_id.eq(owner_id))
            .order_by((events::created_at.asc(), events::id.asc()));

        let events = query.load(conn)?;

        Ok(events)
    }

    /// Deletes the event, returns [`DatabaseError::NotFound`] if nothing was deleted
    #[tracing::instrument(err, skip_all)]
    pub fn delete_by_id(conn: &mut DbConnection, event_id: EventId) -> Result<()> {
        let deleted = diesel::delete(events::table.filter(events::id.eq(event_id))).execute(conn)?;

        if deleted == 0 {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }

    /// Deletes the event together with all its guests in one transaction
    ///
    /// Returns the number of deleted guests. Nothing is deleted if the event does not exist.
    #[tracing::instrument(err, skip_all)]
    pub fn delete_with_guests(conn: &mut DbConnection, event_id: EventId) -> Result<usize> {
        conn.transaction::<_, DatabaseError, _>(|conn| {
            Self::delete_by_id(conn, event_id)?;

            Guest::delete_all_for_event(conn, event_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event() -> Event {
        let created_at = Utc.with_ymd_and_hms(2024, 12, 1, 10, 0, 0).unwrap();

        Event {
            id: EventId::from(uuid::Uuid::nil()),
            owner_id: UserId::from("owner".to_owned()),
            name: "Kickoff".into(),
            description: Some("Quarterly kickoff".into()),
            date: "2024-12-01T10:00:00Z".into(),
            duration: 60,
            location: None,
            event_password: None,
            is_public: false,
            max_attendees: Some(10),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut merged = event();
        let updated_at = Utc.with_ymd_and_hms(2024, 12, 2, 10, 0, 0).unwrap();

        UpdateEvent {
            name: Some("Kickoff 2025".into()),
            location: Some("Room 4".into()),
            updated_at,
            ..Default::default()
        }
        .merge_into(&mut merged);

        let expected = Event {
            name: "Kickoff 2025".into(),
            location: Some("Room 4".into()),
            updated_at,
            ..event()
        };

        assert_eq!(merged, expected);
    }

    #[test]
    fn merge_with_empty_changeset_only_touches_updated_at() {
        let mut merged = event();
        let updated_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        UpdateEvent {
            updated_at,
            ..Default::default()
        }
        .merge_into(&mut merged);

        assert_eq!(merged, Event { updated_at, ..event() });
    }

    #[test]
    fn new_event_into_event_keeps_all_fields() {
        let source = event();
        let new_event = NewEvent {
            id: source.id,
            owner_id: source.owner_id.clone(),
            name: source.name.clone(),
            description: source.description.clone(),
            date: source.date.clone(),
            duration: source.duration,
            location: source.location.clone(),
            event_password: source.event_password.clone(),
            is_public: source.is_public,
            max_attendees: source.max_attendees,
            created_at: source.created_at,
            updated_at: source.updated_at,
        };

        assert_eq!(new_event.into_event(), source);
    }
}
