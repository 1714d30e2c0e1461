// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::ResourceStore;
use async_trait::async_trait;
use database::{DatabaseError, Result};
use db_storage::events::{Event, EventId, NewEvent, UpdateEvent};
use db_storage::guests::{Guest, NewGuest};
use db_storage::users::UserId;
use parking_lot::Mutex;

/// In process [`ResourceStore`], contents are lost on restart
///
/// Listings are ordered like [`DatabaseStore`](super::DatabaseStore), by timestamp and then id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    events: Vec<Event>,
    guests: Vec<Guest>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn get_event(&self, event_id: EventId) -> Result<Option<Event>> {
        let tables = self.inner.lock();

        Ok(tables.events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn get_events_for_owner(&self, owner_id: UserId) -> Result<Vec<Event>> {
        let tables = self.inner.lock();

        let mut events: Vec<Event> = tables
            .events
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.created_at, e.id));

        Ok(events)
    }

    async fn insert_event(&self, event: NewEvent) -> Result<Event> {
        let mut tables = self.inner.lock();

        if tables.events.iter().any(|e| e.id == event.id) {
            return Err(DatabaseError::Custom(format!(
                "duplicate event id {}",
                event.id
            )));
        }

        let event = event.into_event();
        tables.events.push(event.clone());

        Ok(event)
    }

    async fn update_event(&self, event_id: EventId, changeset: UpdateEvent) -> Result<Event> {
        let mut tables = self.inner.lock();

        let event = tables
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or(DatabaseError::NotFound)?;

        changeset.merge_into(event);

        Ok(event.clone())
    }

    async fn delete_event(&self, event_id: EventId) -> Result<()> {
        let mut tables = self.inner.lock();

        let len = tables.events.len();
        tables.events.retain(|e| e.id != event_id);

        if tables.events.len() == len {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }

    async fn get_guests_for_event(&self, event_id: EventId) -> Result<Vec<Guest>> {
        let tables = self.inner.lock();

        let mut guests: Vec<Guest> = tables
            .guests
            .iter()
            .filter(|g| g.event_id == event_id)
            .cloned()
            .collect();
        guests.sort_by_key(|g| (g.invited_at, g.id));

        Ok(guests)
    }

    async fn insert_guest(&self, guest: NewGuest) -> Result<Guest> {
        let mut tables = self.inner.lock();

        if tables.guests.iter().any(|g| g.id == guest.id) {
            return Err(DatabaseError::Custom(format!(
                "duplicate guest id {}",
                guest.id
            )));
        }

        let guest = guest.into_guest();
        tables.guests.push(guest.clone());

        Ok(guest)
    }

    async fn delete_event_with_guests(&self, event_id: EventId) -> Result<usize> {
        let mut tables = self.inner.lock();

        if !tables.events.iter().any(|e| e.id == event_id) {
            return Err(DatabaseError::NotFound);
        }

        tables.events.retain(|e| e.id != event_id);

        let len = tables.guests.len();
        tables.guests.retain(|g| g.event_id != event_id);

        Ok(len - tables.guests.len())
    }
}
