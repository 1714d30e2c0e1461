// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::ResourceStore;
use async_trait::async_trait;
use database::{DatabaseError, Db, DbConnection, OptionalExt, Result};
use db_storage::events::{Event, EventId, NewEvent, UpdateEvent};
use db_storage::guests::{Guest, NewGuest};
use db_storage::users::UserId;
use std::sync::Arc;

/// [`ResourceStore`] backed by the postgres connection pool
#[derive(Debug, Clone)]
pub struct DatabaseStore {
    db: Arc<Db>,
}

impl DatabaseStore {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }

    /// Run `f` with a pooled connection on the blocking thread pool
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut DbConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();

        crate::block(move || {
            let mut conn = db.get_conn()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::Custom(e.to_string()))?
    }
}

#[async_trait]
impl ResourceStore for DatabaseStore {
    async fn get_event(&self, event_id: EventId) -> Result<Option<Event>> {
        self.with_conn(move |conn| Event::get(conn, event_id).optional())
            .await
    }

    async fn get_events_for_owner(&self, owner_id: UserId) -> Result<Vec<Event>> {
        self.with_conn(move |conn| Event::get_all_for_owner(conn, &owner_id))
            .await
    }

    async fn insert_event(&self, event: NewEvent) -> Result<Event> {
        self.with_conn(move |conn| event.insert(conn)).await
    }

    async fn update_event(&self, event_id: EventId, changeset: UpdateEvent) -> Result<Event> {
        self.with_conn(move |conn| changeset.apply(conn, event_id))
            .await
    }

    async fn delete_event(&self, event_id: EventId) -> Result<()> {
        self.with_conn(move |conn| Event::delete_by_id(conn, event_id))
            .await
    }

    async fn get_guests_for_event(&self, event_id: EventId) -> Result<Vec<Guest>> {
        self.with_conn(move |conn| Guest::get_all_for_event(conn, event_id))
            .await
    }

    async fn insert_guest(&self, guest: NewGuest) -> Result<Guest> {
        self.with_conn(move |conn| guest.insert(conn)).await
    }

    async fn delete_event_with_guests(&self, event_id: EventId) -> Result<usize> {
        self.with_conn(move |conn| Event::delete_with_guests(conn, event_id))
            .await
    }
}
