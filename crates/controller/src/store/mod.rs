// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Persistence of events and guests
//!
//! [`DatabaseStore`] is backed by postgres, [`MemoryStore`] keeps everything in process
//! and is used when no database is configured.
use async_trait::async_trait;
use database::Result;
use db_storage::events::{Event, EventId, NewEvent, UpdateEvent};
use db_storage::guests::{Guest, NewGuest};
use db_storage::users::UserId;

mod db;
mod memory;

pub use db::DatabaseStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn get_event(&self, event_id: EventId) -> Result<Option<Event>>;

    /// All events of `owner_id` ordered by creation time, then id
    async fn get_events_for_owner(&self, owner_id: UserId) -> Result<Vec<Event>>;

    async fn insert_event(&self, event: NewEvent) -> Result<Event>;

    /// Applies the changeset, fails with [`DatabaseError::NotFound`](database::DatabaseError::NotFound)
    /// when the event is gone
    async fn update_event(&self, event_id: EventId, changeset: UpdateEvent) -> Result<Event>;

    async fn delete_event(&self, event_id: EventId) -> Result<()>;

    /// All guests of the event ordered by invitation time, then id
    async fn get_guests_for_event(&self, event_id: EventId) -> Result<Vec<Guest>>;

    async fn insert_guest(&self, guest: NewGuest) -> Result<Guest>;

    /// Deletes the event and all its guests atomically, returns the number of deleted guests
    ///
    /// Either both are deleted or nothing is.
    async fn delete_event_with_guests(&self, event_id: EventId) -> Result<usize>;
}
