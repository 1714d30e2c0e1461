// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::{next_update_time, now, ResourceError, ResourceService};
use crate::auth::Principal;
use db_storage::events::{Event, EventId, NewEvent, UpdateEvent};
use serde::Deserialize;
use validator::Validate;

/// Body of `POST /events`
///
/// Identifiers, owner and timestamps are assigned by the server, client supplied values
/// for them are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEventBody {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    /// ISO-8601 date, not interpreted
    #[validate(length(min = 1))]
    pub date: String,
    /// Duration in minutes
    #[validate(range(min = 1))]
    pub duration: i32,
    pub location: Option<String>,
    pub event_password: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[validate(range(min = 0))]
    pub max_attendees: Option<i32>,
}

/// Body of `PUT /events/{event_id}`
///
/// Merge patch, absent and `null` fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PatchEventBody {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub date: Option<String>,
    #[validate(range(min = 1))]
    pub duration: Option<i32>,
    pub location: Option<String>,
    pub event_password: Option<String>,
    pub is_public: Option<bool>,
    #[validate(range(min = 0))]
    pub max_attendees: Option<i32>,
}

impl PatchEventBody {
    fn into_changeset(self, previous: &Event) -> UpdateEvent {
        UpdateEvent {
            name: self.name,
            description: self.description,
            date: self.date,
            duration: self.duration,
            location: self.location,
            event_password: self.event_password,
            is_public: self.is_public,
            max_attendees: self.max_attendees,
            updated_at: next_update_time(previous.updated_at),
        }
    }
}

impl ResourceService {
    /// All events owned by `principal`, oldest first
    #[tracing::instrument(err, skip_all, fields(principal = %principal.id))]
    pub async fn list_events(&self, principal: &Principal) -> Result<Vec<Event>, ResourceError> {
        let events = self
            .store
            .get_events_for_owner(principal.id.clone())
            .await?;

        Ok(events)
    }

    #[tracing::instrument(err, skip_all, fields(principal = %principal.id))]
    pub async fn create_event(
        &self,
        principal: &Principal,
        body: NewEventBody,
    ) -> Result<Event, ResourceError> {
        body.validate()?;

        let NewEventBody {
            name,
            description,
            date,
            duration,
            location,
            event_password,
            is_public,
            max_attendees,
        } = body;

        let created_at = now();

        let event = self
            .store
            .insert_event(NewEvent {
                id: EventId::generate(),
                owner_id: principal.id.clone(),
                name,
                description,
                date,
                duration,
                location,
                event_password,
                is_public,
                max_attendees,
                created_at,
                updated_at: created_at,
            })
            .await?;

        log::debug!("Created event {}", event.id);

        Ok(event)
    }

    #[tracing::instrument(err, skip_all, fields(principal = %principal.id, %event_id))]
    pub async fn get_event(
        &self,
        principal: &Principal,
        event_id: EventId,
    ) -> Result<Event, ResourceError> {
        self.authorized_event(principal, event_id).await
    }

    #[tracing::instrument(err, skip_all, fields(principal = %principal.id, %event_id))]
    pub async fn update_event(
        &self,
        principal: &Principal,
        event_id: EventId,
        patch: PatchEventBody,
    ) -> Result<Event, ResourceError> {
        let event = self.authorized_event(principal, event_id).await?;

        patch.validate()?;

        let changeset = patch.into_changeset(&event);

        let event = self.store.update_event(event_id, changeset).await?;

        Ok(event)
    }

    #[tracing::instrument(err, skip_all, fields(principal = %principal.id, %event_id))]
    pub async fn delete_event(
        &self,
        principal: &Principal,
        event_id: EventId,
    ) -> Result<(), ResourceError> {
        self.authorized_event(principal, event_id).await?;

        let cascade = self.settings.load().resources.cascade_guest_deletion;

        if cascade {
            let deleted = self.store.delete_event_with_guests(event_id).await?;
            log::debug!("Deleted event {} with {} guests", event_id, deleted);
        } else {
            self.store.delete_event(event_id).await?;
        }

        Ok(())
    }
}
