// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Event related API structs and Endpoints
//!
//! The defined structs are exposed to the REST API and will be serialized/deserialized. Similar
//! structs are defined in the Database crate [`db_storage`] for database operations.

use super::response::{ApiError, ApiResponse};
use crate::auth::Principal;
use crate::resources::{NewEventBody, PatchEventBody, ResourceService};
use actix_web::web::{Data, Json, Path, ReqData};
use actix_web::{delete, get, post, put};
use chrono::{DateTime, Utc};
use db_storage::events::{Event, EventId};
use db_storage::users::UserId;
use serde::Serialize;

/// An Event
///
/// Only accessible to its owner. The event password itself is never returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventResource {
    pub id: EventId,
    pub owner_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub date: String,
    pub duration: i32,
    pub location: Option<String>,
    pub has_event_password: bool,
    pub is_public: bool,
    pub max_attendees: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventResource {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            owner_id: event.owner_id,
            name: event.name,
            description: event.description,
            date: event.date,
            duration: event.duration,
            location: event.location,
            has_event_password: event.event_password.is_some(),
            is_public: event.is_public,
            max_attendees: event.max_attendees,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// Acknowledgment of a deletion
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: &'static str,
}

/// API Endpoint *GET /events*
///
/// Returns a JSON array of all events owned by the requesting principal
#[get("/events")]
pub async fn get_all(
    resources: Data<ResourceService>,
    principal: ReqData<Principal>,
) -> Result<ApiResponse<Vec<EventResource>>, ApiError> {
    let events = resources.list_events(&principal).await?;

    Ok(ApiResponse::new(
        events.into_iter().map(EventResource::from).collect(),
    ))
}

/// API Endpoint *POST /events*
///
/// Uses the provided [`NewEventBody`] to create a new event.
/// Returns the created [`EventResource`].
#[post("/events")]
pub async fn new(
    resources: Data<ResourceService>,
    principal: ReqData<Principal>,
    body: Json<NewEventBody>,
) -> Result<Json<EventResource>, ApiError> {
    let event = resources
        .create_event(&principal, body.into_inner())
        .await?;

    Ok(Json(event.into()))
}

/// API Endpoint *GET /events/{event_id}*
#[get("/events/{event_id}")]
pub async fn get(
    resources: Data<ResourceService>,
    principal: ReqData<Principal>,
    event_id: Path<EventId>,
) -> Result<ApiResponse<EventResource>, ApiError> {
    let event = resources
        .get_event(&principal, event_id.into_inner())
        .await?;

    Ok(ApiResponse::new(event.into()))
}

/// API Endpoint *PUT /events/{event_id}*
///
/// Merges the provided [`PatchEventBody`] into the event. Returns the updated [`EventResource`].
#[put("/events/{event_id}")]
pub async fn patch(
    resources: Data<ResourceService>,
    principal: ReqData<Principal>,
    event_id: Path<EventId>,
    body: Json<PatchEventBody>,
) -> Result<ApiResponse<EventResource>, ApiError> {
    let event = resources
        .update_event(&principal, event_id.into_inner(), body.into_inner())
        .await?;

    Ok(ApiResponse::new(event.into()))
}

/// API Endpoint *DELETE /events/{event_id}*
#[delete("/events/{event_id}")]
pub async fn delete(
    resources: Data<ResourceService>,
    principal: ReqData<Principal>,
    event_id: Path<EventId>,
) -> Result<ApiResponse<Deleted>, ApiError> {
    resources
        .delete_event(&principal, event_id.into_inner())
        .await?;

    Ok(ApiResponse::new(Deleted {
        message: "Event deleted successfully",
    }))
}

#[cfg(test)]
mod test {
    use super::*;
    use test_util::assert_eq_json;

    #[test]
    fn password_is_replaced_by_flag() {
        let created_at = chrono::TimeZone::timestamp_opt(&Utc, 1_700_000_000, 0).unwrap();
        let id = EventId::from(uuid::Uuid::nil());

        let event = Event {
            id,
            owner_id: UserId::from("alice".to_owned()),
            name: "Board meeting".into(),
            description: None,
            date: "2023-11-14".into(),
            duration: 60,
            location: Some("Room 4".into()),
            event_password: Some("hunter2".into()),
            is_public: false,
            max_attendees: None,
            created_at,
            updated_at: created_at,
        };

        assert_eq_json!(
            EventResource::from(event),
            {
                "id": "00000000-0000-0000-0000-000000000000",
                "owner_id": "alice",
                "name": "Board meeting",
                "description": null,
                "date": "2023-11-14",
                "duration": 60,
                "location": "Room 4",
                "has_event_password": true,
                "is_public": false,
                "max_attendees": null,
                "created_at": "2023-11-14T22:13:20Z",
                "updated_at": "2023-11-14T22:13:20Z"
            }
        );
    }
}
