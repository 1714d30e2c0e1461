// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Guest related API structs and Endpoints

use super::response::{ApiError, ApiResponse};
use crate::auth::Principal;
use crate::resources::{NewGuestBody, ResourceService};
use actix_web::web::{Data, Json, Path, ReqData};
use actix_web::{get, post};
use chrono::{DateTime, Utc};
use db_storage::events::EventId;
use db_storage::guests::{Guest, GuestId, GuestStatus};
use serde::Serialize;

/// A guest invited to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestResource {
    pub id: GuestId,
    pub event_id: EventId,
    pub name: String,
    pub email: String,
    pub notes: Option<String>,
    pub status: GuestStatus,
    pub invite_link: String,
    pub invited_at: DateTime<Utc>,
}

impl From<Guest> for GuestResource {
    fn from(guest: Guest) -> Self {
        Self {
            id: guest.id,
            event_id: guest.event_id,
            name: guest.name,
            email: guest.email,
            notes: guest.notes,
            status: guest.status,
            invite_link: guest.invite_link,
            invited_at: guest.invited_at,
        }
    }
}

/// API Endpoint *GET /events/{event_id}/guests*
///
/// Returns all guests of the event in invitation order
#[get("/events/{event_id}/guests")]
pub async fn get_all(
    resources: Data<ResourceService>,
    principal: ReqData<Principal>,
    event_id: Path<EventId>,
) -> Result<ApiResponse<Vec<GuestResource>>, ApiError> {
    let guests = resources
        .list_guests(&principal, event_id.into_inner())
        .await?;

    Ok(ApiResponse::new(
        guests.into_iter().map(GuestResource::from).collect(),
    ))
}

/// API Endpoint *POST /events/{event_id}/guests*
///
/// Invites a new guest. Returns the created [`GuestResource`] including its booking link.
#[post("/events/{event_id}/guests")]
pub async fn new(
    resources: Data<ResourceService>,
    principal: ReqData<Principal>,
    event_id: Path<EventId>,
    body: Json<NewGuestBody>,
) -> Result<Json<GuestResource>, ApiError> {
    let guest = resources
        .create_guest(&principal, event_id.into_inner(), body.into_inner())
        .await?;

    Ok(Json(guest.into()))
}
