// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Events and guests owned by authenticated principals
//!
//! Every operation goes through [`authorize_event`]. Events owned by someone else are
//! reported exactly like events that do not exist.
use crate::auth::Principal;
use crate::settings::SharedSettings;
use crate::store::ResourceStore;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use database::DatabaseError;
use db_storage::events::{Event, EventId};
use std::sync::Arc;
use validator::ValidationErrors;

mod events;
mod guests;

pub use events::{NewEventBody, PatchEventBody};
pub use guests::NewGuestBody;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("the requested resource could not be found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("store failed, {0}")]
    Store(DatabaseError),
    #[error("invite base url `{0}` cannot carry a path")]
    InviteBaseUrl(url::Url),
}

impl From<DatabaseError> for ResourceError {
    fn from(e: DatabaseError) -> Self {
        match e {
            // the event vanished between the ownership check and the write
            DatabaseError::NotFound => Self::NotFound,
            e => Self::Store(e),
        }
    }
}

/// Outcome of the ownership check of an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted(Event),
    NotFound,
    Forbidden,
}

impl Access {
    /// Returns the event if access is granted
    ///
    /// [`Access::Forbidden`] is reported as [`ResourceError::NotFound`] to not leak the existence
    /// of events owned by other principals.
    pub fn into_event(self) -> Result<Event, ResourceError> {
        match self {
            Access::Granted(event) => Ok(event),
            Access::NotFound | Access::Forbidden => Err(ResourceError::NotFound),
        }
    }
}

/// Check whether `principal` may access the event with `event_id`
pub async fn authorize_event(
    store: &dyn ResourceStore,
    principal: &Principal,
    event_id: EventId,
) -> Result<Access, DatabaseError> {
    let access = match store.get_event(event_id).await? {
        None => Access::NotFound,
        Some(event) if event.owner_id == principal.id => Access::Granted(event),
        Some(_) => {
            log::debug!(
                "Denied access of {} to event {} owned by someone else",
                principal.id,
                event_id
            );
            Access::Forbidden
        }
    };

    Ok(access)
}

/// Resource model, validation and ownership scoping of events and guests
pub struct ResourceService {
    store: Arc<dyn ResourceStore>,
    settings: SharedSettings,
}

impl ResourceService {
    pub fn new(store: Arc<dyn ResourceStore>, settings: SharedSettings) -> Self {
        Self { store, settings }
    }

    async fn authorized_event(
        &self,
        principal: &Principal,
        event_id: EventId,
    ) -> Result<Event, ResourceError> {
        authorize_event(self.store.as_ref(), principal, event_id)
            .await?
            .into_event()
    }
}

/// Current time at the precision of the store
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next `updated_at` value, strictly after `previous` even if the clock did not advance
fn next_update_time(previous: DateTime<Utc>) -> DateTime<Utc> {
    std::cmp::max(now(), previous + Duration::microseconds(1))
}
