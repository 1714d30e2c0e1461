// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::{now, ResourceError, ResourceService};
use crate::auth::Principal;
use db_storage::events::EventId;
use db_storage::guests::{Guest, GuestId, GuestStatus, NewGuest};
use serde::Deserialize;
use url::Url;
use validator::Validate;

/// Body of `POST /events/{event_id}/guests`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewGuestBody {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub notes: Option<String>,
}

/// Build the booking link of a guest, `<base>/book/<event_id>?guest=<guest_id>`
pub(crate) fn invite_link(
    base_url: &Url,
    event_id: EventId,
    guest_id: GuestId,
) -> Result<Url, ResourceError> {
    let event_id = event_id.to_string();
    let mut url = base_url.clone();

    url.path_segments_mut()
        .map_err(|_| ResourceError::InviteBaseUrl(base_url.clone()))?
        .pop_if_empty()
        .extend(["book", event_id.as_str()]);

    url.set_query(None);
    url.query_pairs_mut()
        .append_pair("guest", &guest_id.to_string());

    Ok(url)
}

impl ResourceService {
    /// All guests of an event owned by `principal`, in invitation order
    #[tracing::instrument(err, skip_all, fields(principal = %principal.id, %event_id))]
    pub async fn list_guests(
        &self,
        principal: &Principal,
        event_id: EventId,
    ) -> Result<Vec<Guest>, ResourceError> {
        self.authorized_event(principal, event_id).await?;

        let guests = self.store.get_guests_for_event(event_id).await?;

        Ok(guests)
    }

    #[tracing::instrument(err, skip_all, fields(principal = %principal.id, %event_id))]
    pub async fn create_guest(
        &self,
        principal: &Principal,
        event_id: EventId,
        body: NewGuestBody,
    ) -> Result<Guest, ResourceError> {
        self.authorized_event(principal, event_id).await?;

        body.validate()?;

        let NewGuestBody { name, email, notes } = body;

        let base_url = self.settings.load().invites.base_url.clone();

        let id = GuestId::generate();
        let invite_link = invite_link(&base_url, event_id, id)?;

        let guest = self
            .store
            .insert_guest(NewGuest {
                id,
                event_id,
                name,
                email,
                notes,
                status: GuestStatus::Pending,
                invite_link: invite_link.into(),
                invited_at: now(),
            })
            .await?;

        log::debug!("Invited guest {} to event {}", guest.id, event_id);

        Ok(guest)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::resources::NewEventBody;
    use crate::settings::Settings;
    use crate::store::{MemoryStore, ResourceStore};
    use arc_swap::ArcSwap;
    use async_trait::async_trait;
    use database::DatabaseError;
    use db_storage::events::{Event, NewEvent, UpdateEvent};
    use db_storage::users::UserId;
    use std::sync::Arc;

    /// Store whose single event delete always fails and whose atomic delete fails on demand
    struct FailingDeletes {
        inner: MemoryStore,
        fail_with_guests: bool,
    }

    fn broken_connection() -> DatabaseError {
        DatabaseError::Custom("connection reset".into())
    }

    #[async_trait]
    impl ResourceStore for FailingDeletes {
        async fn get_event(&self, event_id: EventId) -> database::Result<Option<Event>> {
            self.inner.get_event(event_id).await
        }

        async fn get_events_for_owner(&self, owner_id: UserId) -> database::Result<Vec<Event>> {
            self.inner.get_events_for_owner(owner_id).await
        }

        async fn insert_event(&self, event: NewEvent) -> database::Result<Event> {
            self.inner.insert_event(event).await
        }

        async fn update_event(
            &self,
            event_id: EventId,
            changeset: UpdateEvent,
        ) -> database::Result<Event> {
            self.inner.update_event(event_id, changeset).await
        }

        async fn delete_event(&self, _event_id: EventId) -> database::Result<()> {
            Err(broken_connection())
        }

        async fn get_guests_for_event(&self, event_id: EventId) -> database::Result<Vec<Guest>> {
            self.inner.get_guests_for_event(event_id).await
        }

        async fn insert_guest(&self, guest: NewGuest) -> database::Result<Guest> {
            self.inner.insert_guest(guest).await
        }

        async fn delete_event_with_guests(&self, event_id: EventId) -> database::Result<usize> {
            if self.fail_with_guests {
                return Err(broken_connection());
            }

            self.inner.delete_event_with_guests(event_id).await
        }
    }

    fn cascading_service(store: Arc<FailingDeletes>) -> ResourceService {
        let mut settings = Settings::default();
        settings.resources.cascade_guest_deletion = true;

        ResourceService::new(store, Arc::new(ArcSwap::from_pointee(settings)))
    }

    struct Setup {
        service: ResourceService,
        store: Arc<MemoryStore>,
    }

    fn setup(settings: Settings) -> Setup {
        let store = Arc::new(MemoryStore::new());
        let service = ResourceService::new(
            store.clone() as Arc<dyn ResourceStore>,
            Arc::new(ArcSwap::from_pointee(settings)),
        );

        Setup { service, store }
    }

    fn principal(id: &str) -> Principal {
        Principal {
            id: UserId::from(id.to_owned()),
            email: None,
        }
    }

    fn event_body() -> NewEventBody {
        NewEventBody {
            name: "Book club".into(),
            description: None,
            date: "2024-09-12".into(),
            duration: 60,
            location: None,
            event_password: None,
            is_public: false,
            max_attendees: None,
        }
    }

    fn guest_body(name: &str) -> NewGuestBody {
        NewGuestBody {
            name: name.into(),
            email: format!("{}@example.org", name.to_lowercase()),
            notes: None,
        }
    }

    #[test]
    fn invite_link_format() {
        let event_id = EventId::from(uuid::Uuid::from_u128(1));
        let guest_id = GuestId::from(uuid::Uuid::from_u128(2));

        let link = invite_link(
            &Url::parse("https://meetbase.com").unwrap(),
            event_id,
            guest_id,
        )
        .unwrap();

        assert_eq!(
            link.as_str(),
            "https://meetbase.com/book/00000000-0000-0000-0000-000000000001?guest=00000000-0000-0000-0000-000000000002"
        );

        let link = invite_link(
            &Url::parse("https://example.org/meetbase/").unwrap(),
            event_id,
            guest_id,
        )
        .unwrap();

        assert_eq!(
            link.as_str(),
            "https://example.org/meetbase/book/00000000-0000-0000-0000-000000000001?guest=00000000-0000-0000-0000-000000000002"
        );
    }

    #[tokio::test]
    async fn guests_get_distinct_ids_and_links() {
        let Setup { service, .. } = setup(Settings::default());
        let alice = principal("alice");

        let event = service.create_event(&alice, event_body()).await.unwrap();

        let ada = service
            .create_guest(&alice, event.id, guest_body("Ada"))
            .await
            .unwrap();
        let alan = service
            .create_guest(&alice, event.id, guest_body("Alan"))
            .await
            .unwrap();

        assert_ne!(ada.id, alan.id);
        assert_ne!(ada.invite_link, alan.invite_link);
        for guest in [&ada, &alan] {
            assert_eq!(guest.status, GuestStatus::Pending);
            assert_eq!(guest.event_id, event.id);
            assert_eq!(
                guest.invite_link,
                format!("https://meetbase.com/book/{}?guest={}", event.id, guest.id)
            );
        }

        assert_eq!(
            service.list_guests(&alice, event.id).await.unwrap(),
            vec![ada, alan]
        );
    }

    #[tokio::test]
    async fn guest_on_foreign_or_unknown_event_is_not_created() {
        let Setup { service, store } = setup(Settings::default());
        let alice = principal("alice");
        let mallory = principal("mallory");

        let event = service.create_event(&alice, event_body()).await.unwrap();

        assert!(matches!(
            service
                .create_guest(&mallory, event.id, guest_body("Eve"))
                .await,
            Err(ResourceError::NotFound)
        ));

        let unknown = EventId::generate();
        assert!(matches!(
            service.create_guest(&alice, unknown, guest_body("Eve")).await,
            Err(ResourceError::NotFound)
        ));
        assert!(matches!(
            service.list_guests(&mallory, event.id).await,
            Err(ResourceError::NotFound)
        ));

        assert!(store.get_guests_for_event(event.id).await.unwrap().is_empty());
        assert!(store.get_guests_for_event(unknown).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let Setup { service, .. } = setup(Settings::default());
        let alice = principal("alice");

        let event = service.create_event(&alice, event_body()).await.unwrap();

        let body = NewGuestBody {
            email: "not-an-email".into(),
            ..guest_body("Ada")
        };

        assert!(matches!(
            service.create_guest(&alice, event.id, body).await,
            Err(ResourceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn event_deletion_keeps_guests_by_default() {
        let Setup { service, store } = setup(Settings::default());
        let alice = principal("alice");

        let event = service.create_event(&alice, event_body()).await.unwrap();
        let guest = service
            .create_guest(&alice, event.id, guest_body("Ada"))
            .await
            .unwrap();

        service.delete_event(&alice, event.id).await.unwrap();

        assert!(service.list_events(&alice).await.unwrap().is_empty());
        assert_eq!(
            store.get_guests_for_event(event.id).await.unwrap(),
            vec![guest]
        );
    }

    #[tokio::test]
    async fn event_deletion_cascades_when_configured() {
        let mut settings = Settings::default();
        settings.resources.cascade_guest_deletion = true;
        let Setup { service, store } = setup(settings);
        let alice = principal("alice");

        let event = service.create_event(&alice, event_body()).await.unwrap();
        service
            .create_guest(&alice, event.id, guest_body("Ada"))
            .await
            .unwrap();

        service.delete_event(&alice, event.id).await.unwrap();

        assert!(store.get_guests_for_event(event.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cascading_deletion_uses_the_atomic_store_operation() {
        let store = Arc::new(FailingDeletes {
            inner: MemoryStore::new(),
            fail_with_guests: false,
        });
        let service = cascading_service(store.clone());
        let alice = principal("alice");

        let event = service.create_event(&alice, event_body()).await.unwrap();
        service
            .create_guest(&alice, event.id, guest_body("Ada"))
            .await
            .unwrap();

        service.delete_event(&alice, event.id).await.unwrap();

        assert!(service.list_events(&alice).await.unwrap().is_empty());
        assert!(store.get_guests_for_event(event.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_cascading_deletion_keeps_event_and_guests() {
        let store = Arc::new(FailingDeletes {
            inner: MemoryStore::new(),
            fail_with_guests: true,
        });
        let service = cascading_service(store.clone());
        let alice = principal("alice");

        let event = service.create_event(&alice, event_body()).await.unwrap();
        let guest = service
            .create_guest(&alice, event.id, guest_body("Ada"))
            .await
            .unwrap();

        assert!(matches!(
            service.delete_event(&alice, event.id).await,
            Err(ResourceError::Store(_))
        ));

        assert_eq!(service.get_event(&alice, event.id).await.unwrap(), event);
        assert_eq!(
            service.list_guests(&alice, event.id).await.unwrap(),
            vec![guest]
        );
    }
}
