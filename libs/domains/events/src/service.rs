//! Orchestration over an [`EventRepository`]: each operation adds its name to failures.

use std::sync::Arc;
use tracing::instrument;

use crate::error::EventResult;
use crate::models::{Event, EventCreate, EventGet};
use crate::repository::EventRepository;

/// Service layer between the HTTP handlers and the repository
///
/// Each call forwards to the repository and prefixes failures with the
/// operation name; error kinds survive the wrap.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(user_id = input.user_id))]
    pub async fn create_event(&self, input: EventCreate) -> EventResult<i64> {
        self.repository
            .create_event(input)
            .await
            .map_err(|e| e.context("service/create_event"))
    }

    #[instrument(skip(self, event), fields(event_id = event.id))]
    pub async fn update_event(&self, event: Event) -> EventResult<i64> {
        self.repository
            .update_event(event)
            .await
            .map_err(|e| e.context("service/update_event"))
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: i64) -> EventResult<()> {
        self.repository
            .delete_event(id)
            .await
            .map_err(|e| e.context("service/delete_event"))
    }

    #[instrument(skip(self, query), fields(user_id = query.user_id, from = %query.date_from, to = %query.date_to))]
    pub async fn get_events(&self, query: EventGet) -> EventResult<Vec<Event>> {
        self.repository
            .get_events(query)
            .await
            .map_err(|e| e.context("service/get_events"))
    }
}
