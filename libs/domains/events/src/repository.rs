//! Event repository trait and the in-memory store

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventCreate, EventGet};

/// Repository trait for event persistence
///
/// Implementations return [`EventError::NotFound`] unwrapped so callers can
/// match it; every other failure carries the operation name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a new event, returning the id the store assigned
    async fn create_event(&self, input: EventCreate) -> EventResult<i64>;

    /// Overwrite user, text and date of the row with `event.id`
    ///
    /// The affected-row count is not inspected: updating an unknown id succeeds.
    async fn update_event(&self, event: Event) -> EventResult<i64>;

    /// Delete by id, [`EventError::NotFound`] when nothing was removed
    async fn delete_event(&self, id: i64) -> EventResult<()>;

    /// Events of `query.user_id` with `date` in the closed window, ascending by date
    async fn get_events(&self, query: EventGet) -> EventResult<Vec<Event>>;
}

/// In-memory implementation of EventRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    state: Arc<RwLock<State>>,
}

#[derive(Debug, Default)]
struct State {
    events: BTreeMap<i64, Event>,
    last_id: i64,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.state.read().await.events.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create_event(&self, input: EventCreate) -> EventResult<i64> {
        let mut state = self.state.write().await;

        state.last_id += 1;
        let id = state.last_id;
        state.events.insert(
            id,
            Event {
                id,
                user_id: input.user_id,
                event: input.event,
                date: input.date,
            },
        );

        tracing::info!(event_id = id, "Created event");
        Ok(id)
    }

    async fn update_event(&self, event: Event) -> EventResult<i64> {
        let mut state = self.state.write().await;
        let id = event.id;

        if let Some(stored) = state.events.get_mut(&id) {
            *stored = event;
            tracing::info!(event_id = id, "Updated event");
        }

        Ok(id)
    }

    async fn delete_event(&self, id: i64) -> EventResult<()> {
        let mut state = self.state.write().await;

        match state.events.remove(&id) {
            Some(_) => {
                tracing::info!(event_id = id, "Deleted event");
                Ok(())
            }
            None => Err(EventError::NotFound),
        }
    }

    async fn get_events(&self, query: EventGet) -> EventResult<Vec<Event>> {
        let state = self.state.read().await;

        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|e| e.user_id == query.user_id && query.contains(&e.date))
            .cloned()
            .collect();

        // Stable sort keeps id order among equal dates
        events.sort_by_key(|e| e.date);

        Ok(events)
    }
}
