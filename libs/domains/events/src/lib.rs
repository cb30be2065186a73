//! Events Domain
//!
//! Calendar events owned by users, stored in PostgreSQL and queried by fixed
//! day, week and month windows.
//!
//! # Architecture
//!
//! ```text
//! HTTP handler ─► EventService ─► EventRepository ─┬─► PgEventRepository (PostgreSQL)
//!  (decode,        (error          (trait)         │
//!   validate,       context)                       └─► InMemoryEventRepository
//!   windows)
//! ```
//!
//! Failures travel up as [`EventError`]; each layer adds the operation name and
//! [`EventError::kind`] still tells a not-found apart from a store failure.

mod error;
mod handlers;
mod models;
mod postgres;
mod repository;
mod service;
mod validation;

pub use error::{ErrorKind, EVENT_NOT_FOUND, EventError, EventResult};
pub use handlers::{ApiDoc, TAG, router};
pub use models::{
    Event, EventCreate, EventCreateRequest, EventDelete, EventGet, EventGetUserId,
    EventUpdateRequest, QUERY_DATE_LAYOUT, Window, WindowQuery, parse_query_date,
};
pub use postgres::PgEventRepository;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::EventService;
pub use validation::required_date;
