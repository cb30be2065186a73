//! PostgreSQL-backed [`EventRepository`] issuing raw parameterized SQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventCreate, EventGet};
use crate::repository::EventRepository;

const INSERT_EVENT: &str = "INSERT INTO events (user_id, event, date) VALUES ($1, $2, $3) RETURNING id";
const UPDATE_EVENT: &str = "UPDATE events SET user_id = $1, event = $2, date = $3 WHERE id = $4";
const DELETE_EVENT: &str = "DELETE FROM events WHERE id = $1";
const SELECT_EVENTS: &str = "SELECT id, user_id, event, date FROM events \
     WHERE user_id = $1 AND date >= $2 AND date <= $3 ORDER BY date";

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    db: DatabaseConnection,
}

impl PgEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct InsertedId {
    id: i64,
}

#[derive(Debug, FromQueryResult)]
struct EventRow {
    id: i64,
    user_id: i64,
    event: String,
    date: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            user_id: row.user_id,
            event: row.event,
            date: row.date,
        }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create_event(&self, input: EventCreate) -> EventResult<i64> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            INSERT_EVENT,
            [input.user_id.into(), input.event.into(), input.date.into()],
        );

        let row = InsertedId::find_by_statement(stmt)
            .one(&self.db)
            .await
            .and_then(|row| row.ok_or(DbErr::RecordNotInserted))
            .map_err(|e| EventError::database("repository/create_event", e))?;

        tracing::debug!(event_id = row.id, "Inserted event");
        Ok(row.id)
    }

    async fn update_event(&self, event: Event) -> EventResult<i64> {
        let id = event.id;
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            UPDATE_EVENT,
            [
                event.user_id.into(),
                event.event.into(),
                event.date.into(),
                id.into(),
            ],
        );

        self.db
            .execute_raw(stmt)
            .await
            .map_err(|e| EventError::database("repository/update_event", e))?;

        Ok(id)
    }

    async fn delete_event(&self, id: i64) -> EventResult<()> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, DELETE_EVENT, [id.into()]);

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(|e| EventError::database("repository/delete_event", e))?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound);
        }

        Ok(())
    }

    async fn get_events(&self, query: EventGet) -> EventResult<Vec<Event>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            SELECT_EVENTS,
            [
                query.user_id.into(),
                query.date_from.into(),
                query.date_to.into(),
            ],
        );

        let rows = EventRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| EventError::database("repository/get_events", e))?;

        Ok(rows.into_iter().map(Event::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::Window;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 22, 0, 0, 0).unwrap()
    }

    fn event_row(id: i64, text: &str, date: DateTime<Utc>) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("id", Value::from(id)),
            ("user_id", Value::from(1i64)),
            ("event", Value::from(text.to_string())),
            ("date", Value::from(date)),
        ])
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn create_input() -> EventCreate {
        EventCreate {
            user_id: 1,
            event: "Standup".to_string(),
            date: anchor(),
        }
    }

    #[tokio::test]
    async fn test_create_returns_generated_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("id", Value::from(17i64))])]])
            .into_connection();
        let repo = PgEventRepository::new(db);

        assert_eq!(repo.create_event(create_input()).await.unwrap(), 17);
    }

    #[tokio::test]
    async fn test_create_without_returned_row_is_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let err = repo.create_event(create_input()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().starts_with("repository/create_event - "));
    }

    #[tokio::test]
    async fn test_create_store_failure_is_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let err = repo.create_event(create_input()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_update_ignores_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let id = repo
            .update_event(Event {
                id: 99,
                user_id: 1,
                event: "Standup".to_string(),
                date: anchor(),
            })
            .await
            .unwrap();
        assert_eq!(id, 99);
    }

    #[tokio::test]
    async fn test_update_store_failure_carries_operation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("boom".into())])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let err = repo
            .update_event(Event {
                id: 1,
                user_id: 1,
                event: "Standup".to_string(),
                date: anchor(),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("repository/update_event - "));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1)])
            .into_connection();
        let repo = PgEventRepository::new(db);

        assert!(repo.delete_event(5).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_zero_rows_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let err = repo.delete_event(5).await.unwrap_err();
        assert!(matches!(err, EventError::NotFound));
    }

    #[tokio::test]
    async fn test_get_events_maps_rows_in_order() {
        let later = anchor() + chrono::TimeDelta::hours(5);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                event_row(2, "Standup", anchor()),
                event_row(1, "Retro", later),
            ]])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let query = EventGet::for_window(1, anchor(), Window::Day).unwrap();
        let events = repo.get_events(query).await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, 2);
        assert_eq!(events[0].date, anchor());
        assert_eq!(events[1].event, "Retro");
        assert_eq!(events[1].date, later);
    }

    #[tokio::test]
    async fn test_get_events_empty_result() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let query = EventGet::for_window(1, anchor(), Window::Week).unwrap();
        assert!(repo.get_events(query).await.unwrap().is_empty());
    }
}
