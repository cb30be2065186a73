//! HTTP surface of the events domain.
//!
//! Write and read handlers live apart; both share the service through router state.

mod read;
mod write;

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post, put},
};
use axum_helpers::{
    errors::{
        ErrorResponse,
        handlers::only,
        responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Event, EventCreateRequest, EventDelete, EventGetUserId, EventUpdateRequest};
use crate::repository::EventRepository;
use crate::service::EventService;

pub const TAG: &str = "events";

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(
        write::create_event,
        write::update_event,
        write::delete_event,
        read::events_for_day,
        read::events_for_week,
        read::events_for_month,
    ),
    components(
        schemas(
            Event,
            EventCreateRequest,
            EventUpdateRequest,
            EventDelete,
            EventGetUserId,
            ErrorResponse
        ),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Calendar event endpoints")
    )
)]
pub struct ApiDoc;

/// Create the events router
///
/// Each path accepts exactly one method; any other answers 400.
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/create_event",
            only(Method::POST, post(write::create_event::<R>)),
        )
        .route(
            "/update_event",
            only(Method::PUT, put(write::update_event::<R>)),
        )
        .route(
            "/delete_event",
            only(Method::DELETE, delete(write::delete_event::<R>)),
        )
        .route(
            "/events_for_day",
            only(Method::GET, get(read::events_for_day::<R>)),
        )
        .route(
            "/events_for_week",
            only(Method::GET, get(read::events_for_week::<R>)),
        )
        .route(
            "/events_for_month",
            only(Method::GET, get(read::events_for_month::<R>)),
        )
        .with_state(shared_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EventError;
    use crate::models::EventGet;
    use crate::repository::{InMemoryEventRepository, MockEventRepository};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use sea_orm::DbErr;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        router(EventService::new(InMemoryEventRepository::new()))
    }

    fn request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn raw_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response: Response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn create(app: &Router, user_id: i64, text: &str, date: &str) -> i64 {
        let (status, body) = send(
            app,
            request(
                Method::POST,
                "/create_event",
                json!({ "user_id": user_id, "event": text, "date": date }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["result"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_create_then_read_week() {
        let app = app();
        let id = create(&app, 1, "Standup", "2026-01-22T09:00:00Z").await;
        assert!(id > 0);

        let (status, body) = send(
            &app,
            request(
                Method::GET,
                "/events_for_week?date=2026-01-22T00:00:00Z",
                json!({ "user_id": 1 }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "result": [
                { "id": id, "user_id": 1, "event": "Standup", "date": "2026-01-22T09:00:00Z" }
            ]})
        );
    }

    #[tokio::test]
    async fn test_window_widths() {
        let app = app();
        create(&app, 1, "edge of day", "2026-01-23T00:00:00Z").await;
        create(&app, 1, "past day", "2026-01-23T00:00:01Z").await;
        create(&app, 1, "edge of week", "2026-01-29T00:00:00Z").await;
        create(&app, 1, "edge of month", "2026-02-21T00:00:00Z").await;
        create(&app, 1, "past month", "2026-02-21T00:00:01Z").await;

        let cases = [
            ("/events_for_day", vec!["edge of day"]),
            (
                "/events_for_week",
                vec!["edge of day", "past day", "edge of week"],
            ),
            (
                "/events_for_month",
                vec!["edge of day", "past day", "edge of week", "edge of month"],
            ),
        ];

        for (path, expected) in cases {
            let uri = format!("{}?date=2026-01-22T00:00:00Z", path);
            let (status, body) =
                send(&app, request(Method::GET, &uri, json!({ "user_id": 1 }))).await;
            assert_eq!(status, StatusCode::OK, "{}", path);

            let texts: Vec<&str> = body["result"]
                .as_array()
                .unwrap()
                .iter()
                .map(|e| e["event"].as_str().unwrap())
                .collect();
            assert_eq!(texts, expected, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_read_never_returns_other_users_events() {
        let app = app();
        create(&app, 2, "not mine", "2026-01-22T10:00:00Z").await;

        let (status, body) = send(
            &app,
            request(
                Method::GET,
                "/events_for_day?date=2026-01-22T00:00:00Z",
                json!({ "user_id": 1 }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": [] }));
    }

    #[tokio::test]
    async fn test_update_existing_event() {
        let app = app();
        let id = create(&app, 1, "Standup", "2026-01-22T09:00:00Z").await;

        let (status, body) = send(
            &app,
            request(
                Method::PUT,
                "/update_event",
                json!({ "id": id, "user_id": 1, "event": "Retro", "date": "2026-01-22T15:00:00Z" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": id }));

        let (_, body) = send(
            &app,
            request(
                Method::GET,
                "/events_for_day?date=2026-01-22T00:00:00Z",
                json!({ "user_id": 1 }),
            ),
        )
        .await;
        assert_eq!(body["result"][0]["event"], "Retro");
        assert_eq!(body["result"][0]["date"], "2026-01-22T15:00:00Z");
    }

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let app = app();
        let id = create(&app, 1, "Standup", "2026-01-22T09:00:00Z").await;

        let (status, body) = send(
            &app,
            request(Method::DELETE, "/delete_event", json!({ "id": id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": id }));

        let (status, body) = send(
            &app,
            request(Method::DELETE, "/delete_event", json!({ "id": id })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "event not found" }));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (status, body) = send(
            &app(),
            request(Method::DELETE, "/delete_event", json!({ "id": 9999 })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "event not found" }));
    }

    #[tokio::test]
    async fn test_wrong_method_is_bad_request() {
        let (status, body) = send(
            &app(),
            request(Method::GET, "/create_event", json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "only method POST allowed" }));
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_error() {
        let (status, body) = send(
            &app(),
            request(
                Method::POST,
                "/create_event",
                json!({ "user_id": 1, "date": "2026-01-22T09:00:00Z" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "validation error" }));
    }

    #[tokio::test]
    async fn test_read_requires_date() {
        let app = app();

        for uri in ["/events_for_day", "/events_for_day?date="] {
            let (status, body) =
                send(&app, request(Method::GET, uri, json!({ "user_id": 1 }))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body, json!({ "error": "query string \"date\" is empty" }));
        }
    }

    #[tokio::test]
    async fn test_read_rejects_other_date_layouts() {
        let app = app();

        for date in [
            "2026-01-22",
            "2026-01-22T00:00:00%2B02:00",
            "tomorrow",
            "2026-1-22T09:00:00Z",
            "%2B2026-01-22T09:00:00Z",
            "2026-01-22T09:00:60Z",
        ] {
            let uri = format!("/events_for_month?date={}", date);
            let (status, body) =
                send(&app, request(Method::GET, &uri, json!({ "user_id": 1 }))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", date);
            assert_eq!(body, json!({ "error": "invalid data in query string" }));
        }
    }

    #[tokio::test]
    async fn test_epoch_date_is_accepted() {
        let app = app();
        let id = create(&app, 1, "Unix", "1970-01-01T00:00:00Z").await;

        let (status, body) = send(
            &app,
            request(
                Method::GET,
                "/events_for_day?date=1970-01-01T00:00:00Z",
                json!({ "user_id": 1 }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "result": [
                { "id": id, "user_id": 1, "event": "Unix", "date": "1970-01-01T00:00:00Z" }
            ]})
        );
    }

    #[tokio::test]
    async fn test_update_without_date_is_validation_error() {
        let app = router(EventService::new(MockEventRepository::new()));

        let (status, body) = send(
            &app,
            request(
                Method::PUT,
                "/update_event",
                json!({ "id": 1, "user_id": 1, "event": "Retro" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "validation error" }));
    }

    #[tokio::test]
    async fn test_read_with_invalid_body_never_reaches_repository() {
        let app = router(EventService::new(MockEventRepository::new()));

        let (status, body) = send(
            &app,
            request(
                Method::GET,
                "/events_for_day?date=2026-01-22T00:00:00Z",
                json!({}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "validation error" }));
    }

    #[tokio::test]
    async fn test_read_checks_body_before_query() {
        let (status, body) = send(
            &app(),
            raw_request(Method::GET, "/events_for_day", "{"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "invalid json" }));
    }

    #[tokio::test]
    async fn test_malformed_update_never_reaches_repository() {
        // No expectations: any repository call panics
        let app = router(EventService::new(MockEventRepository::new()));

        let (status, body) = send(
            &app,
            raw_request(Method::PUT, "/update_event", "{\"id\": 1,"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "invalid json" }));
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_get_events().returning(|_: EventGet| {
            Err(EventError::database(
                "repository/get_events",
                DbErr::Custom("connection refused".into()),
            ))
        });
        let app = router(EventService::new(mock_repo));

        let (status, body) = send(
            &app,
            request(
                Method::GET,
                "/events_for_day?date=2026-01-22T00:00:00Z",
                json!({ "user_id": 1 }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "internal error" }));
    }

    #[tokio::test]
    async fn test_create_store_failure_is_internal_error() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create_event().returning(|_| {
            Err(EventError::database(
                "repository/create_event",
                DbErr::Custom("boom".into()),
            ))
        });
        let app = router(EventService::new(mock_repo));

        let (status, _) = send(
            &app,
            request(
                Method::POST,
                "/create_event",
                json!({ "user_id": 1, "event": "Standup", "date": "2026-01-22T09:00:00Z" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/create_event",
            "/update_event",
            "/delete_event",
            "/events_for_day",
            "/events_for_week",
            "/events_for_month",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{}", path);
        }
    }
}
