use axum::extract::{Query, State, rejection::QueryRejection};
use axum_helpers::{
    ResultResponse, ValidatedJson,
    errors::{
        AppError, messages,
        responses::{BadRequestResponse, InternalServerErrorResponse},
    },
};
use std::sync::Arc;
use tracing::instrument;

use super::TAG;
use crate::error::EventError;
use crate::models::{Event, EventGet, EventGetUserId, Window, WindowQuery, parse_query_date};
use crate::repository::EventRepository;
use crate::service::EventService;

type WindowParams = Result<Query<WindowQuery>, QueryRejection>;

/// Events of a user in `[date, date + 24h]`
#[utoipa::path(
    get,
    path = "/events_for_day",
    tag = TAG,
    params(WindowQuery),
    request_body = EventGetUserId,
    responses(
        (status = 200, description = "Events in the window, ascending by date", body = ResultResponse<Vec<Event>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn events_for_day<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    params: WindowParams,
    ValidatedJson(body): ValidatedJson<EventGetUserId>,
) -> Result<ResultResponse<Vec<Event>>, AppError> {
    events_for_window(&service, body, params, Window::Day).await
}

/// Events of a user in `[date, date + 168h]`
#[utoipa::path(
    get,
    path = "/events_for_week",
    tag = TAG,
    params(WindowQuery),
    request_body = EventGetUserId,
    responses(
        (status = 200, description = "Events in the window, ascending by date", body = ResultResponse<Vec<Event>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn events_for_week<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    params: WindowParams,
    ValidatedJson(body): ValidatedJson<EventGetUserId>,
) -> Result<ResultResponse<Vec<Event>>, AppError> {
    events_for_window(&service, body, params, Window::Week).await
}

/// Events of a user in `[date, date + 720h]`
#[utoipa::path(
    get,
    path = "/events_for_month",
    tag = TAG,
    params(WindowQuery),
    request_body = EventGetUserId,
    responses(
        (status = 200, description = "Events in the window, ascending by date", body = ResultResponse<Vec<Event>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn events_for_month<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    params: WindowParams,
    ValidatedJson(body): ValidatedJson<EventGetUserId>,
) -> Result<ResultResponse<Vec<Event>>, AppError> {
    events_for_window(&service, body, params, Window::Month).await
}

/// Shared body of the window endpoints; the query string is only looked at
/// once the JSON body has passed validation.
#[instrument(skip(service, params), fields(user_id = body.user_id))]
async fn events_for_window<R: EventRepository>(
    service: &EventService<R>,
    body: EventGetUserId,
    params: WindowParams,
    window: Window,
) -> Result<ResultResponse<Vec<Event>>, AppError> {
    let Query(params) = params.map_err(|e| {
        tracing::info!(error = %e, "Rejected query string");
        AppError::InvalidQuery(messages::INVALID_QUERY.to_string())
    })?;

    let query = window_query(body.user_id, params.date.as_deref(), window)?;
    let events = service.get_events(query).await?;

    Ok(ResultResponse::new(events))
}

fn window_query(user_id: i64, date: Option<&str>, window: Window) -> Result<EventGet, EventError> {
    let raw = match date {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(EventError::MissingDate),
    };

    let invalid = || EventError::InvalidDate {
        value: raw.to_string(),
    };

    let date_from = parse_query_date(raw).ok_or_else(invalid)?;
    EventGet::for_window(user_id, date_from, window).ok_or_else(invalid)
}
