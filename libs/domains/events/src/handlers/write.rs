use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_helpers::{
    ResultResponse, ValidatedJson,
    errors::{
        AppError,
        responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
    },
};
use std::sync::Arc;
use tracing::instrument;

use super::TAG;
use crate::models::{Event, EventCreate, EventCreateRequest, EventDelete, EventUpdateRequest};
use crate::repository::EventRepository;
use crate::service::EventService;

/// Create an event
#[utoipa::path(
    post,
    path = "/create_event",
    tag = TAG,
    request_body = EventCreateRequest,
    responses(
        (status = 201, description = "Event created, id assigned by the store", body = ResultResponse<i64>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = input.user_id))]
pub async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    ValidatedJson(input): ValidatedJson<EventCreateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = service.create_event(EventCreate::try_from(input)?).await?;
    Ok((StatusCode::CREATED, ResultResponse::new(id)))
}

/// Update every field of an event
#[utoipa::path(
    put,
    path = "/update_event",
    tag = TAG,
    request_body = EventUpdateRequest,
    responses(
        (status = 200, description = "Event updated", body = ResultResponse<i64>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip_all, fields(event_id = event.id))]
pub async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    ValidatedJson(event): ValidatedJson<EventUpdateRequest>,
) -> Result<ResultResponse<i64>, AppError> {
    let id = service.update_event(Event::try_from(event)?).await?;
    Ok(ResultResponse::new(id))
}

/// Delete an event by id
#[utoipa::path(
    delete,
    path = "/delete_event",
    tag = TAG,
    request_body = EventDelete,
    responses(
        (status = 200, description = "Event deleted, echoes the id", body = ResultResponse<i64>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip_all, fields(event_id = input.id))]
pub async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    ValidatedJson(input): ValidatedJson<EventDelete>,
) -> Result<ResultResponse<i64>, AppError> {
    service.delete_event(input.id).await?;
    Ok(ResultResponse::new(input.id))
}
