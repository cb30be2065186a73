use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Calendar API",
        version = "0.1.0",
        description = "Per-user calendar events with day, week and month views"
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
struct CalendarDoc;

/// Service document: API info plus every domain's paths and schemas
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        CalendarDoc::openapi().merge_from(domain_events::ApiDoc::openapi())
    }
}
