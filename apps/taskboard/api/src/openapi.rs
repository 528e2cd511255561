use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse)),
    info(
        title = "Taskboard API",
        version = "0.1.0",
        description = "Tasks with priorities, deadlines, progress, categories, tags and reminders"
    ),
    servers((url = "/api/v1", description = "Default API prefix")),
    nest(
        (path = "/tasks", api = domain_tasks::TasksApiDoc),
        (path = "/progress", api = domain_tasks::ProgressApiDoc),
        (path = "/categories", api = domain_categories::ApiDoc),
        (path = "/tags", api = domain_tags::ApiDoc),
        (path = "/reminders", api = domain_reminders::ApiDoc),
    )
)]
pub struct ApiDoc;
