use utoipa::OpenApi;

/// Base document carrying API metadata and shared schemas; the domain
/// documents are merged in at their declared paths (already absolute
/// relative to the `/api` base).
#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse)),
    info(
        title = "AdVolcano Site API",
        version = "0.1.0",
        description = "Contact, demo request and payment endpoints for the marketing site"
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
struct BaseApiDoc;

pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseApiDoc::openapi();
        doc.merge(domain_forms::handlers::ApiDoc::openapi());
        doc.merge(domain_payments::handlers::ApiDoc::openapi());
        doc
    }
}
