use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scanread API",
        version = "1.0.0",
        description = "Self-hostable OCR endpoint. Upload an image as multipart/form-data and get recognized text back.",
    ),
    paths(
        handlers::health::health_check,
        handlers::ocr::recognize,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        // OCR
        dto::ocr::OcrUploadForm,
        dto::ocr::OcrResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::OcrStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "ocr", description = "Text recognition from uploaded images"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
