use crate::{config::Config, doc::ApiDoc, routes, state::AppState};
use axum::{Router, http::HeaderValue};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn cors(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            log::warn!("Ignoring invalid CORS origin {origin:?}: {e}");
            layer
        }
    }
}

/// The full application: API routes, Swagger UI and middleware
pub fn build(state: AppState, config: &Config) -> Router {
    routes::api_router()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(cors(&config.cors_allowed_origin))
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
