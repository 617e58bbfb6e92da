use axum::Json;
use serde_json::{Value, json};

/// Service name and where to find the API documentation
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = Object)
    ),
    tag = "Health"
)]
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "restaurant-api",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/docs",
    }))
}
