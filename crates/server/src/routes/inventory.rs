use crate::{
    auth::CurrentUser,
    dtos::inventory::{InventoryItemResponse, MovementResultResponse},
    error::AppResult,
    extract::AppJson,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use database::services::InventoryService;
use models::inventory::{
    InventoryAlert, InventoryItemInput, InventoryItemUpdate, StockMovementInput,
};
use uuid::Uuid;

/// List stock items by category and name
#[utoipa::path(
    get,
    path = "/api/inventory",
    responses(
        (status = 200, description = "Inventory items", body = [InventoryItemResponse]),
        (status = 403, description = "Staff or admin only")
    ),
    security(("jwt" = [])),
    tag = "Inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<InventoryItemResponse>>> {
    user.require_inventory_access()?;

    let items = InventoryService::list(&state.db).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Add a stock item
#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = InventoryItemInput,
    responses(
        (status = 200, description = "Item created", body = InventoryItemResponse),
        (status = 400, description = "Negative stock or minimum above maximum"),
        (status = 403, description = "Staff or admin only")
    ),
    security(("jwt" = [])),
    tag = "Inventory"
)]
pub async fn create_inventory_item(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(input): AppJson<InventoryItemInput>,
) -> AppResult<Json<InventoryItemResponse>> {
    user.require_inventory_access()?;

    let item = InventoryService::create(&state.db, input).await?;
    Ok(Json(item.into()))
}

/// Edit an item's description or thresholds
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    params(("id" = Uuid, Path, description = "Inventory item ID")),
    request_body = InventoryItemUpdate,
    responses(
        (status = 200, description = "Item updated", body = InventoryItemResponse),
        (status = 400, description = "Minimum above maximum"),
        (status = 404, description = "Item not found")
    ),
    security(("jwt" = [])),
    tag = "Inventory"
)]
pub async fn update_inventory_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(changes): AppJson<InventoryItemUpdate>,
) -> AppResult<Json<InventoryItemResponse>> {
    user.require_inventory_access()?;

    let item = InventoryService::update(&state.db, id, changes).await?;
    Ok(Json(item.into()))
}

/// Record a delivery, consumption or stock count
#[utoipa::path(
    post,
    path = "/api/inventory/{id}/movements",
    params(("id" = Uuid, Path, description = "Inventory item ID")),
    request_body = StockMovementInput,
    responses(
        (status = 200, description = "Movement recorded", body = MovementResultResponse),
        (status = 400, description = "Negative quantity or not enough stock"),
        (status = 404, description = "Item not found")
    ),
    security(("jwt" = [])),
    tag = "Inventory"
)]
pub async fn record_movement(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(movement): AppJson<StockMovementInput>,
) -> AppResult<Json<MovementResultResponse>> {
    user.require_inventory_access()?;

    let (item, movement) = InventoryService::record_movement(&state.db, id, movement, user.id).await?;
    Ok(Json(MovementResultResponse {
        item: item.into(),
        movement: movement.into(),
    }))
}

/// Items that are out of stock, running low or overstocked
#[utoipa::path(
    get,
    path = "/api/inventory/alerts",
    responses(
        (status = 200, description = "Alerts, most urgent first", body = [InventoryAlert]),
        (status = 403, description = "Staff or admin only")
    ),
    security(("jwt" = [])),
    tag = "Inventory"
)]
pub async fn inventory_alerts(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<InventoryAlert>>> {
    user.require_inventory_access()?;
    Ok(Json(InventoryService::alerts(&state.db).await?))
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use axum::http::StatusCode;
    use chrono::Utc;
    use database::entities::inventory_items;
    use models::user::UserRole;
    use rust_decimal::Decimal;
    use sea_orm::MockExecResult;
    use serde_json::json;
    use uuid::Uuid;

    fn item(name: &str, current: i32) -> inventory_items::Model {
        inventory_items::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: "Légumes".to_string(),
            current_stock: current,
            min_stock_level: 10,
            max_stock_level: 50,
            unit: "kg".to_string(),
            cost_per_unit: Decimal::new(250, 2),
            supplier: "Primeur".to_string(),
            last_updated: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_clients_cannot_see_stock() {
        let app = TestApp::with_db(|db| db);
        let token = app.token(Uuid::new_v4(), UserRole::Client);

        let (status, _) = app.get("/api/inventory", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_staff_reads_alerts() {
        let app = TestApp::with_db(|db| {
            db.append_query_results([vec![item("Tomates", 0), item("Oignons", 30), item("Salade", 4)]])
        });
        let token = app.token(Uuid::new_v4(), UserRole::Staff);

        let (status, body) = app.get("/api/inventory/alerts", Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        let alerts = body.as_array().unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0]["item_name"], "Tomates");
        assert_eq!(alerts[0]["alert_type"], "out_of_stock");
        assert_eq!(alerts[1]["priority"], "high");
    }

    #[tokio::test]
    async fn test_movement_updates_level() {
        let tomatoes = item("Tomates", 12);
        let id = tomatoes.id;
        let app = TestApp::with_db(|db| {
            db.append_query_results([vec![tomatoes]]).append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
        });
        let token = app.token(Uuid::new_v4(), UserRole::Staff);

        let (status, body) = app
            .post(
                &format!("/api/inventory/{id}/movements"),
                Some(&token),
                json!({"movement_type": "out", "quantity": 5, "reason": "Service du soir"}),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item"]["current_stock"], 7);
        assert_eq!(body["movement"]["movement_type"], "out");
    }

    #[tokio::test]
    async fn test_overdraw_is_bad_request() {
        let tomatoes = item("Tomates", 2);
        let id = tomatoes.id;
        let app = TestApp::with_db(|db| db.append_query_results([vec![tomatoes]]));
        let token = app.token(Uuid::new_v4(), UserRole::Admin);

        let (status, _) = app
            .post(
                &format!("/api/inventory/{id}/movements"),
                Some(&token),
                json!({"movement_type": "out", "quantity": 5}),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_levels() {
        let app = TestApp::with_db(|db| db);
        let token = app.token(Uuid::new_v4(), UserRole::Admin);

        let (status, _) = app
            .post(
                "/api/inventory",
                Some(&token),
                json!({
                    "name": "Farine",
                    "category": "Sec",
                    "current_stock": 5,
                    "min_stock_level": 20,
                    "max_stock_level": 10,
                    "unit": "kg",
                    "cost_per_unit": 1.2
                }),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
