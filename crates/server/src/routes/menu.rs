use crate::{
    auth::CurrentUser,
    dtos::menu::MenuItemResponse,
    error::AppResult,
    extract::AppJson,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::MenuService;
use models::menu::{MenuItemInput, MenuItemUpdate};
use uuid::Uuid;

/// List the items currently on the menu
#[utoipa::path(
    get,
    path = "/api/menu",
    responses(
        (status = 200, description = "Available menu items", body = [MenuItemResponse])
    ),
    tag = "Menu"
)]
pub async fn list_menu(State(state): State<AppState>) -> AppResult<Json<Vec<MenuItemResponse>>> {
    let items = MenuService::list_available(&state.db).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// List the categories of available items
#[utoipa::path(
    get,
    path = "/api/menu/categories",
    responses(
        (status = 200, description = "Distinct categories", body = [String])
    ),
    tag = "Menu"
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(MenuService::categories(&state.db).await?))
}

/// Add a menu item
#[utoipa::path(
    post,
    path = "/api/menu",
    request_body = MenuItemInput,
    responses(
        (status = 200, description = "Item created", body = MenuItemResponse),
        (status = 400, description = "Negative price or empty name"),
        (status = 403, description = "Admin only")
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn create_menu_item(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(input): AppJson<MenuItemInput>,
) -> AppResult<Json<MenuItemResponse>> {
    user.require_admin()?;
    Ok(Json(MenuService::create(&state.db, input).await?.into()))
}

/// Change a menu item
#[utoipa::path(
    put,
    path = "/api/menu/{id}",
    params(("id" = Uuid, Path, description = "Menu item ID")),
    request_body = MenuItemUpdate,
    responses(
        (status = 200, description = "Item updated", body = MenuItemResponse),
        (status = 400, description = "Negative price or empty name"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Menu item not found")
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn update_menu_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(changes): AppJson<MenuItemUpdate>,
) -> AppResult<Json<MenuItemResponse>> {
    user.require_admin()?;
    Ok(Json(MenuService::update(&state.db, id, changes).await?.into()))
}

/// Remove a menu item
#[utoipa::path(
    delete,
    path = "/api/menu/{id}",
    params(("id" = Uuid, Path, description = "Menu item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Menu item not found")
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    user.require_admin()?;
    MenuService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use axum::http::StatusCode;
    use chrono::Utc;
    use database::entities::menu_items;
    use models::user::UserRole;
    use rust_decimal::Decimal;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_public_menu_listing() {
        let salad = menu_items::Model {
            id: Uuid::new_v4(),
            name: "Salade César".to_string(),
            description: String::new(),
            price: Decimal::new(950, 2),
            category: "Entrées".to_string(),
            image_url: String::new(),
            available: true,
            created_at: Utc::now(),
        };
        let app = TestApp::with_db(|db| db.append_query_results([vec![salad]]));

        let (status, body) = app.get("/api/menu", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Salade César");
        assert_eq!(body[0]["price"], 9.5);
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let app = TestApp::with_db(|db| db);
        let token = app.token(Uuid::new_v4(), UserRole::Client);
        let item = json!({"name": "Soupe", "price": 6.0, "category": "Entrées"});

        let (status, _) = app.post("/api/menu", Some(&token), item.clone()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.post("/api/menu", None, item).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_negative_price_is_bad_request() {
        let app = TestApp::with_db(|db| db);
        let token = app.token(Uuid::new_v4(), UserRole::Admin);

        let (status, body) = app
            .post(
                "/api/menu",
                Some(&token),
                json!({"name": "Soupe", "price": -1.0, "category": "Entrées"}),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }
}
