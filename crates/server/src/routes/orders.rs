use crate::{
    auth::CurrentUser,
    dtos::order::{CreateOrderRequest, OrderStatusQuery},
    error::{AppError, AppResult},
    extract::{AppJson, AppQuery},
    integrations::pdf,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use database::services::{OrderService, UserService};
use models::order::Order;
use uuid::Uuid;

async fn load_visible(state: &AppState, user: &CurrentUser, id: Uuid) -> AppResult<Order> {
    let order = OrderService::find(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))?;

    user.require_owner_or_admin(order.user_id)?;
    Ok(order)
}

/// Place an order
///
/// The total is computed from the item lines; a client supplied total is ignored.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = Order),
        (status = 400, description = "Empty order or non-positive quantity"),
        (status = 401, description = "Not authenticated")
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(request): AppJson<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    let order = OrderService::create(&state.db, user.id, request.items).await?;

    if let Some(claimed) = request.total
        && claimed != order.total
    {
        log::warn!(
            "Order {} claimed total {claimed}, computed {}",
            order.id,
            order.total
        );
    }

    Ok(Json(order))
}

/// List orders: all of them for admins, the caller's own otherwise
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Orders, newest first", body = [Order]),
        (status = 401, description = "Not authenticated")
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let owner = (!user.is_admin()).then_some(user.id);
    Ok(Json(OrderService::list(&state.db, owner).await?))
}

/// Get one order
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Order not found")
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    Ok(Json(load_visible(&state, &user, id).await?))
}

/// Move an order to another status
#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Order ID"),
        OrderStatusQuery
    ),
    responses(
        (status = 200, description = "Status updated", body = Order),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Order not found")
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    AppQuery(query): AppQuery<OrderStatusQuery>,
) -> AppResult<Json<Order>> {
    user.require_admin()?;
    Ok(Json(OrderService::set_status(&state.db, id, query.status).await?))
}

/// Download the invoice of an order
#[utoipa::path(
    get,
    path = "/api/orders/{id}/invoice",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Invoice", content_type = "application/pdf", body = Vec<u8>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Order not found")
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let order = load_visible(&state, &user, id).await?;
    let customer = UserService::find_by_id(&state.db, order.user_id)
        .await?
        .map(|u| format!("{} <{}>", u.name, u.email))
        .unwrap_or_else(|| order.user_id.to_string());

    let bytes = pdf::invoice(&order, &customer)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"invoice-{}.pdf\"", order.id.simple()),
            ),
        ],
        bytes,
    ))
}
