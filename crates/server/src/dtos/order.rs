use models::order::{OrderItem, OrderStatus};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
    /// Ignored; the total is recomputed from the items
    pub total: Option<Decimal>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderStatusQuery {
    pub status: OrderStatus,
}
