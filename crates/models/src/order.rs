use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Kitchen lifecycle of an order
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

#[cfg(feature = "database")]
string_column!(OrderStatus);

/// One line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub menu_item_id: Uuid,
    /// Menu item name at the time of ordering
    #[serde(default)]
    pub name: String,
    pub quantity: i32,
    /// Unit price
    pub price: Decimal,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Sum of all line totals
pub fn order_total(items: &[OrderItem]) -> Decimal {
    items.iter().map(OrderItem::line_total).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// A new `pending` order whose total is computed from its lines
    pub fn new(user_id: Uuid, items: Vec<OrderItem>) -> Self {
        let total = order_total(&items);

        Self {
            id: Uuid::new_v4(),
            user_id,
            items,
            total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// Checks the lines of a new order
pub fn validate_items(items: &[OrderItem]) -> Result<(), String> {
    if items.is_empty() {
        return Err("An order needs at least one item".to_string());
    }
    for item in items {
        if item.quantity <= 0 {
            return Err(format!(
                "Quantity must be positive, got {} for {}",
                item.quantity, item.menu_item_id
            ));
        }
        if item.price.is_sign_negative() && !item.price.is_zero() {
            return Err(format!("Price must not be negative for {}", item.menu_item_id));
        }
    }
    Ok(())
}
