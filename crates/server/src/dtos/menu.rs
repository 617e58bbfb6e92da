use chrono::{DateTime, Utc};
use database::entities::menu_items;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<menu_items::Model> for MenuItemResponse {
    fn from(item: menu_items::Model) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            category: item.category,
            image_url: item.image_url,
            available: item.available,
            created_at: item.created_at,
        }
    }
}
