use chrono::{DateTime, Utc};
use database::entities::{inventory_items, stock_movements};
use models::inventory::MovementType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemResponse {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub current_stock: i32,
    pub min_stock_level: i32,
    pub max_stock_level: i32,
    pub unit: String,
    pub cost_per_unit: Decimal,
    pub supplier: String,
    pub last_updated: DateTime<Utc>,
}

impl From<inventory_items::Model> for InventoryItemResponse {
    fn from(item: inventory_items::Model) -> Self {
        Self {
            id: item.id,
            name: item.name,
            category: item.category,
            current_stock: item.current_stock,
            min_stock_level: item.min_stock_level,
            max_stock_level: item.max_stock_level,
            unit: item.unit,
            cost_per_unit: item.cost_per_unit,
            supplier: item.supplier,
            last_updated: item.last_updated,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StockMovementResponse {
    pub id: Uuid,
    pub inventory_item_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub reason: String,
    pub user_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl From<stock_movements::Model> for StockMovementResponse {
    fn from(movement: stock_movements::Model) -> Self {
        Self {
            id: movement.id,
            inventory_item_id: movement.inventory_item_id,
            movement_type: movement.movement_type,
            quantity: movement.quantity,
            reason: movement.reason,
            user_id: movement.user_id,
            timestamp: movement.timestamp,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovementResultResponse {
    pub item: InventoryItemResponse,
    pub movement: StockMovementResponse,
}
