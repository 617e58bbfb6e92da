use crate::{
    entities::{inventory_items, stock_movements},
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use models::inventory::{
    InventoryAlert, InventoryItemInput, InventoryItemUpdate, StockLevels, StockMovementInput,
    apply_movement, sort_alerts,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

pub struct InventoryService;

impl InventoryService {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<inventory_items::Model>, DbErr> {
        inventory_items::Entity::find()
            .order_by_asc(inventory_items::Column::Category)
            .order_by_asc(inventory_items::Column::Name)
            .all(db)
            .await
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: InventoryItemInput,
    ) -> ServiceResult<inventory_items::Model> {
        input
            .levels()
            .map_err(|e| ServiceError::Invalid(e.to_string()))?;

        let item = inventory_items::Model {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            current_stock: input.current_stock,
            min_stock_level: input.min_stock_level,
            max_stock_level: input.max_stock_level,
            unit: input.unit,
            cost_per_unit: input.cost_per_unit,
            supplier: input.supplier,
            last_updated: Utc::now(),
        };

        inventory_items::Entity::insert(item.clone().into_active_model().reset_all())
            .exec_without_returning(db)
            .await?;

        Ok(item)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        changes: InventoryItemUpdate,
    ) -> ServiceResult<inventory_items::Model> {
        let mut item = inventory_items::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("Inventory item"))?;

        if let Some(name) = changes.name {
            item.name = name;
        }
        if let Some(category) = changes.category {
            item.category = category;
        }
        if let Some(min) = changes.min_stock_level {
            item.min_stock_level = min;
        }
        if let Some(max) = changes.max_stock_level {
            item.max_stock_level = max;
        }
        if let Some(unit) = changes.unit {
            item.unit = unit;
        }
        if let Some(cost) = changes.cost_per_unit {
            item.cost_per_unit = cost;
        }
        if let Some(supplier) = changes.supplier {
            item.supplier = supplier;
        }
        item.levels()
            .map_err(|e| ServiceError::Invalid(e.to_string()))?;
        item.last_updated = Utc::now();

        inventory_items::Entity::update_many()
            .set(item.clone().into_active_model().reset_all())
            .filter(inventory_items::Column::Id.eq(id))
            .exec(db)
            .await?;

        Ok(item)
    }

    /// Applies a stock movement and records it, atomically
    ///
    /// The item row is locked for the duration so concurrent movements on
    /// the same item serialize.
    pub async fn record_movement(
        db: &DatabaseConnection,
        item_id: Uuid,
        movement: StockMovementInput,
        user_id: Uuid,
    ) -> ServiceResult<(inventory_items::Model, stock_movements::Model)> {
        let txn = db.begin().await?;

        let mut item = inventory_items::Entity::find_by_id(item_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("Inventory item"))?;

        let new_level = apply_movement(item.current_stock, movement.movement_type, movement.quantity)
            .map_err(|e| ServiceError::Invalid(e.to_string()))?;

        let now = Utc::now();
        item.current_stock = new_level;
        item.last_updated = now;

        let record = stock_movements::Model {
            id: Uuid::new_v4(),
            inventory_item_id: item_id,
            movement_type: movement.movement_type,
            quantity: movement.quantity,
            reason: movement.reason,
            user_id,
            timestamp: now,
        };

        inventory_items::Entity::update_many()
            .set(item.clone().into_active_model().reset_all())
            .filter(inventory_items::Column::Id.eq(item_id))
            .exec(&txn)
            .await?;
        stock_movements::Entity::insert(record.clone().into_active_model().reset_all())
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;

        log::info!(
            "Stock movement {} of {} on {}, level now {}",
            record.movement_type,
            record.quantity,
            item.name,
            item.current_stock
        );
        Ok((item, record))
    }

    /// Items whose stock crosses a threshold, most urgent first
    pub async fn alerts(db: &DatabaseConnection) -> ServiceResult<Vec<InventoryAlert>> {
        let items = Self::list(db).await?;

        let mut alerts = Vec::new();
        for item in &items {
            let levels = match item.levels() {
                Ok(levels) => levels,
                Err(e) => {
                    log::warn!("Skipping inventory item {} with bad levels: {e}", item.id);
                    continue;
                }
            };
            alerts.extend(InventoryAlert::check(
                item.id,
                &item.name,
                &item.unit,
                &levels,
            ));
        }

        sort_alerts(&mut alerts);
        Ok(alerts)
    }

    /// Current levels keyed by item name, for forecasting
    pub async fn levels(db: &DatabaseConnection) -> Result<Vec<(String, StockLevels)>, DbErr> {
        Ok(Self::list(db)
            .await?
            .into_iter()
            .filter_map(|item| item.levels().ok().map(|levels| (item.name, levels)))
            .collect())
    }
}
