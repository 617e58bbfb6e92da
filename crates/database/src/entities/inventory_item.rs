use models::inventory::{StockError, StockLevels};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub current_stock: i32,
    pub min_stock_level: i32,
    pub max_stock_level: i32,
    pub unit: String, // kg, pieces, liters
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cost_per_unit: Decimal,
    pub supplier: String,
    pub last_updated: DateTimeUtc,
}

impl Model {
    pub fn levels(&self) -> Result<StockLevels, StockError> {
        StockLevels::new(
            self.current_stock,
            self.min_stock_level,
            self.max_stock_level,
        )
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_movement::Entity")]
    StockMovements,
}

impl Related<super::stock_movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
