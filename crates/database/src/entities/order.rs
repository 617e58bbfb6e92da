use models::order::{Order, OrderItem, OrderStatus};
use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    /// Serialized `Vec<OrderItem>`
    pub items: Json,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Order {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let items: Vec<OrderItem> = serde_json::from_value(model.items)
            .map_err(|e| DbErr::Type(format!("Malformed items on order {}: {e}", model.id)))?;

        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            items,
            total: model.total,
            status: model.status,
            created_at: model.created_at,
        })
    }
}

impl TryFrom<&Order> for ActiveModel {
    type Error = DbErr;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        let items = serde_json::to_value(&order.items)
            .map_err(|e| DbErr::Type(format!("Cannot serialize order items: {e}")))?;

        Ok(Self {
            id: Set(order.id),
            user_id: Set(order.user_id),
            items: Set(items),
            total: Set(order.total),
            status: Set(order.status),
            created_at: Set(order.created_at),
        })
    }
}
