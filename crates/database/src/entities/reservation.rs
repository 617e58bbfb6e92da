use models::reservation::{Reservation, ReservationStatus};
use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub table_id: Uuid,
    pub date: DateTimeUtc,
    pub guests: i32,
    pub status: ReservationStatus,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dining_table::Entity",
        from = "Column::TableId",
        to = "super::dining_table::Column::Id"
    )]
    DiningTable,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::dining_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiningTable.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Reservation {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            table_id: model.table_id,
            date: model.date,
            guests: model.guests,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

impl From<&Reservation> for ActiveModel {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: Set(reservation.id),
            user_id: Set(reservation.user_id),
            table_id: Set(reservation.table_id),
            date: Set(reservation.date),
            guests: Set(reservation.guests),
            status: Set(reservation.status),
            created_at: Set(reservation.created_at),
        }
    }
}
