use crate::{
    entities::orders,
    error::{ServiceError, ServiceResult},
};
use chrono::{DateTime, Utc};
use models::order::{Order, OrderItem, OrderStatus, validate_items};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::Expr,
};
use uuid::Uuid;

pub struct OrderService;

impl OrderService {
    /// Stores a new `pending` order; the total is always recomputed from the lines
    pub async fn create(
        db: &DatabaseConnection,
        user_id: Uuid,
        items: Vec<OrderItem>,
    ) -> ServiceResult<Order> {
        validate_items(&items).map_err(ServiceError::Invalid)?;

        let order = Order::new(user_id, items);
        orders::Entity::insert(orders::ActiveModel::try_from(&order)?)
            .exec_without_returning(db)
            .await?;

        log::info!("Order {} created, total {}", order.id, order.total);
        Ok(order)
    }

    pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Order>, DbErr> {
        orders::Entity::find_by_id(id)
            .one(db)
            .await?
            .map(Order::try_from)
            .transpose()
    }

    /// Newest first; all orders when `user_id` is `None`
    pub async fn list(db: &DatabaseConnection, user_id: Option<Uuid>) -> Result<Vec<Order>, DbErr> {
        let mut query = orders::Entity::find().order_by_desc(orders::Column::CreatedAt);
        if let Some(user_id) = user_id {
            query = query.filter(orders::Column::UserId.eq(user_id));
        }

        Self::convert(query.all(db).await?)
    }

    /// The most recent orders of one user
    pub async fn recent_for_user(
        db: &DatabaseConnection,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Order>, DbErr> {
        let models = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .order_by_desc(orders::Column::CreatedAt)
            .limit(limit)
            .all(db)
            .await?;

        Self::convert(models)
    }

    /// Orders created in the half-open range `[from, to)`, oldest first
    pub async fn list_between(
        db: &DatabaseConnection,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Order>, DbErr> {
        let models = orders::Entity::find()
            .filter(orders::Column::CreatedAt.gte(from))
            .filter(orders::Column::CreatedAt.lt(to))
            .order_by_asc(orders::Column::CreatedAt)
            .all(db)
            .await?;

        Self::convert(models)
    }

    pub async fn set_status(
        db: &DatabaseConnection,
        id: Uuid,
        status: OrderStatus,
    ) -> ServiceResult<Order> {
        let mut order = Self::find(db, id)
            .await?
            .ok_or(ServiceError::NotFound("Order"))?;

        orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(status))
            .filter(orders::Column::Id.eq(id))
            .exec(db)
            .await?;

        log::info!("Order {id} moved from {} to {status}", order.status);
        order.status = status;
        Ok(order)
    }

    fn convert(models: Vec<orders::Model>) -> Result<Vec<Order>, DbErr> {
        models.into_iter().map(Order::try_from).collect()
    }
}
