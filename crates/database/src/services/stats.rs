use crate::{
    entities::orders,
    services::{OrderService, UserService},
};
use chrono::Utc;
use models::{
    order::OrderStatus,
    report::{DashboardStats, SalesSummary, day_bounds},
    user::UserRole,
};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
    sea_query::Expr,
};

pub struct StatsService;

impl StatsService {
    pub async fn dashboard(db: &DatabaseConnection) -> Result<DashboardStats, DbErr> {
        let total_orders = orders::Entity::find().count(db).await?;
        let total_users = UserService::count_by_role(db, UserRole::Client).await?;

        let total_revenue: Option<Decimal> = orders::Entity::find()
            .select_only()
            .column_as(Expr::col(orders::Column::Total).sum(), "revenue")
            .filter(orders::Column::Status.ne(OrderStatus::Cancelled))
            .into_tuple()
            .one(db)
            .await?
            .flatten();

        let (start, end) = day_bounds(Utc::now().date_naive());
        let today_orders = orders::Entity::find()
            .filter(orders::Column::CreatedAt.gte(start))
            .filter(orders::Column::CreatedAt.lt(end))
            .count(db)
            .await?;

        Ok(DashboardStats {
            total_orders,
            total_users,
            total_revenue: total_revenue.unwrap_or(Decimal::ZERO).round_dp(2),
            today_orders,
        })
    }

    /// Orders placed today, for the insight prompt
    pub async fn today_summary(
        db: &DatabaseConnection,
    ) -> Result<SalesSummary, DbErr> {
        let (start, end) = day_bounds(Utc::now().date_naive());
        let orders = OrderService::list_between(db, start, end).await?;
        Ok(SalesSummary::from_orders(&orders))
    }
}
