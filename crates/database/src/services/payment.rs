use crate::{
    entities::payments,
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use models::payment::{PaymentMethod, PaymentStatus};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, sea_query::Expr,
};
use uuid::Uuid;

pub struct PaymentService;

impl PaymentService {
    pub async fn create(
        db: &DatabaseConnection,
        order_id: Uuid,
        amount: Decimal,
        currency: String,
        method: PaymentMethod,
        gateway_intent_id: Option<String>,
        status: PaymentStatus,
    ) -> Result<payments::Model, DbErr> {
        let payment = payments::Model {
            id: Uuid::new_v4(),
            order_id,
            amount,
            currency,
            payment_method: method,
            gateway_intent_id,
            status,
            created_at: Utc::now(),
        };

        payments::Entity::insert(payment.clone().into_active_model().reset_all())
            .exec_without_returning(db)
            .await?;

        log::info!(
            "Recorded {} payment {} of {} {} for order {order_id}",
            payment.payment_method,
            payment.id,
            payment.amount,
            payment.currency
        );
        Ok(payment)
    }

    pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<payments::Model>, DbErr> {
        payments::Entity::find_by_id(id).one(db).await
    }

    pub async fn set_status(
        db: &DatabaseConnection,
        id: Uuid,
        status: PaymentStatus,
    ) -> ServiceResult<()> {
        let result = payments::Entity::update_many()
            .col_expr(payments::Column::Status, Expr::value(status))
            .filter(payments::Column::Id.eq(id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("Payment"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_set_status_on_missing_payment() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let result = PaymentService::set_status(&db, Uuid::new_v4(), PaymentStatus::Refunded).await;
        assert!(matches!(result, Err(ServiceError::NotFound("Payment"))));
    }
}
