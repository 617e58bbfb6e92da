use crate::{
    entities::{dining_tables, reservations},
    error::{ServiceError, ServiceResult},
};
use models::{
    reservation::ReservationStatus,
    table::{TableStatus, TableUpdate},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

pub struct TableService;

impl TableService {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<dining_tables::Model>, DbErr> {
        dining_tables::Entity::find()
            .order_by_asc(dining_tables::Column::Number)
            .all(db)
            .await
    }

    pub async fn find(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<dining_tables::Model>, DbErr> {
        dining_tables::Entity::find_by_id(id).one(db).await
    }

    async fn find_by_number(
        db: &DatabaseConnection,
        number: i32,
    ) -> Result<Option<dining_tables::Model>, DbErr> {
        dining_tables::Entity::find()
            .filter(dining_tables::Column::Number.eq(number))
            .one(db)
            .await
    }

    pub async fn create(
        db: &DatabaseConnection,
        number: i32,
        seats: i32,
    ) -> ServiceResult<dining_tables::Model> {
        if seats <= 0 {
            return Err(ServiceError::Invalid(format!(
                "A table needs at least one seat, got {seats}"
            )));
        }
        if Self::find_by_number(db, number).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Table number {number} already exists"
            )));
        }

        let table = dining_tables::Model {
            id: Uuid::new_v4(),
            number,
            seats,
            status: TableStatus::Available,
        };

        dining_tables::Entity::insert(table.clone().into_active_model().reset_all())
            .exec_without_returning(db)
            .await?;

        log::info!("Created table {number} with {seats} seats");
        Ok(table)
    }

    /// Applies `changes`, refusing to shrink a table below an active booking
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        changes: TableUpdate,
    ) -> ServiceResult<dining_tables::Model> {
        let mut table = Self::find(db, id)
            .await?
            .ok_or(ServiceError::NotFound("Table"))?;

        if let Some(number) = changes.number
            && number != table.number
        {
            if Self::find_by_number(db, number).await?.is_some() {
                return Err(ServiceError::Conflict(format!(
                    "Table number {number} already exists"
                )));
            }
            table.number = number;
        }

        if let Some(seats) = changes.seats {
            if seats <= 0 {
                return Err(ServiceError::Invalid(format!(
                    "A table needs at least one seat, got {seats}"
                )));
            }

            if seats < table.seats {
                let oversized = reservations::Entity::find()
                    .filter(reservations::Column::TableId.eq(id))
                    .filter(reservations::Column::Status.ne(ReservationStatus::Cancelled))
                    .filter(reservations::Column::Guests.gt(seats))
                    .one(db)
                    .await?;

                if let Some(reservation) = oversized {
                    return Err(ServiceError::Conflict(format!(
                        "Reservation {} for {} guests needs more than {seats} seats",
                        reservation.id, reservation.guests
                    )));
                }
            }
            table.seats = seats;
        }

        if let Some(status) = changes.status {
            table.status = status;
        }

        dining_tables::Entity::update_many()
            .set(table.clone().into_active_model().reset_all())
            .filter(dining_tables::Column::Id.eq(id))
            .exec(db)
            .await?;

        Ok(table)
    }

    /// Removes a table together with its cancelled reservations
    ///
    /// Refused while any active reservation still points at the table.
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        let txn = db.begin().await?;

        let active = reservations::Entity::find()
            .filter(reservations::Column::TableId.eq(id))
            .filter(reservations::Column::Status.ne(ReservationStatus::Cancelled))
            .one(&txn)
            .await?;

        if active.is_some() {
            return Err(ServiceError::Conflict(
                "Table still has active reservations".to_string(),
            ));
        }

        let purged = reservations::Entity::delete_many()
            .filter(reservations::Column::TableId.eq(id))
            .exec(&txn)
            .await?;

        let result = dining_tables::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("Table"));
        }

        txn.commit().await?;

        log::info!(
            "Deleted table {id} and {} cancelled reservation(s)",
            purged.rows_affected
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn table(seats: i32) -> dining_tables::Model {
        dining_tables::Model {
            id: Uuid::new_v4(),
            number: 1,
            seats,
            status: TableStatus::Available,
        }
    }

    fn booking(table_id: Uuid, guests: i32) -> reservations::Model {
        reservations::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            table_id,
            date: Utc::now(),
            guests,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    fn exec_ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[tokio::test]
    async fn test_shrinking_below_active_party_is_rejected() {
        let t = table(6);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![t.clone()]])
            .append_query_results([vec![booking(t.id, 5)]])
            .into_connection();

        let result = TableService::update(
            &db,
            t.id,
            TableUpdate {
                seats: Some(4),
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_shrinking_with_room_to_spare() {
        let t = table(6);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![t.clone()]])
            .append_query_results([Vec::<reservations::Model>::new()])
            .append_exec_results([exec_ok()])
            .into_connection();

        let updated = TableService::update(
            &db,
            t.id,
            TableUpdate {
                seats: Some(4),
                status: Some(TableStatus::Occupied),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.seats, 4);
        assert_eq!(updated.status, TableStatus::Occupied);
    }

    #[tokio::test]
    async fn test_delete_blocked_by_active_reservation() {
        let t = table(4);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booking(t.id, 2)]])
            .into_connection();

        let result = TableService::delete(&db, t.id).await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_purges_cancelled_reservations() {
        let t = table(4);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<reservations::Model>::new()])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        TableService::delete(&db, t.id).await.unwrap();

        let log = db.into_transaction_log();
        let statements = format!("{log:?}");
        assert!(statements.contains(r#"DELETE FROM \"reservations\""#));
        assert!(statements.contains(r#"DELETE FROM \"dining_tables\""#));
    }

    #[tokio::test]
    async fn test_delete_unknown_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<reservations::Model>::new()])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let result = TableService::delete(&db, Uuid::new_v4()).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_number() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![table(2)]])
            .into_connection();

        let result = TableService::create(&db, 1, 4).await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }
}
