use crate::entities::{dining_tables, reservations};
use async_trait::async_trait;
use booking::{ReservationFilter, ReservationStore, StoreError, store::StoreResult};
use models::{
    reservation::{Reservation, ReservationStatus},
    table::DiningTable,
};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

/// Name of the exclusion constraint that keeps active reservations on one
/// table at least an hour apart
pub const NO_OVERLAP_CONSTRAINT: &str = "reservations_no_overlap";

/// [`ReservationStore`] over the `dining_tables` and `reservations` tables
pub struct PgReservationStore {
    db: Arc<DatabaseConnection>,
}

impl PgReservationStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn store_error(err: DbErr) -> StoreError {
    let message = err.to_string();
    if message.contains(NO_OVERLAP_CONSTRAINT) {
        StoreError::Conflict(message)
    } else {
        log::error!("Reservation store query failed: {message}");
        StoreError::Backend(message)
    }
}

#[async_trait]
impl ReservationStore for PgReservationStore {
    async fn find_table(&self, id: Uuid) -> StoreResult<Option<DiningTable>> {
        let table = dining_tables::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(table.map(DiningTable::from))
    }

    async fn find_tables(&self) -> StoreResult<Vec<DiningTable>> {
        let tables = dining_tables::Entity::find()
            .order_by_asc(dining_tables::Column::Number)
            .all(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(tables.into_iter().map(DiningTable::from).collect())
    }

    async fn find_reservation(&self, id: Uuid) -> StoreResult<Option<Reservation>> {
        let reservation = reservations::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(reservation.map(Reservation::from))
    }

    async fn find_reservations(&self, filter: &ReservationFilter) -> StoreResult<Vec<Reservation>> {
        let mut query = reservations::Entity::find();

        if let Some(table_id) = filter.table_id {
            query = query.filter(reservations::Column::TableId.eq(table_id));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(reservations::Column::UserId.eq(user_id));
        }
        if let Some(at) = filter.at {
            query = query.filter(reservations::Column::Date.eq(at));
        }
        if let Some((from, to)) = filter.between {
            query = query.filter(reservations::Column::Date.between(from, to));
        }
        if filter.active_only {
            query = query.filter(reservations::Column::Status.ne(ReservationStatus::Cancelled));
        }
        if let Some(id) = filter.exclude_id {
            query = query.filter(reservations::Column::Id.ne(id));
        }

        let found = query
            .order_by_asc(reservations::Column::Date)
            .all(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(found.into_iter().map(Reservation::from).collect())
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> StoreResult<()> {
        reservations::Entity::insert(reservations::ActiveModel::from(reservation))
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn update_reservation(&self, reservation: &Reservation) -> StoreResult<()> {
        let mut model = reservations::ActiveModel::from(reservation);
        model.id = NotSet;

        let result = reservations::Entity::update_many()
            .set(model)
            .filter(reservations::Column::Id.eq(reservation.id))
            .exec(self.db.as_ref())
            .await
            .map_err(store_error)?;

        if result.rows_affected == 0 {
            return Err(StoreError::Backend(format!(
                "Reservation {} vanished during update",
                reservation.id
            )));
        }
        Ok(())
    }

    async fn delete_reservation(&self, id: Uuid) -> StoreResult<bool> {
        let result = reservations::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking::{BookingError, ReservationValidator};
    use chrono::{TimeZone, Utc};
    use models::table::TableStatus;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn table(seats: i32) -> dining_tables::Model {
        dining_tables::Model {
            id: Uuid::new_v4(),
            number: 3,
            seats,
            status: TableStatus::Available,
        }
    }

    fn exec_ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[tokio::test]
    async fn test_exclusion_violation_becomes_slot_conflict() {
        let t = table(4);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![t.clone()]])
            .append_query_results([Vec::<reservations::Model>::new()])
            .append_query_results([Vec::<reservations::Model>::new()])
            .append_exec_errors([DbErr::Custom(format!(
                "conflicting key value violates exclusion constraint \"{NO_OVERLAP_CONSTRAINT}\""
            ))])
            .into_connection();

        let store = PgReservationStore::new(Arc::new(db));
        let validator = ReservationValidator::new(Arc::new(store));
        let result = validator
            .validate_and_create(
                t.id,
                Utc.with_ymd_and_hms(2025, 6, 1, 19, 0, 0).unwrap(),
                2,
                Uuid::new_v4(),
            )
            .await;

        assert!(matches!(result, Err(BookingError::SlotConflict)));
    }

    #[tokio::test]
    async fn test_create_through_database_store() {
        let t = table(4);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![t.clone()]])
            .append_query_results([Vec::<reservations::Model>::new()])
            .append_query_results([Vec::<reservations::Model>::new()])
            .append_exec_results([exec_ok()])
            .into_connection();

        let store = PgReservationStore::new(Arc::new(db));
        let validator = ReservationValidator::new(Arc::new(store));
        let reservation = validator
            .validate_and_create(
                t.id,
                Utc.with_ymd_and_hms(2025, 6, 1, 19, 0, 0).unwrap(),
                4,
                Uuid::new_v4(),
            )
            .await
            .unwrap();

        assert_eq!(reservation.table_id, t.id);
        assert_eq!(reservation.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn test_other_errors_are_backend_failures() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let store = PgReservationStore::new(Arc::new(db));
        let result = store.delete_reservation(Uuid::new_v4()).await;

        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn test_find_tables_converts_models() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![table(2), table(6)]])
            .into_connection();

        let tables = PgReservationStore::new(Arc::new(db))
            .find_tables()
            .await
            .unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].seats, 6);
    }
}
