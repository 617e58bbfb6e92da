use crate::{
    error::BookingError,
    store::{ReservationFilter, ReservationStore},
    window::ConflictWindow,
};
use chrono::{DateTime, Utc};
use models::table::DiningTable;
use serde::Serialize;
use std::{collections::HashSet, sync::Arc};

/// A table and whether it can still be booked at the queried time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableAvailability {
    pub table: DiningTable,
    pub available: bool,
}

/// Lists which tables are free around a given time
#[derive(Clone)]
pub struct AvailabilityReporter {
    store: Arc<dyn ReservationStore>,
    window: ConflictWindow,
}

impl AvailabilityReporter {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self {
            store,
            window: ConflictWindow::default(),
        }
    }

    pub fn with_window(mut self, window: ConflictWindow) -> Self {
        self.window = window;
        self
    }

    /// Every table, flagged unavailable iff an active reservation on it falls
    /// inside the conflict window around `requested_time`
    pub async fn list_availability(
        &self,
        requested_time: DateTime<Utc>,
    ) -> Result<Vec<TableAvailability>, BookingError> {
        let tables = self.store.find_tables().await?;

        let (from, to) = self.window.around(requested_time);
        let booked: HashSet<_> = self
            .store
            .find_reservations(&ReservationFilter::active().between(from, to))
            .await?
            .into_iter()
            .map(|r| r.table_id)
            .collect();

        Ok(tables
            .into_iter()
            .map(|table| TableAvailability {
                available: !booked.contains(&table.id),
                table,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{memory::MemoryStore, validator::ReservationValidator};
    use chrono::TimeZone;
    use models::reservation::ReservationStatus;
    use uuid::Uuid;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
    }

    async fn setup() -> (ReservationValidator, AvailabilityReporter, Vec<DiningTable>) {
        let store = Arc::new(MemoryStore::new());
        let tables = vec![
            DiningTable::new(1, 2),
            DiningTable::new(2, 4),
            DiningTable::new(3, 6),
        ];
        for table in &tables {
            store.add_table(table.clone()).await;
        }

        (
            ReservationValidator::new(store.clone()),
            AvailabilityReporter::new(store),
            tables,
        )
    }

    #[tokio::test]
    async fn test_booked_table_is_unavailable() {
        let (validator, reporter, tables) = setup().await;
        validator
            .validate_and_create(tables[1].id, at(19, 0), 2, Uuid::new_v4())
            .await
            .unwrap();

        let report = reporter.list_availability(at(19, 0)).await.unwrap();
        assert_eq!(report.len(), 3);
        for entry in &report {
            assert_eq!(entry.available, entry.table.id != tables[1].id);
        }
    }

    #[tokio::test]
    async fn test_window_edges() {
        let (validator, reporter, tables) = setup().await;
        validator
            .validate_and_create(tables[0].id, at(19, 0), 2, Uuid::new_v4())
            .await
            .unwrap();

        let taken = |report: Vec<TableAvailability>| {
            report
                .into_iter()
                .find(|e| e.table.id == tables[0].id)
                .map(|e| !e.available)
                .unwrap()
        };

        assert!(taken(reporter.list_availability(at(20, 0)).await.unwrap()));
        assert!(taken(reporter.list_availability(at(18, 0)).await.unwrap()));
        assert!(!taken(reporter.list_availability(at(20, 1)).await.unwrap()));
    }

    #[tokio::test]
    async fn test_cancelled_reservations_free_the_table() {
        let (validator, reporter, tables) = setup().await;
        let r = validator
            .validate_and_create(tables[2].id, at(19, 0), 5, Uuid::new_v4())
            .await
            .unwrap();
        validator
            .set_status(r.id, ReservationStatus::Cancelled)
            .await
            .unwrap();

        let report = reporter.list_availability(at(19, 0)).await.unwrap();
        assert!(report.iter().all(|e| e.available));
    }

    #[tokio::test]
    async fn test_report_ordered_by_table_number() {
        let (_, reporter, _) = setup().await;
        let numbers: Vec<_> = reporter
            .list_availability(at(12, 0))
            .await
            .unwrap()
            .iter()
            .map(|e| e.table.number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
