use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use models::{reservation::Reservation, table::DiningTable};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Query over stored reservations. Every field left unset matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationFilter {
    pub table_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    /// Exact requested time
    pub at: Option<DateTime<Utc>>,
    /// Inclusive `[from, to]` range on the requested time
    pub between: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Skip cancelled reservations
    pub active_only: bool,
    /// Skip this reservation (used when rescheduling it)
    pub exclude_id: Option<Uuid>,
}

impl ReservationFilter {
    /// Matches non-cancelled reservations only
    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Self::default()
        }
    }

    pub fn table(mut self, table_id: Uuid) -> Self {
        self.table_id = Some(table_id);
        self
    }

    pub fn user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.at = Some(at);
        self
    }

    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.between = Some((from, to));
        self
    }

    pub fn excluding(mut self, id: Option<Uuid>) -> Self {
        self.exclude_id = id;
        self
    }

    /// In-process evaluation, for backends that cannot push the filter down
    pub fn matches(&self, reservation: &Reservation) -> bool {
        if self.active_only && !reservation.is_active() {
            return false;
        }
        if self.exclude_id == Some(reservation.id) {
            return false;
        }
        if self.table_id.is_some_and(|id| id != reservation.table_id) {
            return false;
        }
        if self.user_id.is_some_and(|id| id != reservation.user_id) {
            return false;
        }
        if self.at.is_some_and(|at| at != reservation.date) {
            return false;
        }
        if let Some((from, to)) = self.between
            && (reservation.date < from || reservation.date > to)
        {
            return false;
        }

        true
    }
}

/// Storage the booking rules depend on
///
/// Implementations must refuse (with [`StoreError::Conflict`]) an insert or
/// update that would leave two active reservations on the same table within
/// the conflict window of each other. The validator checks first, but only
/// the store can make that check atomic with the write.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn find_table(&self, id: Uuid) -> StoreResult<Option<DiningTable>>;

    /// All tables, ordered by table number
    async fn find_tables(&self) -> StoreResult<Vec<DiningTable>>;

    async fn find_reservation(&self, id: Uuid) -> StoreResult<Option<Reservation>>;

    /// Reservations matching `filter`, ordered by requested time
    async fn find_reservations(&self, filter: &ReservationFilter) -> StoreResult<Vec<Reservation>>;

    async fn insert_reservation(&self, reservation: &Reservation) -> StoreResult<()>;

    async fn update_reservation(&self, reservation: &Reservation) -> StoreResult<()>;

    /// Returns whether a reservation was removed
    async fn delete_reservation(&self, id: Uuid) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use models::reservation::ReservationStatus;

    fn reservation() -> Reservation {
        Reservation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Utc.with_ymd_and_hms(2025, 6, 1, 19, 0, 0).unwrap(),
            2,
        )
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let mut r = reservation();
        assert!(ReservationFilter::default().matches(&r));

        r.status = ReservationStatus::Cancelled;
        assert!(ReservationFilter::default().matches(&r));
        assert!(!ReservationFilter::active().matches(&r));
    }

    #[test]
    fn test_filter_fields() {
        let r = reservation();

        assert!(ReservationFilter::active().table(r.table_id).matches(&r));
        assert!(!ReservationFilter::active().table(Uuid::new_v4()).matches(&r));
        assert!(!ReservationFilter::active().user(Uuid::new_v4()).matches(&r));
        assert!(ReservationFilter::active().at(r.date).matches(&r));
        assert!(
            !ReservationFilter::active()
                .at(r.date + Duration::minutes(1))
                .matches(&r)
        );
        assert!(!ReservationFilter::active().excluding(Some(r.id)).matches(&r));
    }

    #[test]
    fn test_between_is_inclusive() {
        let r = reservation();
        let hour = Duration::hours(1);

        assert!(
            ReservationFilter::active()
                .between(r.date, r.date + hour)
                .matches(&r)
        );
        assert!(
            ReservationFilter::active()
                .between(r.date - hour, r.date)
                .matches(&r)
        );
        assert!(
            !ReservationFilter::active()
                .between(r.date + Duration::seconds(1), r.date + hour)
                .matches(&r)
        );
    }
}
