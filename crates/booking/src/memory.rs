use crate::{
    error::StoreError,
    store::{ReservationFilter, ReservationStore, StoreResult},
    window::ConflictWindow,
};
use async_trait::async_trait;
use models::{reservation::Reservation, table::DiningTable};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    tables: HashMap<Uuid, DiningTable>,
    reservations: HashMap<Uuid, Reservation>,
}

impl Inner {
    /// Enforces the no-overlap rule the way a storage constraint would
    fn check_overlap(&self, candidate: &Reservation, window: ConflictWindow) -> StoreResult<()> {
        if !candidate.is_active() {
            return Ok(());
        }

        let clash = self.reservations.values().find(|existing| {
            existing.id != candidate.id
                && existing.is_active()
                && existing.table_id == candidate.table_id
                && window.overlaps(existing.date, candidate.date)
        });

        match clash {
            Some(existing) => Err(StoreError::Conflict(format!(
                "reservation {} overlaps {}",
                candidate.id, existing.id
            ))),
            None => Ok(()),
        }
    }
}

/// A [`ReservationStore`] kept entirely in memory
///
/// Writes take an exclusive lock and re-check the conflict window before
/// committing, so concurrent bookings behave like they do against the
/// database's exclusion constraint.
pub struct MemoryStore {
    inner: RwLock<Inner>,
    window: ConflictWindow,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_window(ConflictWindow::default())
    }

    pub fn with_window(window: ConflictWindow) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            window,
        }
    }

    pub async fn add_table(&self, table: DiningTable) {
        self.inner.write().await.tables.insert(table.id, table);
    }

    pub async fn reservation_count(&self) -> usize {
        self.inner.read().await.reservations.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn find_table(&self, id: Uuid) -> StoreResult<Option<DiningTable>> {
        Ok(self.inner.read().await.tables.get(&id).cloned())
    }

    async fn find_tables(&self) -> StoreResult<Vec<DiningTable>> {
        let mut tables: Vec<_> = self.inner.read().await.tables.values().cloned().collect();
        tables.sort_by_key(|t| t.number);
        Ok(tables)
    }

    async fn find_reservation(&self, id: Uuid) -> StoreResult<Option<Reservation>> {
        Ok(self.inner.read().await.reservations.get(&id).cloned())
    }

    async fn find_reservations(&self, filter: &ReservationFilter) -> StoreResult<Vec<Reservation>> {
        let mut found: Vec<_> = self
            .inner
            .read()
            .await
            .reservations
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        found.sort_by_key(|r| r.date);
        Ok(found)
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> StoreResult<()> {
        let mut inner = self.inner.write().await;

        if inner.reservations.contains_key(&reservation.id) {
            return Err(StoreError::Backend(format!(
                "duplicate reservation id {}",
                reservation.id
            )));
        }
        inner.check_overlap(reservation, self.window)?;
        inner
            .reservations
            .insert(reservation.id, reservation.clone());

        Ok(())
    }

    async fn update_reservation(&self, reservation: &Reservation) -> StoreResult<()> {
        let mut inner = self.inner.write().await;

        if !inner.reservations.contains_key(&reservation.id) {
            return Err(StoreError::Backend(format!(
                "reservation {} does not exist",
                reservation.id
            )));
        }
        inner.check_overlap(reservation, self.window)?;
        inner
            .reservations
            .insert(reservation.id, reservation.clone());

        Ok(())
    }

    async fn delete_reservation(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.write().await.reservations.remove(&id).is_some())
    }
}
