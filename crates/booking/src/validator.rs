use crate::{
    error::BookingError,
    store::{ReservationFilter, ReservationStore},
    window::ConflictWindow,
};
use chrono::{DateTime, Utc};
use log::{info, warn};
use models::reservation::{Reservation, ReservationStatus};
use std::sync::Arc;
use uuid::Uuid;

/// Fields a caller may change on an existing reservation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reschedule {
    pub table_id: Option<Uuid>,
    pub date: Option<DateTime<Utc>>,
    pub guests: Option<i32>,
}

impl Reschedule {
    pub fn is_empty(&self) -> bool {
        self.table_id.is_none() && self.date.is_none() && self.guests.is_none()
    }
}

/// Decides whether a table can be booked and records the booking
#[derive(Clone)]
pub struct ReservationValidator {
    store: Arc<dyn ReservationStore>,
    window: ConflictWindow,
}

impl ReservationValidator {
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

    pub fn store(&self) -> &Arc<dyn ReservationStore> {
        &self.store
    }

    /// Books `table_id` for `party_size` guests at `requested_time`
    ///
    /// The request is checked in this order: the table must exist, the party
    /// must fit, no other active reservation on the table may fall inside the
    /// conflict window, and the user must not already hold this exact slot.
    /// The new reservation starts out `pending`.
    pub async fn validate_and_create(
        &self,
        table_id: Uuid,
        requested_time: DateTime<Utc>,
        party_size: i32,
        user_id: Uuid,
    ) -> Result<Reservation, BookingError> {
        self.check(table_id, requested_time, party_size, user_id, None)
            .await?;

        let reservation = Reservation::new(user_id, table_id, requested_time, party_size);
        self.store.insert_reservation(&reservation).await?;

        info!(
            "Reservation {} created: table {table_id} at {requested_time} for {party_size}",
            reservation.id
        );
        Ok(reservation)
    }

    /// Moves an active reservation to another table, time or party size
    pub async fn reschedule(
        &self,
        reservation_id: Uuid,
        changes: Reschedule,
    ) -> Result<Reservation, BookingError> {
        self.update(reservation_id, changes, None).await
    }

    /// Confirms or cancels a reservation
    pub async fn set_status(
        &self,
        reservation_id: Uuid,
        status: ReservationStatus,
    ) -> Result<Reservation, BookingError> {
        self.update(reservation_id, Reschedule::default(), Some(status))
            .await
    }

    /// Applies a reschedule and a status change in a single write
    ///
    /// Both parts are validated before anything is stored, so a refused
    /// status change leaves the reservation untouched.
    pub async fn update(
        &self,
        reservation_id: Uuid,
        changes: Reschedule,
        status: Option<ReservationStatus>,
    ) -> Result<Reservation, BookingError> {
        let original = self.load(reservation_id).await?;
        let mut reservation = original.clone();

        if let Some(status) = status
            && !reservation.status.can_transition_to(status)
        {
            return Err(BookingError::BadRequest(format!(
                "Cannot change reservation from {} to {status}",
                reservation.status
            )));
        }

        if !changes.is_empty() {
            if !reservation.is_active() {
                return Err(BookingError::BadRequest(
                    "Cancelled reservations cannot be rescheduled".to_string(),
                ));
            }

            reservation.table_id = changes.table_id.unwrap_or(reservation.table_id);
            reservation.date = changes.date.unwrap_or(reservation.date);
            reservation.guests = changes.guests.unwrap_or(reservation.guests);

            self.check(
                reservation.table_id,
                reservation.date,
                reservation.guests,
                reservation.user_id,
                Some(reservation.id),
            )
            .await?;
        }
        if let Some(status) = status {
            reservation.status = status;
        }

        if reservation == original {
            return Ok(reservation);
        }
        self.store.update_reservation(&reservation).await?;

        info!(
            "Reservation {} updated: table {} at {} for {}, {}",
            reservation.id,
            reservation.table_id,
            reservation.date,
            reservation.guests,
            reservation.status
        );
        Ok(reservation)
    }

    async fn load(&self, reservation_id: Uuid) -> Result<Reservation, BookingError> {
        self.store
            .find_reservation(reservation_id)
            .await?
            .ok_or(BookingError::ReservationNotFound(reservation_id))
    }

    async fn check(
        &self,
        table_id: Uuid,
        at: DateTime<Utc>,
        guests: i32,
        user_id: Uuid,
        exclude: Option<Uuid>,
    ) -> Result<(), BookingError> {
        let table = self
            .store
            .find_table(table_id)
            .await?
            .ok_or(BookingError::TableNotFound(table_id))?;

        if guests <= 0 {
            return Err(BookingError::BadRequest(format!(
                "Party size must be positive, got {guests}"
            )));
        }
        if !table.fits(guests) {
            warn!(
                "Rejected booking on table {}: {guests} guests for {} seats",
                table.number, table.seats
            );
            return Err(BookingError::CapacityExceeded {
                guests,
                seats: table.seats,
            });
        }

        let (from, to) = self.window.around(at);
        let overlapping = self
            .store
            .find_reservations(
                &ReservationFilter::active()
                    .table(table_id)
                    .between(from, to)
                    .excluding(exclude),
            )
            .await?;
        if !overlapping.is_empty() {
            warn!(
                "Rejected booking on table {} at {at}: overlaps {} reservation(s)",
                table.number,
                overlapping.len()
            );
            return Err(BookingError::SlotConflict);
        }

        let duplicates = self
            .store
            .find_reservations(
                &ReservationFilter::active()
                    .user(user_id)
                    .table(table_id)
                    .at(at)
                    .excluding(exclude),
            )
            .await?;
        if !duplicates.is_empty() {
            return Err(BookingError::DuplicateReservation);
        }

        Ok(())
    }
}
