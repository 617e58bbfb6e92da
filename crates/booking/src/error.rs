use thiserror::Error;
use uuid::Uuid;

/// Failure reported by a [`ReservationStore`](crate::ReservationStore)
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend refused a write because it would overlap an active
    /// reservation on the same table
    #[error("Overlapping reservation rejected by storage: {0}")]
    Conflict(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Why a booking request was rejected
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Table {0} not found")]
    TableNotFound(Uuid),

    #[error("Reservation {0} not found")]
    ReservationNotFound(Uuid),

    #[error("Party of {guests} exceeds table capacity of {seats}")]
    CapacityExceeded { guests: i32, seats: i32 },

    #[error("Table is already booked within an hour of the requested time")]
    SlotConflict,

    #[error("You already hold a reservation for this table at this time")]
    DuplicateReservation,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => Self::SlotConflict,
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_conflict_maps_to_slot_conflict() {
        let err: BookingError = StoreError::Conflict("reservations_no_overlap".into()).into();
        assert!(matches!(err, BookingError::SlotConflict));

        let err: BookingError = StoreError::Backend("connection reset".into()).into();
        assert!(matches!(err, BookingError::Store(_)));
    }

    #[test]
    fn test_capacity_message() {
        let err = BookingError::CapacityExceeded {
            guests: 5,
            seats: 4,
        };
        assert_eq!(err.to_string(), "Party of 5 exceeds table capacity of 4");
    }
}
