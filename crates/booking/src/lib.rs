//! Reservation conflict detection and table availability.
//!
//! The rules here only talk to storage through [`ReservationStore`], so the
//! same code runs against PostgreSQL in production and [`MemoryStore`] in
//! tests.

pub mod availability;
pub mod error;
pub mod memory;
pub mod store;
pub mod validator;
pub mod window;

pub use availability::{AvailabilityReporter, TableAvailability};
pub use error::{BookingError, StoreError};
pub use memory::MemoryStore;
pub use store::{ReservationFilter, ReservationStore};
pub use validator::{Reschedule, ReservationValidator};
pub use window::{ConflictWindow, parse_requested_time};
