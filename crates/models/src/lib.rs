//! Domain types shared by the booking core, the database layer and the HTTP server.
//!
//! Everything here is storage- and transport-agnostic. With the `database`
//! feature enabled, the status enums can be used directly as SeaORM columns
//! (they are stored as their snake_case string form).

#[cfg(feature = "database")]
#[macro_use]
mod value;

pub mod inventory;
pub mod menu;
pub mod order;
pub mod payment;
pub mod report;
pub mod reservation;
pub mod table;
pub mod user;
