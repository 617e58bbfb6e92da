pub mod ai;
pub mod auth;
pub mod inventory;
pub mod menu;
pub mod order;
pub mod payment;
pub mod report;
pub mod reservation;
pub mod table;
