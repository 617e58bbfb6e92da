pub mod inventory;
pub mod menu;
pub mod order;
pub mod payment;
pub mod reservation_store;
pub mod stats;
pub mod table;
pub mod user;

pub use inventory::InventoryService;
pub use menu::MenuService;
pub use order::OrderService;
pub use payment::PaymentService;
pub use reservation_store::{NO_OVERLAP_CONSTRAINT, PgReservationStore};
pub use stats::StatsService;
pub use table::TableService;
pub use user::UserService;
