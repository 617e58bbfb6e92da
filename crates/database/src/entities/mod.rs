pub mod dining_table;
pub mod inventory_item;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod reservation;
pub mod stock_movement;
pub mod user;

pub use dining_table as dining_tables;
pub use inventory_item as inventory_items;
pub use menu_item as menu_items;
pub use order as orders;
pub use payment as payments;
pub use reservation as reservations;
pub use stock_movement as stock_movements;
pub use user as users;
