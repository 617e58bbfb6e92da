pub mod ai;
pub mod auth;
pub mod health;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod payments;
pub mod reports;
pub mod reservations;
pub mod root;
pub mod stats;
pub mod tables;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Every endpoint, still waiting for its state
pub fn api_router() -> Router<AppState> {
    let api = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/menu", get(menu::list_menu).post(menu::create_menu_item))
        .route("/menu/categories", get(menu::list_categories))
        .route(
            "/menu/{id}",
            put(menu::update_menu_item).delete(menu::delete_menu_item),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/status", put(orders::update_order_status))
        .route("/orders/{id}/invoice", get(orders::get_invoice))
        .route("/tables", get(tables::list_tables).post(tables::create_table))
        .route("/tables/availability", get(tables::table_availability))
        .route(
            "/tables/{id}",
            put(tables::update_table).delete(tables::delete_table),
        )
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(reservations::get_reservation)
                .put(reservations::update_reservation)
                .delete(reservations::delete_reservation),
        )
        .route(
            "/inventory",
            get(inventory::list_inventory).post(inventory::create_inventory_item),
        )
        .route("/inventory/alerts", get(inventory::inventory_alerts))
        .route("/inventory/{id}", put(inventory::update_inventory_item))
        .route("/inventory/{id}/movements", post(inventory::record_movement))
        .route("/payments", post(payments::create_payment))
        .route("/payments/{id}", get(payments::get_payment))
        .route("/payments/{id}/confirm", post(payments::confirm_payment))
        .route("/payments/{id}/refund", post(payments::refund_payment))
        .route("/reports/daily", get(reports::daily_report))
        .route("/reports/period", get(reports::period_report))
        .route("/ai/recommendations", post(ai::recommendations))
        .route("/ai/inventory/forecast", post(ai::inventory_forecast))
        .route("/ai/pricing/optimize", post(ai::optimize_pricing))
        .route("/ai/insights", get(ai::business_insights))
        .route("/stats/dashboard", get(stats::dashboard));

    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .nest("/api", api)
}
