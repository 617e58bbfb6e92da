use crate::routes::{
    ai, auth, health, inventory, menu, orders, payments, reports, reservations, root, stats,
    tables,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::register,
        auth::login,
        menu::list_menu,
        menu::list_categories,
        menu::create_menu_item,
        menu::update_menu_item,
        menu::delete_menu_item,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status,
        orders::get_invoice,
        tables::list_tables,
        tables::table_availability,
        tables::create_table,
        tables::update_table,
        tables::delete_table,
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::update_reservation,
        reservations::delete_reservation,
        inventory::list_inventory,
        inventory::create_inventory_item,
        inventory::update_inventory_item,
        inventory::record_movement,
        inventory::inventory_alerts,
        payments::create_payment,
        payments::get_payment,
        payments::confirm_payment,
        payments::refund_payment,
        reports::daily_report,
        reports::period_report,
        ai::recommendations,
        ai::inventory_forecast,
        ai::optimize_pricing,
        ai::business_insights,
        stats::dashboard
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and service information"),
        (name = "Authentication", description = "Account registration and login"),
        (name = "Menu", description = "Menu items and categories"),
        (name = "Orders", description = "Customer orders and invoices"),
        (name = "Tables", description = "Dining tables and availability"),
        (name = "Reservations", description = "Table bookings"),
        (name = "Inventory", description = "Stock levels, movements and alerts"),
        (name = "Payments", description = "Card and cash payments"),
        (name = "Reports", description = "PDF sales reports"),
        (name = "AI", description = "Model backed recommendations and forecasts"),
        (name = "Stats", description = "Dashboard figures"),
    ),
    info(
        title = "Restaurant API",
        version = "1.0.0",
        description = "Restaurant management API: menu, orders, reservations, inventory and payments",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
