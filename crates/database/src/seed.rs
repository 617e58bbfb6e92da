//! Demo data for a fresh database

use crate::{
    entities::{dining_tables, menu_items},
    error::ServiceResult,
    services::{MenuService, TableService, UserService},
};
use models::{menu::MenuItemInput, user::UserRole};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

/// Seat counts of the demo tables, numbered from 1
const DEMO_TABLE_SEATS: [i32; 4] = [2, 4, 6, 2];

fn demo_menu() -> Vec<MenuItemInput> {
    let item = |name: &str, description: &str, cents: i64, category: &str| MenuItemInput {
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(cents, 2),
        category: category.to_string(),
        image_url: String::new(),
        available: true,
    };

    vec![
        item(
            "Burger Classic",
            "Bœuf, cheddar, salade, tomate, sauce maison",
            1290,
            "Plats",
        ),
        item(
            "Salade César",
            "Laitue romaine, parmesan, croûtons, sauce César",
            950,
            "Entrées",
        ),
        item(
            "Cocktail Signature",
            "Création du barman, sans alcool disponible",
            800,
            "Boissons",
        ),
    ]
}

/// Creates the admin account, menu and tables when they are missing
///
/// Each part is only seeded while its table is empty, so restarts never
/// duplicate anything.
pub async fn seed_demo_data(
    db: &DatabaseConnection,
    admin_email: &str,
    admin_password_hash: String,
) -> ServiceResult<()> {
    if UserService::find_by_email(db, admin_email).await?.is_none() {
        UserService::create(
            db,
            admin_email,
            admin_password_hash,
            "Administrator".to_string(),
            UserRole::Admin,
        )
        .await?;
    }

    if menu_items::Entity::find().count(db).await? == 0 {
        for item in demo_menu() {
            MenuService::create(db, item).await?;
        }
        log::info!("Seeded demo menu");
    }

    if dining_tables::Entity::find().count(db).await? == 0 {
        for (number, seats) in (1..).zip(DEMO_TABLE_SEATS) {
            TableService::create(db, number, seats).await?;
        }
        log::info!("Seeded {} demo tables", DEMO_TABLE_SEATS.len());
    }

    Ok(())
}
