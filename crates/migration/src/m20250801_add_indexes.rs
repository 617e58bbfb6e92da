use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Conflict checks look up a table's reservations by time
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_table_id_date")
                    .table(Reservations::Table)
                    .col(Reservations::TableId)
                    .col(Reservations::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_user_id")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_user_id")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .to_owned(),
            )
            .await?;

        // Reports and dashboard filter orders by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_created_at")
                    .table(Orders::Table)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_order_id")
                    .table(Payments::Table)
                    .col(Payments::OrderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_movements_inventory_item_id")
                    .table(StockMovements::Table)
                    .col(StockMovements::InventoryItemId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_stock_movements_inventory_item_id",
            "idx_payments_order_id",
            "idx_orders_created_at",
            "idx_orders_user_id",
            "idx_reservations_user_id",
            "idx_reservations_table_id_date",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Reservations {
    Table,
    TableId,
    UserId,
    Date,
}

#[derive(Iden)]
enum Orders {
    Table,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Payments {
    Table,
    OrderId,
}

#[derive(Iden)]
enum StockMovements {
    Table,
    InventoryItemId,
}
