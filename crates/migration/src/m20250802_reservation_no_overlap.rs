use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Needed for `uuid WITH =` inside a GiST exclusion constraint
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS btree_gist")
            .await?;

        // Two active reservations on one table may not be within an hour of
        // each other. Closed ranges make bookings exactly one hour apart
        // collide as well.
        db.execute_unprepared(
            "ALTER TABLE reservations
            ADD CONSTRAINT reservations_no_overlap
            EXCLUDE USING gist (
                table_id WITH =,
                tstzrange(date, date + interval '1 hour', '[]') WITH &&
            )
            WHERE (status <> 'cancelled')",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE reservations DROP CONSTRAINT IF EXISTS reservations_no_overlap",
            )
            .await?;

        Ok(())
    }
}
