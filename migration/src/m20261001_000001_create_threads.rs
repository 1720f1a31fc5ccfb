use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Threads::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Threads::ThreadId).uuid().not_null().primary_key().extra("DEFAULT gen_random_uuid()"))
                    .col(ColumnDef::new(Threads::ListingId).uuid().not_null())
                    .col(ColumnDef::new(Threads::BuyerId).uuid().not_null())
                    .col(ColumnDef::new(Threads::SellerId).uuid().not_null())
                    .col(ColumnDef::new(Threads::LastMessage).text())
                    .col(ColumnDef::new(Threads::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .col(ColumnDef::new(Threads::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .check(Expr::col(Threads::BuyerId).ne(Expr::col(Threads::SellerId)))
                    .to_owned(),
            )
            .await?;

        // One thread per buyer, seller and listing
        manager
            .create_index(
                Index::create()
                    .name("uq_threads_listing_participants")
                    .table(Threads::Table)
                    .col(Threads::ListingId)
                    .col(Threads::BuyerId)
                    .col(Threads::SellerId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Threads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Threads {
    Table,
    ThreadId,
    ListingId,
    BuyerId,
    SellerId,
    LastMessage,
    CreatedAt,
    UpdatedAt,
}
