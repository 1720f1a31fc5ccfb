use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Messages::MessageId).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Messages::ThreadId).uuid().not_null())
                    .col(ColumnDef::new(Messages::SenderId).uuid().not_null())
                    .col(ColumnDef::new(Messages::Body).text())
                    .col(ColumnDef::new(Messages::ImageUrls).array(ColumnType::Text).not_null().default(Expr::cust("'{}'")))
                    .col(ColumnDef::new(Messages::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .col(ColumnDef::new(Messages::ReadBy).array(ColumnType::Uuid).not_null().default(Expr::cust("'{}'")))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_messages_thread_id")
                            .from(Messages::Table, Messages::ThreadId)
                            .to(Threads::Table, Threads::ThreadId)
                            .on_delete(ForeignKeyAction::Cascade)
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the newest-first window and cursor pages
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_thread_created_at")
                    .table(Messages::Table)
                    .col(Messages::ThreadId)
                    .col((Messages::CreatedAt, IndexOrder::Desc))
                    .col((Messages::MessageId, IndexOrder::Desc))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    MessageId,
    ThreadId,
    SenderId,
    Body,
    ImageUrls,
    CreatedAt,
    ReadBy,
}

#[derive(DeriveIden)]
enum Threads {
    Table,
    ThreadId,
}
