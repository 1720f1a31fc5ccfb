// PostgreSQL implementation of the messaging repositories using Sea-ORM.

use bazaar_core::entities::{messages, threads};
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::traits::{MessageCursor, MessageRepository, NewMessage, NewThread, ThreadRepository};

pub struct PostgresThreadRepository {
    db: DatabaseConnection,
}

impl PostgresThreadRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[::async_trait::async_trait]
impl ThreadRepository for PostgresThreadRepository {
    async fn find_by_id(&self, thread_id: Uuid) -> anyhow::Result<Option<threads::Model>> {
        Ok(threads::Entity::find_by_id(thread_id).one(&self.db).await?)
    }

    async fn find_for_listing(
        &self,
        listing_id: Uuid,
        buyer_id: Uuid,
        seller_id: Uuid,
    ) -> anyhow::Result<Option<threads::Model>> {
        Ok(threads::Entity::find()
            .filter(threads::Column::ListingId.eq(listing_id))
            .filter(threads::Column::BuyerId.eq(buyer_id))
            .filter(threads::Column::SellerId.eq(seller_id))
            .one(&self.db)
            .await?)
    }

    async fn create(&self, thread: NewThread) -> anyhow::Result<threads::Model> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let model = threads::ActiveModel {
            thread_id: Set(Uuid::new_v4()),
            listing_id: Set(thread.listing_id),
            buyer_id: Set(thread.buyer_id),
            seller_id: Set(thread.seller_id),
            last_message: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn record_last_message(
        &self,
        thread_id: Uuid,
        last_message: Option<String>,
        updated_at: DateTimeWithTimeZone,
    ) -> anyhow::Result<()> {
        threads::Entity::update_many()
            .col_expr(threads::Column::LastMessage, Expr::value(last_message))
            .col_expr(threads::Column::UpdatedAt, Expr::value(updated_at))
            .filter(threads::Column::ThreadId.eq(thread_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

pub struct PostgresMessageRepository {
    db: DatabaseConnection,
}

impl PostgresMessageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[::async_trait::async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn list_recent(&self, thread_id: Uuid, limit: u64) -> anyhow::Result<Vec<messages::Model>> {
        self.list_before(thread_id, None, limit).await
    }

    async fn list_before(
        &self,
        thread_id: Uuid,
        before: Option<MessageCursor>,
        limit: u64,
    ) -> anyhow::Result<Vec<messages::Model>> {
        let mut query = messages::Entity::find().filter(messages::Column::ThreadId.eq(thread_id));

        if let Some(cursor) = before {
            query = query.filter(
                Condition::any()
                    .add(messages::Column::CreatedAt.lt(cursor.created_at))
                    .add(
                        Condition::all()
                            .add(messages::Column::CreatedAt.eq(cursor.created_at))
                            .add(messages::Column::MessageId.lt(cursor.message_id)),
                    ),
            );
        }

        Ok(query
            .order_by_desc(messages::Column::CreatedAt)
            .order_by_desc(messages::Column::MessageId)
            .limit(limit)
            .all(&self.db)
            .await?)
    }

    async fn insert(&self, message: NewMessage) -> anyhow::Result<messages::Model> {
        let model = messages::ActiveModel {
            thread_id: Set(message.thread_id),
            sender_id: Set(message.sender_id),
            body: Set(message.body),
            image_urls: Set(message.image_urls),
            created_at: Set(Utc::now().into()),
            read_by: Set(Vec::new()),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn update_read_by(
        &self,
        message_id: i64,
        expected: &[Uuid],
        read_by: &[Uuid],
    ) -> anyhow::Result<()> {
        let result = messages::Entity::update_many()
            .col_expr(messages::Column::ReadBy, Expr::value(read_by.to_vec()))
            .filter(messages::Column::MessageId.eq(message_id))
            .filter(messages::Column::ReadBy.eq(expected.to_vec()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            anyhow::bail!("read_by of message {} changed concurrently or message is gone", message_id);
        }
        Ok(())
    }

    async fn count_unread(&self, thread_id: Uuid, user_id: Uuid) -> anyhow::Result<u64> {
        Ok(messages::Entity::find()
            .filter(messages::Column::ThreadId.eq(thread_id))
            .filter(messages::Column::SenderId.ne(user_id))
            .filter(Expr::cust_with_values("NOT ($1 = ANY(\"read_by\"))", [user_id]))
            .count(&self.db)
            .await?)
    }
}
