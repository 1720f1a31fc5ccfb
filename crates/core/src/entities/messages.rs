use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub message_id: i64,
    pub thread_id: Uuid,
    pub sender_id: Uuid,
    pub body: Option<String>,
    pub image_urls: Vec<String>,
    pub created_at: DateTimeWithTimeZone,
    /// Users that acknowledged this message. Set semantics, append only.
    pub read_by: Vec<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::threads::Entity",
        from = "Column::ThreadId",
        to = "super::threads::Column::ThreadId",
        on_delete = "Cascade"
    )]
    Threads,
}

impl Related<super::threads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Threads.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_read_by(&self, user_id: Uuid) -> bool {
        self.read_by.contains(&user_id)
    }

    /// `read_by` with `user_id` added. Adding a present reader is a no-op.
    pub fn read_by_with(&self, user_id: Uuid) -> Vec<Uuid> {
        let mut read_by = self.read_by.clone();
        if !read_by.contains(&user_id) {
            read_by.push(user_id);
        }
        read_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(read_by: Vec<Uuid>) -> Model {
        Model {
            message_id: 1,
            thread_id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            body: Some("Is this still available?".to_string()),
            image_urls: vec![],
            created_at: DateTimeWithTimeZone::default(),
            read_by,
        }
    }

    #[test]
    fn test_read_by_with_adds_reader_once() {
        let reader = Uuid::new_v4();
        let msg = message(vec![]);
        assert!(!msg.is_read_by(reader));

        let read_by = msg.read_by_with(reader);
        assert_eq!(read_by, vec![reader]);

        let again = message(read_by).read_by_with(reader);
        assert_eq!(again, vec![reader]);
    }

    #[test]
    fn test_read_by_with_keeps_existing_readers() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let read_by = message(vec![first]).read_by_with(second);
        assert_eq!(read_by, vec![first, second]);
    }
}
