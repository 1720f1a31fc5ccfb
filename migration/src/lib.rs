pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_threads;
mod m20261001_000002_create_messages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_threads::Migration),
            Box::new(m20261001_000002_create_messages::Migration),
        ]
    }
}
