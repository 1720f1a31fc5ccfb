use redis::aio::MultiplexedConnection;
use sea_orm::{ConnectOptions, DatabaseConnection};

/// Process-wide store handles, built once at startup and injected.
#[derive(Clone)]
pub struct DatabaseConnections {
    pub postgres: DatabaseConnection,
    pub redis: MultiplexedConnection,
}

impl DatabaseConnections {
    pub async fn new(database_url: &str, redis_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            postgres: init_database(database_url).await?,
            redis: init_redis(redis_url).await?,
        })
    }
}

pub async fn init_database(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    let db = sea_orm::Database::connect(options).await?;
    tracing::info!("Database connected successfully");
    Ok(db)
}

pub async fn init_redis(redis_url: &str) -> anyhow::Result<MultiplexedConnection> {
    let client = redis::Client::open(redis_url)?;
    let conn = client.get_multiplexed_tokio_connection().await?;
    tracing::info!("Redis connected successfully");
    Ok(conn)
}
