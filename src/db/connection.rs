//! Backend connection management

use redis::aio::ConnectionManager;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::{DatabaseConfig, RedisConfig};

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// Test database connection
pub async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Open a managed Redis connection
pub async fn create_redis(config: &RedisConfig) -> Result<ConnectionManager, redis::RedisError> {
    let client = redis::Client::open(config.url.as_str())?;
    ConnectionManager::new(client).await
}
