//! Difficulty attribute cache

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

use crate::{error::AppResult, models::DifficultyAttributes};

/// Cache of computed difficulty attributes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttributeCache: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<DifficultyAttributes>>;

    async fn put(&self, key: &str, attributes: &DifficultyAttributes) -> AppResult<()>;
}

/// Redis-backed attribute cache with a fixed entry lifetime
pub struct RedisAttributeCache {
    redis: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisAttributeCache {
    pub fn new(redis: ConnectionManager, ttl_seconds: u64) -> Self {
        Self { redis, ttl_seconds }
    }
}

#[async_trait]
impl AttributeCache for RedisAttributeCache {
    async fn get(&self, key: &str) -> AppResult<Option<DifficultyAttributes>> {
        let mut redis = self.redis.clone();
        let raw: Option<String> = redis.get(key).await?;

        raw.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(Into::into)
    }

    async fn put(&self, key: &str, attributes: &DifficultyAttributes) -> AppResult<()> {
        let mut redis = self.redis.clone();
        let json = serde_json::to_string(attributes)?;
        let _: () = redis.set_ex(key, json, self.ttl_seconds).await?;
        Ok(())
    }
}
