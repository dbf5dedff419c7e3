//! Persistence module
//!
//! Connections to the score database and attribute cache, and the
//! repository components built on them.

pub mod connection;
pub mod repositories;

pub use connection::*;

use std::sync::Arc;

use crate::{
    app::tokens::{APP_CONFIG, DATABASE, REDIS},
    container::{Container, Token},
    error::BootstrapError,
    registry::{ComponentKind, ComponentRegistry},
};
use repositories::{AttributeCache, PgScoreRepository, RedisAttributeCache, ScoreRepository};

pub const SCORE_REPOSITORY: Token<dyn ScoreRepository> = Token::new("ScoreRepository");
pub const ATTRIBUTE_CACHE: Token<dyn AttributeCache> = Token::new("AttributeCache");

/// Declare and wire the repositories
pub fn register(
    registry: &mut ComponentRegistry,
    container: &mut Container,
) -> Result<(), BootstrapError> {
    registry.declare_type::<PgScoreRepository, _>(ComponentKind::Repository, &SCORE_REPOSITORY)?;
    container.register(SCORE_REPOSITORY, |c| {
        let pool = c.resolve(&DATABASE)?;
        Ok(Arc::new(PgScoreRepository::new((*pool).clone())) as Arc<dyn ScoreRepository>)
    })?;

    registry.declare_type::<RedisAttributeCache, _>(ComponentKind::Repository, &ATTRIBUTE_CACHE)?;
    container.register(ATTRIBUTE_CACHE, |c| {
        let config = c.resolve(&APP_CONFIG)?;
        let redis = c.resolve(&REDIS)?;
        Ok(Arc::new(RedisAttributeCache::new(
            (*redis).clone(),
            config.redis.attribute_ttl_seconds,
        )) as Arc<dyn AttributeCache>)
    })?;

    Ok(())
}
