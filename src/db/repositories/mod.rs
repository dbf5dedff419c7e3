//! Repositories
//!
//! Repositories handle all direct interaction with the score database and
//! the attribute cache.

pub mod attribute_cache;
pub mod score_repo;

pub use attribute_cache::{AttributeCache, RedisAttributeCache};
pub use score_repo::{PgScoreRepository, ScoreRepository};
