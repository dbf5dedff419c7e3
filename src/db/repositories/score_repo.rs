//! Score repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{error::AppResult, models::Score};

/// Read access to submitted scores
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Highest-scoring play of a player on a beatmap
    async fn find_best(&self, uid: u32, hash: &str) -> AppResult<Option<Score>>;
}

/// Repository for score database operations
pub struct PgScoreRepository {
    pool: PgPool,
}

impl PgScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreRepository for PgScoreRepository {
    async fn find_best(&self, uid: u32, hash: &str) -> AppResult<Option<Score>> {
        let score = sqlx::query_as::<_, Score>(
            r#"
            SELECT id, uid, hash, mods, score, combo, n300, n100, n50, nmiss,
                   slider_ticks_missed, slider_ends_dropped, date
            FROM scores
            WHERE uid = $1 AND hash = $2
            ORDER BY score DESC
            LIMIT 1
            "#,
        )
        .bind(i64::from(uid))
        .bind(hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(score)
    }
}
