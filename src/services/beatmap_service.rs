//! Beatmap service

use std::sync::Arc;

use tracing::debug;

use crate::{
    clients::BeatmapProvider,
    error::{AppError, AppResult},
    models::{Beatmap, BeatmapRef},
};

/// Beatmap lookup shared by the calculation services
pub struct BeatmapService {
    provider: Arc<dyn BeatmapProvider>,
}

impl BeatmapService {
    pub fn new(provider: Arc<dyn BeatmapProvider>) -> Self {
        Self { provider }
    }

    /// Fetch a beatmap or fail with 404
    pub async fn get(&self, beatmap: &BeatmapRef) -> AppResult<Beatmap> {
        let found = self.provider.fetch_beatmap(beatmap).await?;

        found.ok_or_else(|| {
            debug!(beatmap = %beatmap, "Beatmap not found");
            AppError::NotFound("Beatmap not found.".to_string())
        })
    }
}
