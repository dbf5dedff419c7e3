//! osu! API client
//!
//! Beatmap metadata comes from the v1 `get_beatmaps` endpoint; the `.osu`
//! file itself is downloaded separately by beatmap ID.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::OsuApiConfig,
    error::{AppError, AppResult},
    models::{Beatmap, BeatmapRef},
};

/// Source of beatmaps
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BeatmapProvider: Send + Sync {
    /// Fetch a beatmap, or `None` when it does not exist
    async fn fetch_beatmap(&self, beatmap: &BeatmapRef) -> AppResult<Option<Beatmap>>;
}

/// Beatmap entry as the v1 API reports it (every field is a string)
#[derive(Debug, Deserialize)]
struct ApiBeatmap {
    beatmap_id: String,
    file_md5: String,
    title: String,
    artist: String,
    creator: String,
    version: String,
    max_combo: Option<String>,
}

/// osu! API v1 client
pub struct OsuApiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OsuApiClient {
    pub fn new(http: Client, config: &OsuApiConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn lookup_url(&self, beatmap: &BeatmapRef) -> AppResult<Url> {
        let (param, value) = match beatmap {
            BeatmapRef::Id(id) => ("b", id.to_string()),
            BeatmapRef::Hash(hash) => ("h", hash.clone()),
        };

        Url::parse_with_params(
            &format!("{}/api/get_beatmaps", self.base_url),
            [("k", self.api_key.as_str()), (param, value.as_str())],
        )
        .map_err(|e| AppError::Configuration(format!("invalid osu! API URL: {e}")))
    }

    async fn download_file(&self, id: u32) -> AppResult<String> {
        let file = self
            .http
            .get(format!("{}/osu/{}", self.base_url, id))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(file)
    }
}

#[async_trait]
impl BeatmapProvider for OsuApiClient {
    async fn fetch_beatmap(&self, beatmap: &BeatmapRef) -> AppResult<Option<Beatmap>> {
        debug!(beatmap = %beatmap, "Looking up beatmap");

        let entries: Vec<ApiBeatmap> = self
            .http
            .get(self.lookup_url(beatmap)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(entry) = entries.into_iter().next() else {
            return Ok(None);
        };

        let id: u32 = entry
            .beatmap_id
            .parse()
            .map_err(|_| AppError::Upstream(format!("bad beatmap_id '{}'", entry.beatmap_id)))?;

        let osu_file = self.download_file(id).await?;
        if osu_file.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(Beatmap {
            id,
            hash: entry.file_md5,
            title: entry.title,
            artist: entry.artist,
            creator: entry.creator,
            version: entry.version,
            max_combo: entry.max_combo.and_then(|c| c.parse().ok()),
            osu_file,
        }))
    }
}
