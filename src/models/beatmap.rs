//! Beatmap model

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a request identifies a beatmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeatmapRef {
    Id(u32),
    Hash(String),
}

impl BeatmapRef {
    /// Prefer the ID when both are supplied
    pub fn from_parts(id: Option<u32>, hash: Option<String>) -> Option<Self> {
        match (id, hash) {
            (Some(id), _) => Some(Self::Id(id)),
            (None, Some(hash)) => Some(Self::Hash(hash)),
            (None, None) => None,
        }
    }
}

impl fmt::Display for BeatmapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id:{id}"),
            Self::Hash(hash) => write!(f, "hash:{hash}"),
        }
    }
}

/// A beatmap with its `.osu` file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beatmap {
    pub id: u32,
    pub hash: String,
    pub title: String,
    pub artist: String,
    pub creator: String,
    pub version: String,
    pub max_combo: Option<u32>,
    #[serde(skip_serializing)]
    pub osu_file: String,
}

/// Beatmap fields returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeatmapSummary {
    pub id: u32,
    pub hash: String,
    pub title: String,
    pub artist: String,
    pub creator: String,
    pub version: String,
    pub max_combo: Option<u32>,
}

impl From<&Beatmap> for BeatmapSummary {
    fn from(beatmap: &Beatmap) -> Self {
        Self {
            id: beatmap.id,
            hash: beatmap.hash.clone(),
            title: beatmap.title.clone(),
            artist: beatmap.artist.clone(),
            creator: beatmap.creator.clone(),
            version: beatmap.version.clone(),
            max_combo: beatmap.max_combo,
        }
    }
}
