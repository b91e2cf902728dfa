//! Host-facing models shared by every backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of navigation node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    /// Browsable container
    Directory,
    /// Playable item
    Track,
}

/// Lightweight navigation node returned by `browse`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    pub kind: RefKind,
    pub name: String,
    pub uri: String,
}

impl Ref {
    /// Creates a browsable container reference
    pub fn directory(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: RefKind::Directory,
            name: name.into(),
            uri: uri.into(),
        }
    }

    /// Creates a playable item reference
    pub fn track(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: RefKind::Track,
            name: name.into(),
            uri: uri.into(),
        }
    }

    pub fn is_track(&self) -> bool {
        self.kind == RefKind::Track
    }
}

/// Playable metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// URI of the track
    pub uri: String,
    /// Display name, usually ordinal-prefixed (`"03. Title"`)
    pub name: String,
    /// Album name
    pub album: String,
    /// Artist name
    pub artist: String,
    /// Duration in milliseconds
    pub length: u64,
    /// Upstream creation time
    pub created_at: DateTime<Utc>,
    /// Position within the listing it was resolved from (1-based)
    pub track_no: u32,
}

impl Track {
    /// Creation day formatted as `YYYY-MM-DD`
    pub fn date(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}

/// Image attached to a URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub uri: String,
}

impl Image {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Result of a catalog search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub uri: Option<String>,
    pub tracks: Vec<Track>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
