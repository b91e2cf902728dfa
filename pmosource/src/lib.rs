//! # PMOSource
//!
//! Common traits and types for PMOMusic library backends.
//!
//! A backend exposes a remote catalog to the host application through a
//! hierarchical URI space. The host only ever speaks in terms of URIs,
//! [`Ref`]s and [`Track`]s; how a backend resolves them is its own business.
//!
//! ## Features
//!
//! - **Navigation**: `browse` returns the children of a directory URI.
//! - **Metadata lookup**: `lookup` and `get_images` never fail, absence is
//!   an empty result.
//! - **Playback**: `translate_uri` turns a playable URI into a concrete,
//!   fetchable media URL.
//! - **Send + Sync**: Ready for async servers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pmosource::MusicSource;
//!
//! let root = source.root_directory();
//! for child in source.browse(&root.uri).await? {
//!     println!("{} ({:?})", child.name, child.kind);
//! }
//! ```

pub mod models;

use std::collections::HashMap;
use std::fmt::Debug;

pub use async_trait::async_trait;
pub use models::{Image, Ref, RefKind, SearchResult, Track};

/// Error types for music source operations
#[derive(Debug, thiserror::Error)]
pub enum MusicSourceError {
    #[error("Source not available: {0}")]
    SourceUnavailable(String),

    #[error("Invalid response from source: {0}")]
    InvalidResponse(String),

    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    #[error("Browse error: {0}")]
    BrowseError(String),

    #[error("URI resolution failed: {0}")]
    UriResolutionError(String),

    #[error("Feature not supported: {0}")]
    NotSupported(String),
}

/// Result type for music source operations
pub type Result<T> = std::result::Result<T, MusicSourceError>;

/// Main trait for library backends
///
/// This trait defines the fixed interface the host application calls into.
/// All URIs are wire strings of the form `<scheme>:<path>`, where `<scheme>`
/// is one of [`MusicSource::uri_schemes`].
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use in async servers. The
/// host may still serialize calls to a given backend.
#[async_trait]
pub trait MusicSource: Debug + Send + Sync {
    // ============= Basic Information =============

    /// Returns the human-readable name of the backend
    fn name(&self) -> &str;

    /// URI schemes handled by this backend
    ///
    /// The host routes every URI whose scheme appears here to this backend.
    fn uri_schemes(&self) -> &[&str];

    /// Returns the top-level directory shown by the host
    fn root_directory(&self) -> Ref;

    // ============= Navigation =============

    /// Browse a directory by its URI
    ///
    /// Returns the ordered children of the directory. Upstream failures are
    /// surfaced as errors; a backend must never return a partial listing.
    async fn browse(&self, uri: &str) -> Result<Vec<Ref>>;

    /// Force the backend to forget cached listings
    ///
    /// An empty `uri` means every listing.
    async fn refresh(&self, uri: &str);

    // ============= Metadata =============

    /// Looks up the tracks behind a URI
    ///
    /// Absence is routine: unknown URIs yield an empty vector, never an error.
    async fn lookup(&self, uri: &str) -> Vec<Track>;

    /// Returns the images known for each requested URI
    ///
    /// URIs without any image are omitted from the map.
    async fn get_images(&self, uris: &[String]) -> HashMap<String, Vec<Image>>;

    /// Search the catalog
    ///
    /// Backends that do not support search return an empty result.
    async fn search(&self, query: &str) -> SearchResult {
        let _ = query;
        SearchResult::default()
    }

    // ============= Playback =============

    /// Resolves a playable URI into a concrete media URL
    ///
    /// The returned URL may be short-lived; hosts must not cache it.
    async fn translate_uri(&self, uri: &str) -> Result<String>;
}
