//! Music source implementation for SoundCloud
//!
//! This module implements the [`pmosource::MusicSource`] trait on top of
//! [`SoundCloudLibrary`] and [`SoundCloudPlayback`]. It is the only place
//! where host-supplied URI strings are parsed.

use crate::api::SoundCloudApi;
use crate::cache::CatalogCache;
use crate::config_ext::SoundCloudConfigExt;
use crate::error::Result;
use crate::ids::{ObjectId, URI_SCHEME};
use crate::library::SoundCloudLibrary;
use crate::playback::SoundCloudPlayback;
use pmoconfig::Config;
use pmosource::{async_trait, Image, MusicSource, Ref, SearchResult, Track};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Name of the top-level directory shown by the host
pub const ROOT_NAME: &str = "SoundCloud";

const URI_SCHEMES: [&str; 1] = [URI_SCHEME];

/// SoundCloud backend: catalog browsing plus play-time URL translation
///
/// One instance owns one [`CatalogCache`]; the library and the playback
/// translator share the same upstream client.
///
/// # Examples
///
/// ```no_run
/// use pmosoundcloud::SoundCloudSource;
/// use pmosource::MusicSource;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = SoundCloudSource::from_config()?;
///     let root = source.root_directory();
///     for child in source.browse(&root.uri).await? {
///         println!("{}", child.name);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct SoundCloudSource {
    library: SoundCloudLibrary,
    playback: SoundCloudPlayback,
}

impl SoundCloudSource {
    /// Creates a source for `user_id` with a fresh cache
    pub fn new(api: SoundCloudApi, user_id: impl Into<String>, cache: CatalogCache) -> Self {
        let api = Arc::new(api);
        Self {
            library: SoundCloudLibrary::new(api.clone(), Arc::new(cache), user_id),
            playback: SoundCloudPlayback::new(api),
        }
    }

    /// Creates a source from the global pmoconfig configuration
    pub fn from_config() -> Result<Self> {
        let config = pmoconfig::get_config();
        Self::from_config_obj(config.as_ref())
    }

    /// Creates a source from a specific Config object
    pub fn from_config_obj(config: &Config) -> Result<Self> {
        let user_id = config.get_soundcloud_user_id()?;

        let api = SoundCloudApi::builder()
            .api_base(config.get_soundcloud_api_base())
            .client_id(config.get_soundcloud_client_id()?)
            .auth_token(config.get_soundcloud_auth_token())
            .page_limit(config.get_soundcloud_page_limit())
            .timeout(Duration::from_secs(config.get_soundcloud_timeout_secs()))
            .build()?;

        let cache = CatalogCache::with_ttl_minutes(config.get_soundcloud_cache_minutes());

        info!("SoundCloud source configured for user {}", user_id);
        Ok(Self::new(api, user_id, cache))
    }

    pub fn library(&self) -> &SoundCloudLibrary {
        &self.library
    }

    pub fn playback(&self) -> &SoundCloudPlayback {
        &self.playback
    }
}

#[async_trait]
impl MusicSource for SoundCloudSource {
    fn name(&self) -> &str {
        ROOT_NAME
    }

    fn uri_schemes(&self) -> &[&str] {
        &URI_SCHEMES
    }

    fn root_directory(&self) -> Ref {
        Ref::directory(ObjectId::root().key(), ROOT_NAME)
    }

    async fn browse(&self, uri: &str) -> pmosource::Result<Vec<Ref>> {
        let id: ObjectId = uri.parse()?;
        Ok(self.library.browse(&id).await?)
    }

    async fn refresh(&self, uri: &str) {
        if uri.is_empty() {
            self.library.refresh(None);
            return;
        }
        match uri.parse::<ObjectId>() {
            Ok(id) => self.library.refresh(Some(&id)),
            Err(e) => debug!("Ignoring refresh of {}: {}", uri, e),
        }
    }

    async fn lookup(&self, uri: &str) -> Vec<Track> {
        uri.parse::<ObjectId>()
            .ok()
            .and_then(|id| self.library.lookup_track(&id))
            .into_iter()
            .collect()
    }

    async fn get_images(&self, uris: &[String]) -> HashMap<String, Vec<Image>> {
        let ids: Vec<ObjectId> = uris.iter().filter_map(|uri| uri.parse().ok()).collect();

        self.library
            .lookup_images(&ids)
            .into_iter()
            .map(|(uri, image)| (uri, vec![image]))
            .collect()
    }

    async fn search(&self, query: &str) -> SearchResult {
        self.library.search(query)
    }

    async fn translate_uri(&self, uri: &str) -> pmosource::Result<String> {
        let id: ObjectId = uri.parse()?;
        Ok(self.playback.translate(&id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmosource::MusicSourceError;

    fn source() -> SoundCloudSource {
        let api = SoundCloudApi::new("client").unwrap();
        SoundCloudSource::new(api, "1", CatalogCache::new())
    }

    #[test]
    fn test_identity() {
        let source = source();
        assert_eq!(source.name(), "SoundCloud");
        assert_eq!(source.uri_schemes(), &["soundcloudsimple"]);
        assert_eq!(source.root_directory().uri, "soundcloudsimple:root");
    }

    #[tokio::test]
    async fn test_malformed_uris() {
        let source = source();

        let err = source.browse("spotify:root").await.unwrap_err();
        assert!(matches!(err, MusicSourceError::InvalidUri(_)));

        let err = source.translate_uri("soundcloudsimple:root").await.unwrap_err();
        assert!(matches!(err, MusicSourceError::InvalidUri(_)));

        // les lectures ne lèvent jamais d'erreur
        assert!(source.lookup("garbage").await.is_empty());
        assert!(source
            .get_images(&["garbage".to_string()])
            .await
            .is_empty());
        source.refresh("garbage").await;
    }

    #[tokio::test]
    async fn test_search_is_empty() {
        assert!(source().search("anything").await.is_empty());
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        assert!(SoundCloudSource::from_config_obj(&config).is_err());

        config.set_soundcloud_user_id("1").unwrap();
        config.set_soundcloud_client_id("client").unwrap();
        config.set_soundcloud_cache_minutes(30).unwrap();

        let source = SoundCloudSource::from_config_obj(&config).unwrap();
        assert_eq!(source.library().user_id(), "1");
        assert_eq!(source.library().cache().ttl_minutes(), 30);
    }
}
