//! Navigation dans le catalogue SoundCloud
//!
//! [`SoundCloudLibrary`] transforme un [`ObjectId`] en liste ordonnée de
//! [`Ref`]s. Trois algorithmes de listing existent :
//!
//! - **racine** : le flux agrégé puis un dossier par compte suivi
//! - **compte** : les tracks jouables d'un compte suivi, numérotées
//! - **flux** : les tracks de tous les comptes suivis, du jour le plus récent
//!   au plus ancien, limitées à [`MAX_STREAM_TRACKS`]
//!
//! Un listing n'est mis en cache que s'il a été entièrement résolu : une
//! erreur de l'API fait échouer l'appel sans rien mémoriser.

use crate::api::SoundCloudApi;
use crate::cache::CatalogCache;
use crate::error::Result;
use crate::ids::ObjectId;
use crate::models::TrackRecord;
use chrono::Utc;
use pmosource::{Image, Ref, SearchResult, Track};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Libellé du dossier du flux agrégé (les espaces le placent en tête des tris)
pub const STREAM_LABEL: &str = "   My Stream";

/// Nombre maximum de tracks dans le flux agrégé
pub const MAX_STREAM_TRACKS: usize = 99;

/// Nom affiché d'une track : `NN. titre`
fn numbered(track_no: usize, title: &str) -> String {
    format!("{track_no:02}. {title}")
}

/// Retire le préfixe `NN. ` ajouté par [`numbered`]
fn strip_ordinal(name: &str) -> &str {
    match name.split_once(". ") {
        Some((prefix, title))
            if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            title
        }
        _ => name,
    }
}

/// Résolveur du catalogue
#[derive(Debug)]
pub struct SoundCloudLibrary {
    api: Arc<SoundCloudApi>,
    cache: Arc<CatalogCache>,
    /// Compte dont on parcourt les abonnements
    user_id: String,
}

impl SoundCloudLibrary {
    pub fn new(api: Arc<SoundCloudApi>, cache: Arc<CatalogCache>, user_id: impl Into<String>) -> Self {
        Self {
            api,
            cache,
            user_id: user_id.into(),
        }
    }

    pub fn cache(&self) -> &Arc<CatalogCache> {
        &self.cache
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    // ============ Navigation ============

    /// Retourne les enfants d'un identifiant
    ///
    /// Les listings expirés sont d'abord purgés. Une track n'a pas d'enfant.
    pub async fn browse(&self, id: &ObjectId) -> Result<Vec<Ref>> {
        self.cache.expire_if_stale(Utc::now());

        match id {
            ObjectId::Stream => self.cached(id, || self.load_stream()).await,
            ObjectId::Root | ObjectId::User(_) => self.account_listing(id).await,
            ObjectId::Track(_) | ObjectId::StreamTrack(_) => Ok(Vec::new()),
        }
    }

    /// Vide le cache des listings : tout si `id` est `None`, sinon un seul
    pub fn refresh(&self, id: Option<&ObjectId>) {
        match id {
            None => {
                info!("Refreshing every listing");
                self.cache.invalidate_all();
            }
            Some(id) => {
                info!("Refreshing listing {}", id);
                self.cache.invalidate(&id.key());
            }
        }
    }

    // ============ Métadonnées ============

    /// Track en cache, `None` si inconnue
    pub fn lookup_track(&self, id: &ObjectId) -> Option<Track> {
        self.cache.get_track(&id.key())
    }

    /// Images en cache pour les identifiants demandés
    ///
    /// Les identifiants sans image sont absents du résultat.
    pub fn lookup_images(&self, ids: &[ObjectId]) -> HashMap<String, Image> {
        ids.iter()
            .filter_map(|id| {
                let key = id.key();
                self.cache.get_image(&key).map(|image| (key, image))
            })
            .collect()
    }

    /// La recherche n'est pas supportée : résultat toujours vide
    pub fn search(&self, query: &str) -> SearchResult {
        debug!("Search is not supported, ignoring query {:?}", query);
        SearchResult::default()
    }

    // ============ Chargement ============

    /// Sert un listing depuis le cache ou le calcule puis le mémorise
    async fn cached<F, Fut>(&self, id: &ObjectId, load: F) -> Result<Vec<Ref>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Ref>>>,
    {
        let key = id.key();
        if let Some(listing) = self.cache.get_listing(&key) {
            debug!("Listing {} found in cache", key);
            return Ok(listing);
        }

        let listing = load().await?;
        self.cache.put_listing(key, listing.clone());
        Ok(listing)
    }

    /// Listing de la racine ou d'un compte suivi
    async fn account_listing(&self, id: &ObjectId) -> Result<Vec<Ref>> {
        match id {
            ObjectId::Root => self.cached(id, || self.load_root()).await,
            ObjectId::User(user_id) => self.cached(id, || self.load_user(user_id)).await,
            _ => Ok(Vec::new()),
        }
    }

    /// Dossier du flux puis un dossier par compte suivi, dans l'ordre de l'API
    async fn load_root(&self) -> Result<Vec<Ref>> {
        let profile = self.api.get_user(&self.user_id).await?;
        let followings = self.api.get_followings(&self.user_id).await?;

        let stream_id = ObjectId::stream();
        let mut refs = Vec::with_capacity(followings.len() + 1);
        refs.push(Ref::directory(stream_id.key(), STREAM_LABEL));
        if let Some(avatar) = profile.avatar() {
            self.cache.put_image(stream_id.key(), Image::new(avatar));
        }

        for following in followings {
            let id = ObjectId::user(following.id.as_str());
            if let Some(avatar) = following.avatar() {
                self.cache.put_image(id.key(), Image::new(avatar));
            }
            refs.push(Ref::directory(id.key(), following.username));
        }

        info!("Root listing: {} followed account(s)", refs.len() - 1);
        Ok(refs)
    }

    /// Tracks jouables d'un compte, numérotées à partir de 1
    async fn load_user(&self, user_id: &str) -> Result<Vec<Ref>> {
        let records = self.api.get_user_tracks(user_id).await?;

        let mut refs = Vec::with_capacity(records.len());
        for record in records {
            let Some(id) = self.playable_id(&record) else {
                continue;
            };

            let track_no = refs.len() + 1;
            let name = numbered(track_no, &record.title);
            let key = id.key();

            if let Some(artwork) = record.artwork() {
                self.cache.put_image(key.clone(), Image::new(artwork));
            }
            self.cache.put_track(
                key.clone(),
                Track {
                    uri: key.clone(),
                    name: name.clone(),
                    album: record.user.username.clone(),
                    artist: record.user.username.clone(),
                    length: record.duration,
                    created_at: record.created_at,
                    track_no: track_no as u32,
                },
            );
            refs.push(Ref::track(key, name));
        }

        info!("User {}: {} playable track(s)", user_id, refs.len());
        Ok(refs)
    }

    /// Identifiant jouable d'une track, `None` si aucun flux progressif
    fn playable_id(&self, record: &TrackRecord) -> Option<ObjectId> {
        let Some(address) = self.api.progressive_stream(record) else {
            debug!(
                "Skipping track {} ({}): no progressive stream",
                record.id, record.title
            );
            return None;
        };

        match ObjectId::track(address) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Skipping track {}: {}", record.id, e);
                None
            }
        }
    }

    /// Flux agrégé : tracks de tous les comptes suivis, les plus récentes d'abord
    async fn load_stream(&self) -> Result<Vec<Ref>> {
        let root = self.account_listing(&ObjectId::Root).await?;

        let mut entries: Vec<(ObjectId, Track)> = Vec::new();
        for dir in root.iter().filter(|r| !r.is_track()) {
            let id: ObjectId = dir.uri.parse()?;
            if !matches!(id, ObjectId::User(_)) {
                continue;
            }

            for entry in self.account_listing(&id).await? {
                if !entry.is_track() {
                    continue;
                }
                match self.cache.get_track(&entry.uri) {
                    Some(track) => entries.push((entry.uri.parse()?, track)),
                    None => warn!("Track {} missing from cache, skipped", entry.uri),
                }
            }
        }

        // tri stable sur le jour de création : le même jour, l'ordre des
        // comptes puis celui de chaque compte est conservé
        entries.sort_by_key(|(_, track)| Reverse(track.created_at.date_naive()));

        let mut refs = Vec::with_capacity(entries.len());
        for (index, (id, track)) in entries.into_iter().enumerate() {
            let track_no = index + 1;
            let wrapped = id.wrap_in_stream()?.key();
            let name = numbered(track_no, strip_ordinal(&track.name));

            if let Some(image) = self.cache.get_image(&id.key()) {
                self.cache.put_image(wrapped.clone(), image);
            }
            self.cache.put_track(
                wrapped.clone(),
                Track {
                    uri: wrapped.clone(),
                    name: name.clone(),
                    track_no: track_no as u32,
                    ..track
                },
            );
            refs.push(Ref::track(wrapped, name));
        }
        refs.truncate(MAX_STREAM_TRACKS);

        info!("Stream listing: {} track(s)", refs.len());
        Ok(refs)
    }
}
