//! Cache en mémoire du catalogue
//!
//! Trois magasins typés, indexés par la forme filaire des identifiants :
//! - listings : invalidés par `refresh` ou par l'expiration globale
//! - tracks : écrasés seulement par une nouvelle insertion
//! - images : idem
//!
//! L'expiration est grossière : un seul horodatage de dernier rafraîchissement
//! pour tout le cache, jamais par entrée. Un unique mutex protège l'ensemble ;
//! il n'est tenu que le temps d'un accès à une table.

use chrono::{DateTime, Utc};
use pmosource::{Image, Ref, Track};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Durée de vie par défaut des listings (une journée)
pub const DEFAULT_CACHE_MINUTES: u64 = 1440;

#[derive(Debug)]
struct CacheState {
    listings: HashMap<String, Vec<Ref>>,
    tracks: HashMap<String, Track>,
    images: HashMap<String, Image>,
    last_refresh: DateTime<Utc>,
}

/// Cache principal du backend
#[derive(Debug)]
pub struct CatalogCache {
    state: Mutex<CacheState>,
    ttl_minutes: u64,
}

impl CatalogCache {
    /// Crée un cache vide avec la durée de vie par défaut
    pub fn new() -> Self {
        Self::with_ttl_minutes(DEFAULT_CACHE_MINUTES)
    }

    /// Crée un cache vide dont les listings expirent après `ttl_minutes`
    pub fn with_ttl_minutes(ttl_minutes: u64) -> Self {
        Self::with_last_refresh(ttl_minutes, Utc::now())
    }

    /// Crée un cache vide dont le dernier rafraîchissement date de `last_refresh`
    pub fn with_last_refresh(ttl_minutes: u64, last_refresh: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(CacheState {
                listings: HashMap::new(),
                tracks: HashMap::new(),
                images: HashMap::new(),
                last_refresh,
            }),
            ttl_minutes,
        }
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ttl_minutes(&self) -> u64 {
        self.ttl_minutes
    }

    /// Horodatage du dernier rafraîchissement complet
    pub fn last_refresh(&self) -> DateTime<Utc> {
        self.state().last_refresh
    }

    // ============ Expiration ============

    /// Vrai si plus de `ttl_minutes` minutes entières se sont écoulées à `now`
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        let elapsed = now.signed_duration_since(self.state().last_refresh);
        elapsed.num_minutes().unsigned_abs() > self.ttl_minutes
    }

    /// Vide tous les listings s'ils ont expiré à `now`
    ///
    /// Retourne `true` si le cache a été vidé ; l'horodatage est alors remis à `now`.
    pub fn expire_if_stale(&self, now: DateTime<Utc>) -> bool {
        let mut state = self.state();
        let elapsed = now.signed_duration_since(state.last_refresh);
        if elapsed.num_minutes().unsigned_abs() <= self.ttl_minutes {
            return false;
        }

        info!(
            "Clearing listing cache ({} minutes since last refresh)",
            elapsed.num_minutes()
        );
        state.listings.clear();
        state.last_refresh = now;
        true
    }

    // ============ Listings ============

    /// Récupère un listing depuis le cache
    pub fn get_listing(&self, id: &str) -> Option<Vec<Ref>> {
        self.state().listings.get(id).cloned()
    }

    /// Ajoute un listing au cache
    pub fn put_listing(&self, id: String, listing: Vec<Ref>) {
        self.state().listings.insert(id, listing);
    }

    /// Invalide un listing
    pub fn invalidate(&self, id: &str) {
        self.state().listings.remove(id);
    }

    /// Invalide tous les listings
    pub fn invalidate_all(&self) {
        self.state().listings.clear();
    }

    // ============ Tracks ============

    pub fn get_track(&self, id: &str) -> Option<Track> {
        self.state().tracks.get(id).cloned()
    }

    pub fn put_track(&self, id: String, track: Track) {
        self.state().tracks.insert(id, track);
    }

    // ============ Images ============

    pub fn get_image(&self, id: &str) -> Option<Image> {
        self.state().images.get(id).cloned()
    }

    pub fn put_image(&self, id: String, image: Image) {
        self.state().images.insert(id, image);
    }

    // ============ Maintenance ============

    /// Retourne des statistiques sur le cache
    pub fn stats(&self) -> CacheStats {
        let state = self.state();
        CacheStats {
            listings_count: state.listings.len(),
            tracks_count: state.tracks.len(),
            images_count: state.images.len(),
            last_refresh: state.last_refresh,
        }
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistiques du cache
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    pub listings_count: usize,
    pub tracks_count: usize,
    pub images_count: usize,
    pub last_refresh: DateTime<Utc>,
}

impl CacheStats {
    /// Retourne le nombre total d'entrées en cache
    pub fn total_count(&self) -> usize {
        self.listings_count + self.tracks_count + self.images_count
    }
}
