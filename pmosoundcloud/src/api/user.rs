//! Profils, abonnements et tracks d'un compte

use super::SoundCloudApi;
use crate::error::{Result, SoundCloudError};
use crate::models::{Collection, StreamActivity, TrackRecord, UserProfile};
use tracing::{debug, info};

/// Éléments de la première page ; les pages suivantes ne sont pas suivies
fn first_page<T>(page: Collection<T>, endpoint: &str) -> Vec<T> {
    if page.is_truncated() {
        debug!(
            "{} has more than {} item(s), only the first page is used",
            endpoint,
            page.collection.len()
        );
    }
    page.collection
}

impl SoundCloudApi {
    fn limit_param(&self) -> (&'static str, String) {
        ("limit", self.page_limit.to_string())
    }

    /// Récupère le profil d'un compte
    pub async fn get_user(&self, user_id: &str) -> Result<UserProfile> {
        debug!("Fetching profile of user {}", user_id);
        self.get(&format!("/users/{user_id}"), &[]).await
    }

    /// Récupère les comptes suivis, dans l'ordre de l'API
    pub async fn get_followings(&self, user_id: &str) -> Result<Vec<UserProfile>> {
        info!("Loading followings for user {}", user_id);

        let endpoint = format!("/users/{user_id}/followings");
        let page: Collection<UserProfile> = self.get(&endpoint, &[self.limit_param()]).await?;

        Ok(first_page(page, &endpoint))
    }

    /// Récupère les tracks publiées par un compte
    pub async fn get_user_tracks(&self, user_id: &str) -> Result<Vec<TrackRecord>> {
        info!("Loading tracks of user {}", user_id);

        let endpoint = format!("/users/{user_id}/tracks");
        let page: Collection<TrackRecord> = self.get(&endpoint, &[self.limit_param()]).await?;

        Ok(first_page(page, &endpoint))
    }

    /// Récupère le flux personnel tel que calculé par SoundCloud
    ///
    /// Nécessite un token OAuth. Les activités sans track (playlists,
    /// reposts de playlists) sont ignorées.
    pub async fn get_personal_stream(&self) -> Result<Vec<TrackRecord>> {
        if self.auth_token().is_none() {
            return Err(SoundCloudError::Configuration(
                "auth_token is required to read the personal stream".to_string(),
            ));
        }

        info!("Loading personal stream");

        let page: Collection<StreamActivity> = self.get("/stream", &[self.limit_param()]).await?;

        Ok(first_page(page, "/stream")
            .into_iter()
            .filter_map(|activity| activity.track)
            .collect())
    }
}
