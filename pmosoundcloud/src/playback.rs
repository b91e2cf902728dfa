//! Traduction des identifiants jouables en URLs de lecture

use crate::api::SoundCloudApi;
use crate::error::{Result, SoundCloudError};
use crate::ids::ObjectId;
use std::sync::Arc;
use tracing::{debug, warn};

/// Résout les URLs média au moment de la lecture
///
/// Les URLs renvoyées expirent rapidement : rien n'est mis en cache, chaque
/// appel fait exactement une requête à l'API.
#[derive(Debug, Clone)]
pub struct SoundCloudPlayback {
    api: Arc<SoundCloudApi>,
}

impl SoundCloudPlayback {
    pub fn new(api: Arc<SoundCloudApi>) -> Self {
        Self { api }
    }

    /// URL de lecture d'une track, qu'elle vienne d'un compte ou du flux
    pub async fn translate(&self, id: &ObjectId) -> Result<String> {
        let address = id
            .media_address()
            .ok_or_else(|| SoundCloudError::malformed(id.to_string()))?;

        debug!("Translating {}", id);

        self.api
            .resolve_media_location(address)
            .await
            .inspect_err(|e| warn!("Unable to translate {}: {}", id, e))
    }
}
