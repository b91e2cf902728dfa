//! Résolution des adresses média

use super::SoundCloudApi;
use crate::error::Result;
use crate::models::{MediaLocation, TrackRecord};
use tracing::{debug, warn};
use url::Url;

impl SoundCloudApi {
    /// Adresse de résolution du premier transcodage progressif d'une track
    ///
    /// Le `client_id` est ajouté à l'adresse. `None` signifie qu'aucun flux
    /// directement téléchargeable n'existe : la track n'est pas jouable.
    pub fn progressive_stream(&self, track: &TrackRecord) -> Option<String> {
        let transcoding = track.progressive_transcoding()?;

        match Url::parse(&transcoding.url) {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair("client_id", &self.client_id);
                Some(url.into())
            }
            Err(e) => {
                warn!(
                    "Invalid transcoding URL for track {} ({}): {}",
                    track.id, transcoding.url, e
                );
                None
            }
        }
    }

    /// Résout une adresse média en URL de lecture à durée de vie limitée
    pub async fn resolve_media_location(&self, address: &str) -> Result<String> {
        let location: MediaLocation = self.get_absolute(address).await?;
        debug!("Resolved media address {}", address);
        Ok(location.url)
    }
}
