//! Gestion des erreurs pour le backend SoundCloud

use pmosource::MusicSourceError;
use thiserror::Error;

/// Type Result personnalisé pour pmosoundcloud
pub type Result<T> = std::result::Result<T, SoundCloudError>;

/// Erreurs possibles lors de l'utilisation du backend SoundCloud
#[derive(Error, Debug)]
pub enum SoundCloudError {
    /// Erreur réseau ou timeout
    #[error("SoundCloud unavailable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    /// Réponse HTTP non 2xx
    #[error("SoundCloud API error (status {code}): {message}")]
    UpstreamStatus { code: u16, message: String },

    /// Corps de réponse illisible
    #[error("Malformed SoundCloud response: {0}")]
    UpstreamDecode(#[from] serde_json::Error),

    /// URI qui n'appartient pas au schéma soundcloudsimple
    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// Absence d'une ressource (signal doux, jamais propagé à l'hôte)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// URL invalide
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Erreur de configuration (anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Paramètre de configuration manquant ou invalide
    #[error("SoundCloud configuration error: {0}")]
    Configuration(String),
}

impl SoundCloudError {
    /// Crée une erreur depuis un code de statut HTTP et un message
    pub fn from_status_code(code: u16, message: impl Into<String>) -> Self {
        Self::UpstreamStatus {
            code,
            message: message.into(),
        }
    }

    /// Crée une erreur d'identifiant
    pub fn malformed(uri: impl Into<String>) -> Self {
        Self::MalformedIdentifier(uri.into())
    }

    /// Vrai pour les pannes de transport et les statuts d'erreur de l'API
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            SoundCloudError::UpstreamUnavailable(_) | SoundCloudError::UpstreamStatus { .. }
        )
    }

    /// Vrai pour les réponses impossibles à décoder
    pub fn is_decode_error(&self) -> bool {
        matches!(self, SoundCloudError::UpstreamDecode(_))
    }
}

impl From<SoundCloudError> for MusicSourceError {
    fn from(err: SoundCloudError) -> Self {
        match err {
            SoundCloudError::UpstreamUnavailable(_) | SoundCloudError::UpstreamStatus { .. } => {
                MusicSourceError::SourceUnavailable(err.to_string())
            }
            SoundCloudError::UpstreamDecode(_) => {
                MusicSourceError::InvalidResponse(err.to_string())
            }
            SoundCloudError::MalformedIdentifier(uri) => MusicSourceError::InvalidUri(uri),
            other => MusicSourceError::BrowseError(other.to_string()),
        }
    }
}
