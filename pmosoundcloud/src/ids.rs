//! Schéma d'identifiants `soundcloudsimple:`
//!
//! Toutes les URIs exposées à l'hôte appartiennent à l'une de ces formes :
//!
//! ```text
//! soundcloudsimple:root                  racine (flux + comptes suivis)
//! soundcloudsimple:user<id>              tracks d'un compte suivi
//! soundcloudsimple:stream                flux personnel agrégé
//! soundcloudsimple:stream:<adresse>      track vue depuis le flux
//! soundcloudsimple:<adresse>             track (adresse média brute)
//! ```
//!
//! Le parsing teste les formes de la plus spécifique à la plus générique :
//! `root` et `stream` exacts, puis le préfixe `stream:`, puis `user`, et enfin
//! l'adresse média brute.

use crate::error::{Result, SoundCloudError};
use std::fmt;
use std::str::FromStr;

/// Schéma d'URI enregistré auprès de l'hôte
pub const URI_SCHEME: &str = "soundcloudsimple";

const ROOT: &str = "root";
const STREAM: &str = "stream";
const STREAM_PREFIX: &str = "stream:";
const USER_PREFIX: &str = "user";

/// Identifiant d'un noeud du catalogue
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectId {
    /// Racine du catalogue
    Root,
    /// Tracks d'un compte suivi
    User(String),
    /// Flux personnel agrégé
    Stream,
    /// Track du flux, alias d'une [`ObjectId::Track`]
    StreamTrack(String),
    /// Track jouable, porte l'adresse média
    Track(String),
}

/// Vrai si `address` peut servir d'adresse média
fn is_media_address(address: &str) -> bool {
    address.starts_with("https://") || address.starts_with("http://")
}

impl ObjectId {
    pub fn root() -> Self {
        ObjectId::Root
    }

    /// Conteneur des tracks d'un compte suivi
    pub fn user(user_id: impl Into<String>) -> Self {
        ObjectId::User(user_id.into())
    }

    pub fn stream() -> Self {
        ObjectId::Stream
    }

    /// Track jouable à partir d'une adresse média
    ///
    /// L'adresse doit être une URL absolue, sinon le schéma ne pourrait plus
    /// la distinguer des autres formes.
    pub fn track(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        if is_media_address(&address) {
            Ok(ObjectId::Track(address))
        } else {
            Err(SoundCloudError::malformed(address))
        }
    }

    /// Alias de la track dans le flux agrégé
    ///
    /// La même track peut ainsi apparaître sous son auteur et sous le flux
    /// sans collision de clé de cache.
    pub fn wrap_in_stream(&self) -> Result<ObjectId> {
        match self {
            ObjectId::Track(address) => Ok(ObjectId::StreamTrack(address.clone())),
            other => Err(SoundCloudError::malformed(other.to_string())),
        }
    }

    /// Inverse de [`ObjectId::wrap_in_stream`]
    pub fn unwrap_stream(&self) -> Result<ObjectId> {
        match self {
            ObjectId::StreamTrack(address) => Ok(ObjectId::Track(address.clone())),
            other => Err(SoundCloudError::malformed(other.to_string())),
        }
    }

    /// Adresse média des identifiants jouables
    pub fn media_address(&self) -> Option<&str> {
        match self {
            ObjectId::Track(address) | ObjectId::StreamTrack(address) => Some(address),
            _ => None,
        }
    }

    pub fn is_playable(&self) -> bool {
        self.media_address().is_some()
    }

    pub fn is_container(&self) -> bool {
        !self.is_playable()
    }

    /// Clé de cache (forme filaire)
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Root => write!(f, "{URI_SCHEME}:{ROOT}"),
            ObjectId::User(id) => write!(f, "{URI_SCHEME}:{USER_PREFIX}{id}"),
            ObjectId::Stream => write!(f, "{URI_SCHEME}:{STREAM}"),
            ObjectId::StreamTrack(address) => write!(f, "{URI_SCHEME}:{STREAM_PREFIX}{address}"),
            ObjectId::Track(address) => write!(f, "{URI_SCHEME}:{address}"),
        }
    }
}

impl FromStr for ObjectId {
    type Err = SoundCloudError;

    fn from_str(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix(URI_SCHEME)
            .and_then(|r| r.strip_prefix(':'))
            .ok_or_else(|| SoundCloudError::malformed(uri))?;

        if rest == ROOT {
            return Ok(ObjectId::Root);
        }
        // "stream:" sans adresse : ancienne forme du conteneur
        if rest == STREAM || rest == STREAM_PREFIX {
            return Ok(ObjectId::Stream);
        }
        if let Some(address) = rest.strip_prefix(STREAM_PREFIX) {
            return if is_media_address(address) {
                Ok(ObjectId::StreamTrack(address.to_string()))
            } else {
                Err(SoundCloudError::malformed(uri))
            };
        }
        if let Some(user_id) = rest.strip_prefix(USER_PREFIX) {
            return if user_id.is_empty() || user_id.contains(':') {
                Err(SoundCloudError::malformed(uri))
            } else {
                Ok(ObjectId::User(user_id.to_string()))
            };
        }
        if is_media_address(rest) {
            return Ok(ObjectId::Track(rest.to_string()));
        }

        Err(SoundCloudError::malformed(uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEDIA: &str =
        "https://api-v2.soundcloud.com/media/soundcloud:tracks:1/abc/stream/progressive?client_id=x";

    #[test]
    fn test_wire_format() {
        assert_eq!(ObjectId::root().to_string(), "soundcloudsimple:root");
        assert_eq!(ObjectId::user("42").to_string(), "soundcloudsimple:user42");
        assert_eq!(ObjectId::stream().to_string(), "soundcloudsimple:stream");

        let track = ObjectId::track(MEDIA).unwrap();
        assert_eq!(track.to_string(), format!("soundcloudsimple:{MEDIA}"));
        assert_eq!(
            track.wrap_in_stream().unwrap().to_string(),
            format!("soundcloudsimple:stream:{MEDIA}")
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let ids = [
            ObjectId::root(),
            ObjectId::user("1234"),
            ObjectId::stream(),
            ObjectId::track(MEDIA).unwrap(),
            ObjectId::track(MEDIA).unwrap().wrap_in_stream().unwrap(),
        ];
        for id in ids {
            let parsed: ObjectId = id.to_string().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_stream_prefix_checked_before_fallback() {
        let uri = format!("soundcloudsimple:stream:{MEDIA}");
        let id: ObjectId = uri.parse().unwrap();
        assert_eq!(id, ObjectId::StreamTrack(MEDIA.to_string()));
        assert_eq!(id.media_address(), Some(MEDIA));
    }

    #[test]
    fn test_legacy_stream_container() {
        let id: ObjectId = "soundcloudsimple:stream:".parse().unwrap();
        assert_eq!(id, ObjectId::Stream);
    }

    #[test]
    fn test_malformed_identifiers() {
        for uri in [
            "",
            "root",
            "spotify:root",
            "soundcloudsimple:",
            "soundcloudsimple:user",
            "soundcloudsimple:streamer",
            "soundcloudsimple:stream:not-a-url",
            "soundcloudsimple:nothing",
        ] {
            let err = uri.parse::<ObjectId>().unwrap_err();
            assert!(
                matches!(err, SoundCloudError::MalformedIdentifier(_)),
                "{uri} should be malformed"
            );
        }
    }

    #[test]
    fn test_wrap_unwrap_are_inverse() {
        let track = ObjectId::track(MEDIA).unwrap();
        let wrapped = track.wrap_in_stream().unwrap();

        assert_ne!(wrapped, track);
        assert_eq!(wrapped.unwrap_stream().unwrap(), track);
        assert_eq!(
            wrapped.unwrap_stream().unwrap().wrap_in_stream().unwrap(),
            wrapped
        );
    }

    #[test]
    fn test_wrap_rejects_non_playable() {
        assert!(ObjectId::root().wrap_in_stream().is_err());
        assert!(ObjectId::user("1").wrap_in_stream().is_err());
        assert!(ObjectId::track(MEDIA).unwrap().unwrap_stream().is_err());
        // un alias de flux ne se ré-emballe pas
        let wrapped = ObjectId::track(MEDIA).unwrap().wrap_in_stream().unwrap();
        assert!(wrapped.wrap_in_stream().is_err());
    }

    #[test]
    fn test_track_requires_url() {
        assert!(ObjectId::track("root").is_err());
        assert!(ObjectId::track("http://host/x").unwrap().is_playable());
        assert!(ObjectId::stream().is_container());
    }
}
