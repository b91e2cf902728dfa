//! Structures de données renvoyées par l'API SoundCloud (api-v2)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Suffixe des images basse résolution renvoyées par l'API
const ARTWORK_SUFFIX: &str = "large.jpg";

/// Variante haute résolution substituée au suffixe
const ARTWORK_HIRES: &str = "t500x500.jpg";

/// Protocole de livraison d'un fichier directement téléchargeable
pub const PROGRESSIVE_PROTOCOL: &str = "progressive";

/// Désérialiseur flexible pour les IDs qui peuvent être des strings ou des integers
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::custom("ID must be a string or number")),
    }
}

/// Remplace l'image `large.jpg` par sa variante 500x500
pub fn normalize_artwork(url: &str) -> String {
    match url.strip_suffix(ARTWORK_SUFFIX) {
        Some(base) => format!("{base}{ARTWORK_HIRES}"),
        None => url.to_string(),
    }
}

/// Profil d'un compte (`/users/{id}` et éléments de `/followings`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Avatar en haute résolution
    pub fn avatar(&self) -> Option<String> {
        self.avatar_url.as_deref().map(normalize_artwork)
    }
}

/// Page d'une collection paginée
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub collection: Vec<T>,
    /// Page suivante, seule la première est lue
    #[serde(default)]
    pub next_href: Option<String>,
}

impl<T> Collection<T> {
    /// Vrai si l'API a d'autres pages que celle-ci
    pub fn is_truncated(&self) -> bool {
        self.next_href.as_deref().is_some_and(|href| !href.is_empty())
    }
}

/// Auteur d'une track
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TrackOwner {
    #[serde(default)]
    pub username: String,
}

/// Format d'un transcodage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscodingFormat {
    pub protocol: String,
}

/// Variante de livraison d'une track
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transcoding {
    /// Adresse de résolution de l'URL média
    pub url: String,
    pub format: TranscodingFormat,
}

impl Transcoding {
    pub fn is_progressive(&self) -> bool {
        self.format.protocol == PROGRESSIVE_PROTOCOL
    }
}

/// Liste des transcodages d'une track
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Media {
    #[serde(default)]
    pub transcodings: Vec<Transcoding>,
}

/// Track telle que renvoyée par `/users/{id}/tracks`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    /// Durée en millisecondes
    #[serde(default)]
    pub duration: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub artwork_url: Option<String>,
    #[serde(default)]
    pub user: TrackOwner,
    #[serde(default)]
    pub media: Media,
}

impl TrackRecord {
    /// Pochette en haute résolution
    pub fn artwork(&self) -> Option<String> {
        self.artwork_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(normalize_artwork)
    }

    /// Premier transcodage progressif
    pub fn progressive_transcoding(&self) -> Option<&Transcoding> {
        self.media.transcodings.iter().find(|t| t.is_progressive())
    }
}

/// Activité du flux personnel (`/stream`)
#[derive(Debug, Clone, Deserialize)]
pub struct StreamActivity {
    #[serde(default)]
    pub track: Option<TrackRecord>,
}

/// Réponse de l'adresse de résolution média
#[derive(Debug, Clone, Deserialize)]
pub struct MediaLocation {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_artwork() {
        assert_eq!(
            normalize_artwork("https://i1.sndcdn.com/avatars-000-large.jpg"),
            "https://i1.sndcdn.com/avatars-000-t500x500.jpg"
        );
        assert_eq!(
            normalize_artwork("https://i1.sndcdn.com/avatars-000-original.png"),
            "https://i1.sndcdn.com/avatars-000-original.png"
        );
    }

    #[test]
    fn test_user_profile_numeric_id() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": 1234,
            "username": "someone",
            "avatar_url": "https://i1.sndcdn.com/a-large.jpg"
        }))
        .unwrap();

        assert_eq!(profile.id, "1234");
        assert_eq!(
            profile.avatar().as_deref(),
            Some("https://i1.sndcdn.com/a-t500x500.jpg")
        );
    }

    #[test]
    fn test_track_record_decoding() {
        let track: TrackRecord = serde_json::from_value(json!({
            "id": 99,
            "title": "Song",
            "duration": 215000,
            "created_at": "2012-06-25T12:03:44Z",
            "artwork_url": null,
            "user": { "username": "artist" },
            "media": { "transcodings": [
                { "url": "https://api/hls", "preset": "mp3_0_0",
                  "format": { "protocol": "hls", "mime_type": "audio/mpeg" } },
                { "url": "https://api/progressive", "preset": "mp3_0_0",
                  "format": { "protocol": "progressive", "mime_type": "audio/mpeg" } }
            ]}
        }))
        .unwrap();

        assert_eq!(track.id, "99");
        assert_eq!(track.user.username, "artist");
        assert!(track.artwork().is_none());
        assert_eq!(
            track.progressive_transcoding().map(|t| t.url.as_str()),
            Some("https://api/progressive")
        );
        assert_eq!(track.created_at.format("%Y-%m-%d").to_string(), "2012-06-25");
    }

    #[test]
    fn test_track_without_progressive_stream() {
        let track: TrackRecord = serde_json::from_value(json!({
            "id": "1",
            "title": "Only HLS",
            "created_at": "2020-01-01T00:00:00Z",
            "media": { "transcodings": [
                { "url": "https://api/hls", "format": { "protocol": "hls" } }
            ]}
        }))
        .unwrap();

        assert!(track.progressive_transcoding().is_none());
    }

    #[test]
    fn test_collection_truncation() {
        let last: Collection<UserProfile> =
            serde_json::from_value(json!({ "collection": [], "next_href": null })).unwrap();
        assert!(!last.is_truncated());

        let more: Collection<UserProfile> = serde_json::from_value(json!({
            "collection": [{ "id": 1, "username": "a" }],
            "next_href": "https://api-v2.soundcloud.com/users/1/followings?offset=1"
        }))
        .unwrap();
        assert!(more.is_truncated());
        assert_eq!(more.collection.len(), 1);
    }
}
