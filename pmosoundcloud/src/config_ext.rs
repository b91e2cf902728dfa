//! Extension pour intégrer la configuration SoundCloud dans pmoconfig
//!
//! Les paramètres vivent sous `accounts.soundcloud` :
//!
//! ```yaml
//! accounts:
//!   soundcloud:
//!     user_id: "1234"
//!     client_id: "..."
//!     auth_token: ~
//!     api_base: https://api-v2.soundcloud.com
//!     page_limit: 100
//!     timeout_secs: 10
//!     cache_minutes: 1440
//! ```

use crate::api::{DEFAULT_API_BASE, DEFAULT_PAGE_LIMIT, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::cache::DEFAULT_CACHE_MINUTES;
use anyhow::{anyhow, Result};
use pmoconfig::Config;
use serde_yaml::Value;

const SECTION: [&str; 2] = ["accounts", "soundcloud"];

fn key(name: &str) -> [&str; 3] {
    [SECTION[0], SECTION[1], name]
}

/// Trait d'extension pour gérer la configuration SoundCloud dans pmoconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use pmoconfig::get_config;
/// use pmosoundcloud::SoundCloudConfigExt;
///
/// let config = get_config();
/// let user_id = config.get_soundcloud_user_id()?;
/// ```
pub trait SoundCloudConfigExt {
    /// Compte dont on parcourt les abonnements
    ///
    /// # Errors
    ///
    /// Retourne une erreur si l'identifiant n'est pas configuré
    fn get_soundcloud_user_id(&self) -> Result<String>;

    fn set_soundcloud_user_id(&self, user_id: &str) -> Result<()>;

    /// Client ID public de l'API
    ///
    /// # Errors
    ///
    /// Retourne une erreur si le client ID n'est pas configuré
    fn get_soundcloud_client_id(&self) -> Result<String>;

    fn set_soundcloud_client_id(&self, client_id: &str) -> Result<()>;

    /// Token OAuth, `None` si absent ou vide
    fn get_soundcloud_auth_token(&self) -> Option<String>;

    fn set_soundcloud_auth_token(&self, token: &str) -> Result<()>;

    /// URL de base de l'API
    fn get_soundcloud_api_base(&self) -> String;

    /// Taille de page des collections
    fn get_soundcloud_page_limit(&self) -> u32;

    /// Timeout des requêtes de listing, en secondes
    fn get_soundcloud_timeout_secs(&self) -> u64;

    /// Durée de vie des listings, en minutes
    fn get_soundcloud_cache_minutes(&self) -> u64;

    fn set_soundcloud_cache_minutes(&self, minutes: u64) -> Result<()>;
}

impl SoundCloudConfigExt for Config {
    fn get_soundcloud_user_id(&self) -> Result<String> {
        self.get_string(&key("user_id"))
            .ok_or_else(|| anyhow!("SoundCloud user_id not configured"))
    }

    fn set_soundcloud_user_id(&self, user_id: &str) -> Result<()> {
        self.set_value(&key("user_id"), Value::String(user_id.to_string()))
    }

    fn get_soundcloud_client_id(&self) -> Result<String> {
        self.get_string(&key("client_id"))
            .ok_or_else(|| anyhow!("SoundCloud client_id not configured"))
    }

    fn set_soundcloud_client_id(&self, client_id: &str) -> Result<()> {
        self.set_value(&key("client_id"), Value::String(client_id.to_string()))
    }

    fn get_soundcloud_auth_token(&self) -> Option<String> {
        self.get_string(&key("auth_token"))
    }

    fn set_soundcloud_auth_token(&self, token: &str) -> Result<()> {
        self.set_value(&key("auth_token"), Value::String(token.to_string()))
    }

    fn get_soundcloud_api_base(&self) -> String {
        self.get_string(&key("api_base"))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    fn get_soundcloud_page_limit(&self) -> u32 {
        let limit = self.get_u64_or(&key("page_limit"), DEFAULT_PAGE_LIMIT as u64);
        u32::try_from(limit).unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    fn get_soundcloud_timeout_secs(&self) -> u64 {
        self.get_u64_or(&key("timeout_secs"), DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    fn get_soundcloud_cache_minutes(&self) -> u64 {
        self.get_u64_or(&key("cache_minutes"), DEFAULT_CACHE_MINUTES)
    }

    fn set_soundcloud_cache_minutes(&self, minutes: u64) -> Result<()> {
        self.set_value(
            &key("cache_minutes"),
            Value::Number(serde_yaml::Number::from(minutes)),
        )
    }
}
