//! Couche d'accès à l'API REST SoundCloud (api-v2)
//!
//! Ce module fournit une interface bas-niveau, sans état et sans cache,
//! pour lire les profils, abonnements et tracks d'un compte.
//! Aucune requête n'est rejouée en cas d'échec.

pub mod media;
pub mod user;

use crate::error::{Result, SoundCloudError};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// URL de base de l'API SoundCloud
pub const DEFAULT_API_BASE: &str = "https://api-v2.soundcloud.com";

/// Timeout des requêtes de listing
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Taille de page demandée pour les collections
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// User-Agent d'un navigateur, l'API refuse certains clients inconnus
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.93 Safari/537.36";

/// Client API bas-niveau pour communiquer avec SoundCloud
#[derive(Debug, Clone)]
pub struct SoundCloudApi {
    client: Client,
    api_base: String,
    /// Client ID public transmis avec chaque requête
    client_id: String,
    /// Token OAuth optionnel
    auth_token: Option<String>,
    page_limit: u32,
    request_timeout: Duration,
}

impl SoundCloudApi {
    /// Crée un builder pour configurer l'API
    pub fn builder() -> ApiBuilder {
        ApiBuilder::default()
    }

    /// Crée une API avec les paramètres par défaut
    pub fn new(client_id: impl Into<String>) -> Result<Self> {
        Self::builder().client_id(client_id).build()
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Nombre maximum d'éléments demandés par collection
    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Ajoute les en-têtes d'authentification
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth_token {
            Some(ref token) => request.header("Authorization", format!("OAuth {token}")),
            None => request,
        }
    }

    /// Effectue une requête GET sur un endpoint de l'API
    ///
    /// Le `client_id` est ajouté aux paramètres, le timeout de listing s'applique.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.api_base, endpoint);

        debug!("GET {} with {} params", url, params.len());

        let request = self
            .client
            .get(&url)
            .query(&[("client_id", self.client_id.as_str())])
            .query(params)
            .timeout(self.request_timeout);

        let response = self.authorize(request).send().await?;
        self.handle_response(response).await
    }

    /// Effectue une requête GET sur une URL absolue fournie par l'API
    pub(crate) async fn get_absolute<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);

        let response = self.authorize(self.client.get(url)).send().await?;
        self.handle_response(response).await
    }

    /// Traite la réponse HTTP
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("API error ({}): {}", status.as_u16(), error_text);
            return Err(SoundCloudError::from_status_code(status.as_u16(), error_text));
        }

        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse response: {}", e);
            SoundCloudError::UpstreamDecode(e)
        })
    }
}

/// Builder pour configurer un [`SoundCloudApi`]
#[derive(Debug)]
pub struct ApiBuilder {
    client: Option<Client>,
    api_base: String,
    client_id: Option<String>,
    auth_token: Option<String>,
    page_limit: u32,
    request_timeout: Duration,
    user_agent: String,
}

impl Default for ApiBuilder {
    fn default() -> Self {
        Self {
            client: None,
            api_base: DEFAULT_API_BASE.to_string(),
            client_id: None,
            auth_token: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ApiBuilder {
    /// Utilise un client HTTP existant
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// URL de base de l'API (sans `/` final)
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Token OAuth, ignoré s'il est vide
    pub fn auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    /// Timeout des requêtes de listing
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Construit l'API
    pub fn build(self) -> Result<SoundCloudApi> {
        let client_id = self
            .client_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SoundCloudError::Configuration("client_id is required".to_string()))?;

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.user_agent)
                .build()
                .map_err(|e| SoundCloudError::Configuration(format!("HTTP client: {e}")))?,
        };

        Ok(SoundCloudApi {
            client,
            api_base: self.api_base,
            client_id,
            auth_token: self.auth_token,
            page_limit: self.page_limit,
            request_timeout: self.request_timeout,
        })
    }
}
