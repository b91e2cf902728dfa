//! # pmosoundcloud - Backend SoundCloud pour PMOMusic
//!
//! Cette crate expose le catalogue SoundCloud d'un compte (les comptes qu'il
//! suit, leurs tracks et un flux personnel agrégé) sous forme d'une
//! arborescence d'URIs `soundcloudsimple:`, avec un cache en mémoire à durée
//! de vie limitée.
//!
//! ## Architecture
//!
//! - `ids` : schéma d'identifiants (parsing et construction des URIs)
//! - `api` : accès sans état à l'API REST SoundCloud (api-v2)
//! - `cache` : trois caches typés (listings, tracks, images) et leur expiration
//! - `library` : résolution des listings (racine, compte, flux agrégé)
//! - `playback` : traduction d'une track en URL de lecture
//! - `source` : implémentation de [`pmosource::MusicSource`] pour l'hôte
//!
//! ## Structure des modules
//!
//! ```text
//! pmosoundcloud/
//! ├── src/
//! │   ├── lib.rs              # Module principal (ce fichier)
//! │   ├── ids.rs              # Schéma d'identifiants
//! │   ├── models.rs           # Structures renvoyées par l'API
//! │   ├── api/
//! │   │   ├── mod.rs          # Client HTTP bas-niveau
//! │   │   ├── user.rs         # Profils, abonnements, tracks
//! │   │   └── media.rs        # Flux progressifs et URLs de lecture
//! │   ├── cache.rs            # Cache en mémoire
//! │   ├── library.rs          # Résolution des listings
//! │   ├── playback.rs         # Traduction des URIs jouables
//! │   ├── source.rs           # Intégration MusicSource
//! │   ├── config_ext.rs       # Extension pmoconfig
//! │   └── error.rs            # Gestion des erreurs
//! ```
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use pmosoundcloud::SoundCloudSource;
//! use pmosource::MusicSource;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Utilise automatiquement la config depuis pmoconfig
//!     let source = SoundCloudSource::from_config()?;
//!
//!     for entry in source.browse("soundcloudsimple:stream").await? {
//!         println!("{}", entry.name);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Cache
//!
//! Les listings sont gardés `cache_minutes` minutes (une journée par défaut),
//! puis tous purgés d'un coup au prochain appel. Les tracks et images ne sont
//! jamais purgées, seulement remplacées. Les URLs de lecture ne sont jamais
//! mises en cache : elles expirent côté SoundCloud.

pub mod api;
pub mod cache;
pub mod config_ext;
pub mod error;
pub mod ids;
pub mod library;
pub mod models;
pub mod playback;
pub mod source;

pub use api::SoundCloudApi;
pub use cache::{CacheStats, CatalogCache};
pub use config_ext::SoundCloudConfigExt;
pub use error::{Result, SoundCloudError};
pub use ids::{ObjectId, URI_SCHEME};
pub use library::SoundCloudLibrary;
pub use playback::SoundCloudPlayback;
pub use source::SoundCloudSource;
