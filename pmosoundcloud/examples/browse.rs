//! Parcours du catalogue SoundCloud configuré
//!
//! Affiche la racine, puis le contenu de chaque dossier, et traduit la
//! première track du flux en URL de lecture.
//!
//! Usage:
//! ```bash
//! cargo run --example browse
//! ```
//!
//! Nécessite `accounts.soundcloud.user_id` et `accounts.soundcloud.client_id`
//! dans la configuration pmoconfig.

use pmoconfig::get_config;
use pmosoundcloud::SoundCloudSource;
use pmosource::MusicSource;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config();
    let level = config
        .get_log_min_level()
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_lowercase())),
        )
        .init();

    let source = SoundCloudSource::from_config_obj(&config)?;
    let root = source.root_directory();

    println!("=== {} ===\n", root.name);

    let children = source.browse(&root.uri).await?;
    for dir in &children {
        let entries = match source.browse(&dir.uri).await {
            Ok(entries) => entries,
            Err(e) => {
                println!("{} : erreur ({})", dir.name, e);
                continue;
            }
        };

        println!("{} ({} tracks)", dir.name, entries.len());
        for entry in entries.iter().take(5) {
            println!("  {}", entry.name);
        }
    }

    let stream = source.browse("soundcloudsimple:stream").await?;
    if let Some(first) = stream.first() {
        let tracks = source.lookup(&first.uri).await;
        if let Some(track) = tracks.first() {
            println!("\n{} par {} ({})", track.name, track.artist, track.date());
        }
        println!("URL de lecture : {}", source.translate_uri(&first.uri).await?);
    }

    Ok(())
}
