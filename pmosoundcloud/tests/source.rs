//! Tests d'intégration de la source, vue par l'hôte à travers MusicSource

mod common;

use common::*;
use pmosoundcloud::{CatalogCache, SoundCloudSource};
use pmosource::{MusicSource, MusicSourceError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source(server: &MockServer) -> SoundCloudSource {
    SoundCloudSource::new(api(server), USER_ID, CatalogCache::new())
}

#[tokio::test]
async fn test_browse_lookup_and_images() {
    let server = MockServer::start().await;
    mount_root(&server, &[(1, "alice")], 1).await;
    mount_tracks(
        &server,
        1,
        vec![track(&server, 10, "A", "2021-01-03T00:00:00Z")],
        1,
    )
    .await;
    let source = source(&server);

    let root = source.root_directory();
    let children = source.browse(&root.uri).await.unwrap();
    assert_eq!(children.len(), 2);

    // forme historique du flux
    let stream = source.browse("soundcloudsimple:stream:").await.unwrap();
    assert_eq!(stream.len(), 1);
    assert_eq!(stream[0].name, "01. A");

    let tracks = source.lookup(&stream[0].uri).await;
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].uri, stream[0].uri);
    assert!(source.lookup("soundcloudsimple:user42").await.is_empty());

    let uris = vec![
        "soundcloudsimple:stream".to_string(),
        "soundcloudsimple:user1".to_string(),
        "soundcloudsimple:user42".to_string(),
        "not a uri".to_string(),
    ];
    let images = source.get_images(&uris).await;
    assert_eq!(images.len(), 2);
    assert_eq!(images["soundcloudsimple:user1"].len(), 1);
    assert_eq!(images["soundcloudsimple:user1"][0].uri, hires_avatar("alice"));
}

#[tokio::test]
async fn test_refresh_empty_uri_clears_everything() {
    let server = MockServer::start().await;
    mount_root(&server, &[(1, "alice")], 2).await;
    let source = source(&server);

    source.browse("soundcloudsimple:root").await.unwrap();
    source.refresh("").await;
    source.browse("soundcloudsimple:root").await.unwrap();
}

#[tokio::test]
async fn test_errors_are_mapped_for_the_host() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{USER_ID}")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/1/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{"))
        .mount(&server)
        .await;
    let source = source(&server);

    let err = source.browse("soundcloudsimple:root").await.unwrap_err();
    assert!(matches!(err, MusicSourceError::SourceUnavailable(_)));

    let err = source.browse("soundcloudsimple:user1").await.unwrap_err();
    assert!(matches!(err, MusicSourceError::InvalidResponse(_)));

    let err = source.browse("soundcloudsimple:").await.unwrap_err();
    assert!(matches!(err, MusicSourceError::InvalidUri(_)));
}

#[tokio::test]
async fn test_translate_uri() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/media/10/progressive"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "url": "https://cf-media.sndcdn.com/a.mp3" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let source = source(&server);

    let url = source.translate_uri(&track_uri(&server, 10)).await.unwrap();
    assert_eq!(url, "https://cf-media.sndcdn.com/a.mp3");
}

#[tokio::test]
async fn test_personal_stream_requires_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stream"))
        .and(header("Authorization", "OAuth secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [
                { "type": "track", "track": track(&server, 10, "A", "2021-01-03T00:00:00Z") },
                { "type": "playlist" },
                { "type": "track-repost", "track": track(&server, 11, "B", "2021-01-02T00:00:00Z") }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let anonymous = api(&server);
    assert!(anonymous.get_personal_stream().await.is_err());

    let authorized = pmosoundcloud::SoundCloudApi::builder()
        .api_base(server.uri())
        .client_id(CLIENT_ID)
        .auth_token(Some("secret".to_string()))
        .build()
        .unwrap();
    let records = authorized.get_personal_stream().await.unwrap();

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
}
