//! Fixtures partagées : un faux serveur api-v2 basé sur wiremock
#![allow(dead_code)]

use pmosoundcloud::{CatalogCache, SoundCloudApi, SoundCloudLibrary};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "test-client";
pub const USER_ID: &str = "me";

pub fn api(server: &MockServer) -> SoundCloudApi {
    SoundCloudApi::builder()
        .api_base(server.uri())
        .client_id(CLIENT_ID)
        .build()
        .unwrap()
}

pub fn library(server: &MockServer) -> SoundCloudLibrary {
    SoundCloudLibrary::new(Arc::new(api(server)), Arc::new(CatalogCache::new()), USER_ID)
}

/// Track jouable (un transcodage progressif), sans pochette
pub fn track(server: &MockServer, id: u64, title: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "duration": 180000,
        "created_at": created_at,
        "artwork_url": null,
        "user": { "username": format!("owner{id}") },
        "media": { "transcodings": [
            {
                "url": format!("{}/media/{id}/hls", server.uri()),
                "preset": "mp3_0_0",
                "format": { "protocol": "hls", "mime_type": "audio/mpeg" }
            },
            {
                "url": format!("{}/media/{id}/progressive", server.uri()),
                "preset": "mp3_0_0",
                "format": { "protocol": "progressive", "mime_type": "audio/mpeg" }
            }
        ]}
    })
}

/// Track sans aucun flux progressif
pub fn hls_only_track(server: &MockServer, id: u64, title: &str, created_at: &str) -> Value {
    let mut value = track(server, id, title, created_at);
    value["media"]["transcodings"] = json!([
        {
            "url": format!("{}/media/{id}/hls", server.uri()),
            "format": { "protocol": "hls" }
        },
        {
            "url": format!("{}/media/{id}/opus", server.uri()),
            "format": { "protocol": "hls", "mime_type": "audio/ogg" }
        }
    ]);
    value
}

/// URI de la track `id` sous son compte
pub fn track_uri(server: &MockServer, id: u64) -> String {
    format!(
        "soundcloudsimple:{}/media/{id}/progressive?client_id={CLIENT_ID}",
        server.uri()
    )
}

pub fn avatar(name: &str) -> String {
    format!("https://i1.sndcdn.com/avatars-{name}-large.jpg")
}

pub fn hires_avatar(name: &str) -> String {
    format!("https://i1.sndcdn.com/avatars-{name}-t500x500.jpg")
}

/// Profil et abonnements de `USER_ID`
pub async fn mount_root(server: &MockServer, followings: &[(u64, &str)], calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{USER_ID}")))
        .and(query_param("client_id", CLIENT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": USER_ID,
            "username": "myself",
            "avatar_url": avatar("me")
        })))
        .expect(calls)
        .mount(server)
        .await;

    let collection: Vec<Value> = followings
        .iter()
        .map(|(id, name)| json!({ "id": id, "username": name, "avatar_url": avatar(name) }))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/users/{USER_ID}/followings")))
        .and(query_param("client_id", CLIENT_ID))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": collection,
            "next_href": null
        })))
        .expect(calls)
        .mount(server)
        .await;
}

/// Tracks d'un compte suivi
pub async fn mount_tracks(server: &MockServer, user: u64, tracks: Vec<Value>, calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{user}/tracks")))
        .and(query_param("client_id", CLIENT_ID))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": tracks,
            "next_href": null
        })))
        .expect(calls)
        .mount(server)
        .await;
}
