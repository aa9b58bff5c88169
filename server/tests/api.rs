mod common;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use catalog::api;
use serde_json::{json, Value};
use tower::ServiceExt;

const JSONAPI: &str = "application/vnd.api+json";

async fn app() -> Router {
    api::router(common::database().await)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(CONTENT_TYPE, JSONAPI);
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn artist(name: &str) -> Value {
    json!({ "data": { "type": "artist", "attributes": { "name": name } } })
}

fn song(title: &str, artist_name: &str) -> Value {
    json!({ "data": { "type": "song", "attributes": { "title": title, "artist_name": artist_name } } })
}

fn playlist(name: &str) -> Value {
    json!({ "data": { "type": "playlist", "attributes": { "name": name } } })
}

fn entry(song_title: &str, artist_name: &str) -> Value {
    json!({ "data": { "type": "song", "attributes": { "song_title": song_title, "artist_name": artist_name } } })
}

#[tokio::test]
async fn create_and_fetch_artist() {
    let app = app().await;
    let (status, body) = send(&app, Method::POST, "/artists", Some(artist("Nirvana"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "artist");
    assert_eq!(body["data"]["attributes"]["name"], "Nirvana");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/artists/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["name"], "Nirvana");

    let (status, body) = send(&app, Method::GET, "/artists", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn responses_carry_jsonapi_content_type() {
    let app = app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/artists")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()[CONTENT_TYPE], JSONAPI);
}

#[tokio::test]
async fn duplicate_artist_is_conflict() {
    let app = app().await;
    send(&app, Method::POST, "/artists", Some(artist("A"))).await;
    let (status, body) = send(&app, Method::POST, "/artists", Some(artist("A"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn missing_and_malformed_ids_are_not_found() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/artists/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    let (status, _) = send(&app, Method::GET, "/songs/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/playlists/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_content_type_is_bad_request() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/artists")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(artist("A").to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let (_, body) = send(&app, Method::GET, "/artists", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/artists",
        Some(json!({ "data": { "type": "artist", "attributes": {} } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::POST, "/artists", Some(playlist("A"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn song_needs_known_artist() {
    let app = app().await;
    let (status, _) = send(&app, Method::POST, "/songs", Some(song("S", "Nobody"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, Method::POST, "/artists", Some(artist("A"))).await;
    let (status, body) = send(&app, Method::POST, "/songs", Some(song("S", "A"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["attributes"]["title"], "S");
    assert_eq!(body["data"]["relationships"]["artist"]["data"]["type"], "artist");
}

#[tokio::test]
async fn artist_with_songs_is_guarded() {
    let app = app().await;
    let (_, body) = send(&app, Method::POST, "/artists", Some(artist("A"))).await;
    let artist_id = body["data"]["id"].as_i64().unwrap();
    let (_, body) = send(&app, Method::POST, "/songs", Some(song("S", "A"))).await;
    let song_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/artists/{}/songs", artist_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], song_id);

    let uri = format!("/artists/{}", artist_id);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, body) = send(&app, Method::DELETE, &format!("/songs/{}", song_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["message"], "Song deleted");
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["message"], "Artist deleted");
}

#[tokio::test]
async fn rename_artist_and_song() {
    let app = app().await;
    let (_, body) = send(&app, Method::POST, "/artists", Some(artist("A"))).await;
    let artist_id = body["data"]["id"].as_i64().unwrap();
    let (_, body) = send(&app, Method::POST, "/songs", Some(song("S", "A"))).await;
    let song_id = body["data"]["id"].as_i64().unwrap();

    let uri = format!("/artists/{}", artist_id);
    let (status, body) = send(&app, Method::PUT, &uri, Some(artist("B"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["message"], "Artist name updated");
    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["attributes"]["name"], "B");

    let uri = format!("/songs/{}", song_id);
    let rename = json!({ "data": { "type": "song", "attributes": { "title": "T" } } });
    let (status, _) = send(&app, Method::PUT, &uri, Some(rename)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["attributes"]["title"], "T");
    assert_eq!(body["included"][0]["attributes"]["name"], "B");
}

#[tokio::test]
async fn playlist_membership() {
    let app = app().await;
    send(&app, Method::POST, "/artists", Some(artist("A"))).await;
    let (_, body) = send(&app, Method::POST, "/songs", Some(song("S", "A"))).await;
    let song_id = body["data"]["id"].as_i64().unwrap();
    let (status, body) = send(&app, Method::POST, "/playlists", Some(playlist("P"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let playlist_id = body["data"]["id"].as_i64().unwrap();
    let songs_uri = format!("/playlists/{}/songs", playlist_id);

    let (status, body) = send(&app, Method::POST, &songs_uri, Some(entry("S", "A"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["message"], "Song added to playlist");
    let (status, _) = send(&app, Method::POST, &songs_uri, Some(entry("S", "A"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = send(&app, Method::POST, &songs_uri, Some(entry("X", "A"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, &format!("/playlists/{}", playlist_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["relationships"]["songs"]["data"],
        json!([{ "type": "song", "id": song_id }])
    );
    let included = body["included"].as_array().unwrap();
    assert_eq!(included.len(), 2);
    assert!(included.iter().any(|i| i["type"] == "song" && i["id"] == song_id));
    assert!(included.iter().any(|i| i["type"] == "artist"));

    let (_, body) = send(&app, Method::GET, &songs_uri, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/playlists/{}", playlist_id), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let entry_uri = format!("{}/{}", songs_uri, song_id);
    let (status, body) = send(&app, Method::DELETE, &entry_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["message"], "Song removed from playlist");
    let (status, _) = send(&app, Method::DELETE, &entry_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/playlists/{}", playlist_id), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_playlist_rename_is_conflict() {
    let app = app().await;
    let (_, body) = send(&app, Method::POST, "/playlists", Some(playlist("P"))).await;
    let id = body["data"]["id"].as_i64().unwrap();
    send(&app, Method::POST, "/playlists", Some(playlist("Q"))).await;
    let (status, _) = send(&app, Method::PUT, &format!("/playlists/{}", id), Some(playlist("Q"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, body) = send(&app, Method::PUT, &format!("/playlists/{}", id), Some(playlist("R"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["message"], "Playlist name updated");
}
