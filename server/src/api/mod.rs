pub mod artists;
pub mod documents;
pub mod error;
pub mod extract;
pub mod jsonapi;
pub mod playlists;
pub mod songs;

use axum::{
    http::header::{ACCEPT, CONTENT_TYPE},
    http::StatusCode,
    routing::{delete, get},
    Router,
};
use sea_orm::{DatabaseTransaction, DbConn, TransactionTrait};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub use jsonapi::Error;

#[derive(Clone)]
pub struct AppState(pub DbConn);

pub fn router(conn: DbConn) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(AllowOrigin::mirror_request())
        .allow_headers([ACCEPT, CONTENT_TYPE]);
    let tracing = TraceLayer::new_for_http();
    Router::new()
        .route(
            "/artists",
            get(artists::artists).post(artists::create_artist),
        )
        .route(
            "/artists/:id",
            get(artists::artist)
                .put(artists::update_artist)
                .delete(artists::delete_artist),
        )
        .route("/artists/:id/songs", get(artists::artist_songs))
        .route("/songs", get(songs::songs).post(songs::create_song))
        .route(
            "/songs/:id",
            get(songs::song)
                .put(songs::update_song)
                .delete(songs::delete_song),
        )
        .route(
            "/playlists",
            get(playlists::playlists).post(playlists::create_playlist),
        )
        .route(
            "/playlists/:id",
            get(playlists::playlist)
                .put(playlists::update_playlist)
                .delete(playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/songs",
            get(playlists::playlist_songs).post(playlists::add_song),
        )
        .route(
            "/playlists/:id/songs/:song_id",
            delete(playlists::remove_song),
        )
        .layer(cors)
        .layer(tracing)
        .with_state(AppState(conn))
}

async fn begin(db: &DbConn) -> Result<DatabaseTransaction, Error> {
    db.begin().await.map_err(|e| Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        title: "Couldn't begin database transaction".to_string(),
        detail: Some(e.into()),
    })
}

async fn commit(tx: DatabaseTransaction) -> Result<(), Error> {
    tx.commit().await.map_err(|e| Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        title: "Could not commit the database transaction".to_string(),
        detail: Some(e.into()),
    })
}
