use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::{ConnectionTrait, DbErr, LoaderTrait};
use std::collections::HashMap;

use super::songs;
use crate::api::{
    begin, commit,
    documents::{PlaylistAttributes, PlaylistEntryAttributes, PlaylistRelation},
    extract::{Json, Path},
    jsonapi::{
        dedup, message, Document, Error, InsertDocument, MetaDocument, PlaylistResource,
        Relationship, ResourceType, SongResource,
    },
    AppState,
};
use crate::store;

#[derive(Default)]
pub struct PlaylistRelated {
    songs: Vec<entity::PlaylistSong>,
}

pub async fn related<C>(
    db: &C,
    entities: &Vec<entity::Playlist>,
) -> Result<Vec<PlaylistRelated>, DbErr>
where
    C: ConnectionTrait,
{
    if entities.is_empty() {
        return Ok(Vec::new());
    }
    let songs = entities.load_many(entity::PlaylistSongEntity, db).await?;
    Ok(songs
        .into_iter()
        .map(|mut songs| {
            songs.sort_unstable();
            PlaylistRelated { songs }
        })
        .collect())
}

pub fn entity_to_resource(entity: &entity::Playlist, related: &PlaylistRelated) -> PlaylistResource {
    let mut relationships = HashMap::new();
    if !related.songs.is_empty() {
        relationships.insert(
            PlaylistRelation::Songs,
            Relationship::multi(ResourceType::Song, related.songs.iter().map(|s| s.song_id)),
        );
    }
    PlaylistResource {
        r#type: ResourceType::Playlist,
        id: entity.id,
        attributes: PlaylistAttributes {
            name: entity.name.to_owned(),
        },
        relationships,
    }
}

fn related_error(e: DbErr) -> Error {
    Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        title: "Could not fetch entites related to the playlists".to_string(),
        detail: Some(e.into()),
    }
}

pub async fn playlists(
    State(AppState(db)): State<AppState>,
) -> Result<Json<Document<PlaylistResource>>, Error> {
    let tx = begin(&db).await?;
    let playlists = store::playlists::list_playlists(&tx).await?;
    let related_to_playlists = related(&tx, &playlists).await.map_err(related_error)?;
    let data = playlists
        .iter()
        .zip(related_to_playlists.iter())
        .map(|(playlist, related)| entity_to_resource(playlist, related))
        .collect();
    Ok(Json(Document::multi(data)))
}

pub async fn playlist(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Document<PlaylistResource>>, Error> {
    let tx = begin(&db).await?;
    let playlist = store::playlists::get_playlist(&tx, id).await?;
    let related_to_playlists = related(&tx, &vec![playlist.clone()])
        .await
        .map_err(related_error)?;
    let empty_relationship = PlaylistRelated::default();
    let related = related_to_playlists.first().unwrap_or(&empty_relationship);

    // the songs come along with their artists
    let songs = store::playlists::playlist_songs(&tx, id).await?;
    let related_to_songs = songs::related(&tx, &songs)
        .await
        .map_err(related_error)?;
    let mut included = songs
        .iter()
        .zip(related_to_songs.iter())
        .map(|(song, related)| songs::entity_to_included(song, related))
        .collect::<Vec<_>>();
    included.extend(songs::included(&tx, &songs).await?);

    let mut document = Document::single(entity_to_resource(&playlist, related));
    document.included = dedup(included);
    Ok(Json(document))
}

pub async fn create_playlist(
    State(AppState(db)): State<AppState>,
    Json(document): Json<InsertDocument<PlaylistAttributes>>,
) -> Result<(StatusCode, Json<Document<PlaylistResource>>), Error> {
    let attributes = document.attributes(ResourceType::Playlist)?;
    let tx = begin(&db).await?;
    let playlist = store::playlists::create_playlist(&tx, &attributes.name).await?;
    commit(tx).await?;
    Ok((
        StatusCode::CREATED,
        Json(Document::single(entity_to_resource(
            &playlist,
            &PlaylistRelated::default(),
        ))),
    ))
}

pub async fn update_playlist(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Json(document): Json<InsertDocument<PlaylistAttributes>>,
) -> Result<Json<MetaDocument>, Error> {
    let attributes = document.attributes(ResourceType::Playlist)?;
    let tx = begin(&db).await?;
    store::playlists::update_playlist(&tx, id, &attributes.name).await?;
    commit(tx).await?;
    Ok(Json(message("Playlist name updated")))
}

pub async fn delete_playlist(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MetaDocument>, Error> {
    let tx = begin(&db).await?;
    store::playlists::delete_playlist(&tx, id).await?;
    commit(tx).await?;
    Ok(Json(message("Playlist deleted")))
}

pub async fn playlist_songs(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Document<SongResource>>, Error> {
    let tx = begin(&db).await?;
    let songs = store::playlists::playlist_songs(&tx, id).await?;
    Ok(Json(Document::multi(
        songs::resources(&tx, &songs).await?,
    )))
}

pub async fn add_song(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Json(document): Json<InsertDocument<PlaylistEntryAttributes>>,
) -> Result<Json<MetaDocument>, Error> {
    let attributes = document.attributes(ResourceType::Song)?;
    let tx = begin(&db).await?;
    store::playlists::add_song_to_playlist(
        &tx,
        id,
        &attributes.song_title,
        &attributes.artist_name,
    )
    .await?;
    commit(tx).await?;
    Ok(Json(message("Song added to playlist")))
}

pub async fn remove_song(
    State(AppState(db)): State<AppState>,
    Path((id, song_id)): Path<(i32, i32)>,
) -> Result<Json<MetaDocument>, Error> {
    let tx = begin(&db).await?;
    store::playlists::remove_song_from_playlist(&tx, id, song_id).await?;
    commit(tx).await?;
    Ok(Json(message("Song removed from playlist")))
}
