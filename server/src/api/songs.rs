use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::{ConnectionTrait, DbErr, LoaderTrait};
use std::collections::HashMap;

use super::artists;
use crate::api::{
    begin, commit,
    documents::{InsertSongAttributes, SongAttributes, SongRelation},
    extract::{Json, Path},
    jsonapi::{
        message, Document, Error, Included, InsertDocument, MetaDocument, Relationship,
        ResourceType, SongResource,
    },
    AppState,
};
use crate::store;

#[derive(Default)]
pub struct SongRelated {
    playlists: Vec<entity::PlaylistSong>,
}

pub async fn related<C>(db: &C, entities: &Vec<entity::Song>) -> Result<Vec<SongRelated>, DbErr>
where
    C: ConnectionTrait,
{
    if entities.is_empty() {
        return Ok(Vec::new());
    }
    let playlists = entities.load_many(entity::PlaylistSongEntity, db).await?;
    Ok(playlists
        .into_iter()
        .map(|mut playlists| {
            playlists.sort_unstable_by_key(|p| p.playlist_id);
            SongRelated { playlists }
        })
        .collect())
}

pub fn entity_to_resource(entity: &entity::Song, related: &SongRelated) -> SongResource {
    let mut relationships = HashMap::new();
    relationships.insert(
        SongRelation::Artist,
        Relationship::single(ResourceType::Artist, entity.artist_id),
    );
    if !related.playlists.is_empty() {
        relationships.insert(
            SongRelation::Playlists,
            Relationship::multi(
                ResourceType::Playlist,
                related.playlists.iter().map(|p| p.playlist_id),
            ),
        );
    }
    SongResource {
        r#type: ResourceType::Song,
        id: entity.id,
        attributes: SongAttributes {
            title: entity.title.to_owned(),
        },
        relationships,
    }
}

pub fn entity_to_included(entity: &entity::Song, related: &SongRelated) -> Included {
    Included::Song(entity_to_resource(entity, related))
}

fn related_error(e: DbErr) -> Error {
    Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        title: "Could not fetch entites related to the songs".to_string(),
        detail: Some(e.into()),
    }
}

/// Builds the resources of a list of songs, with their relationships.
pub async fn resources<C>(db: &C, songs: &Vec<entity::Song>) -> Result<Vec<SongResource>, Error>
where
    C: ConnectionTrait,
{
    let related_to_songs = related(db, songs).await.map_err(related_error)?;
    Ok(songs
        .iter()
        .zip(related_to_songs.iter())
        .map(|(song, related)| entity_to_resource(song, related))
        .collect())
}

/// Resources of the artists owning the given songs, to be included next to
/// them. Duplicates are left for [`crate::api::jsonapi::dedup`].
pub async fn included<C>(db: &C, songs: &Vec<entity::Song>) -> Result<Vec<Included>, Error>
where
    C: ConnectionTrait,
{
    if songs.is_empty() {
        return Ok(Vec::new());
    }
    let artists = songs
        .load_one(entity::ArtistEntity, db)
        .await
        .map_err(related_error)?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    let related_to_artists = artists::related(db, &artists)
        .await
        .map_err(related_error)?;
    Ok(artists
        .iter()
        .zip(related_to_artists.iter())
        .map(|(artist, related)| artists::entity_to_included(artist, related))
        .collect())
}

pub async fn songs(
    State(AppState(db)): State<AppState>,
) -> Result<Json<Document<SongResource>>, Error> {
    let tx = begin(&db).await?;
    let songs = store::songs::list_songs(&tx).await?;
    Ok(Json(Document::multi(resources(&tx, &songs).await?)))
}

pub async fn song(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Document<SongResource>>, Error> {
    let tx = begin(&db).await?;
    let song = store::songs::get_song(&tx, id).await?;
    let songs = vec![song.clone()];
    let related_to_songs = related(&tx, &songs).await.map_err(related_error)?;
    let empty_relationship = SongRelated::default();
    let related = related_to_songs.first().unwrap_or(&empty_relationship);
    let mut document = Document::single(entity_to_resource(&song, related));
    document.included = included(&tx, &songs).await?;
    Ok(Json(document))
}

pub async fn create_song(
    State(AppState(db)): State<AppState>,
    Json(document): Json<InsertDocument<InsertSongAttributes>>,
) -> Result<(StatusCode, Json<Document<SongResource>>), Error> {
    let attributes = document.attributes(ResourceType::Song)?;
    let tx = begin(&db).await?;
    let song =
        store::songs::create_song(&tx, &attributes.title, &attributes.artist_name).await?;
    commit(tx).await?;
    Ok((
        StatusCode::CREATED,
        Json(Document::single(entity_to_resource(
            &song,
            &SongRelated::default(),
        ))),
    ))
}

pub async fn update_song(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Json(document): Json<InsertDocument<SongAttributes>>,
) -> Result<Json<MetaDocument>, Error> {
    let attributes = document.attributes(ResourceType::Song)?;
    let tx = begin(&db).await?;
    store::songs::update_song(&tx, id, &attributes.title).await?;
    commit(tx).await?;
    Ok(Json(message("Song title updated")))
}

pub async fn delete_song(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MetaDocument>, Error> {
    let tx = begin(&db).await?;
    store::songs::delete_song(&tx, id).await?;
    commit(tx).await?;
    Ok(Json(message("Song deleted")))
}
