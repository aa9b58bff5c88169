use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::{ConnectionTrait, DbErr, LoaderTrait};
use std::collections::HashMap;

use super::songs;
use crate::api::{
    begin, commit,
    documents::{ArtistAttributes, ArtistRelation},
    extract::{Json, Path},
    jsonapi::{
        message, ArtistResource, Document, Error, Included, InsertDocument, MetaDocument,
        Relationship, ResourceType, SongResource,
    },
    AppState,
};
use crate::store;

#[derive(Default)]
pub struct ArtistRelated {
    songs: Vec<entity::Song>,
}

pub async fn related<C>(db: &C, entities: &Vec<entity::Artist>) -> Result<Vec<ArtistRelated>, DbErr>
where
    C: ConnectionTrait,
{
    if entities.is_empty() {
        return Ok(Vec::new());
    }
    let songs = entities.load_many(entity::SongEntity, db).await?;
    Ok(songs
        .into_iter()
        .map(|mut songs| {
            songs.sort_unstable_by_key(|s| s.id);
            ArtistRelated { songs }
        })
        .collect())
}

pub fn entity_to_resource(entity: &entity::Artist, related: &ArtistRelated) -> ArtistResource {
    let mut relationships = HashMap::new();
    if !related.songs.is_empty() {
        relationships.insert(
            ArtistRelation::Songs,
            Relationship::multi(ResourceType::Song, related.songs.iter().map(|s| s.id)),
        );
    }
    ArtistResource {
        r#type: ResourceType::Artist,
        id: entity.id,
        attributes: ArtistAttributes {
            name: entity.name.to_owned(),
        },
        relationships,
    }
}

pub fn entity_to_included(entity: &entity::Artist, related: &ArtistRelated) -> Included {
    Included::Artist(entity_to_resource(entity, related))
}

fn related_error(e: DbErr) -> Error {
    Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        title: "Could not fetch entites related to the artists".to_string(),
        detail: Some(e.into()),
    }
}

pub async fn artists(
    State(AppState(db)): State<AppState>,
) -> Result<Json<Document<ArtistResource>>, Error> {
    let tx = begin(&db).await?;
    let artists = store::artists::list_artists(&tx).await?;
    let related_to_artists = related(&tx, &artists).await.map_err(related_error)?;
    let data = artists
        .iter()
        .zip(related_to_artists.iter())
        .map(|(artist, related)| entity_to_resource(artist, related))
        .collect();
    Ok(Json(Document::multi(data)))
}

pub async fn artist(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Document<ArtistResource>>, Error> {
    let tx = begin(&db).await?;
    let artist = store::artists::get_artist(&tx, id).await?;
    let related_to_artists = related(&tx, &vec![artist.clone()])
        .await
        .map_err(related_error)?;
    let empty_relationship = ArtistRelated::default();
    let related = related_to_artists.first().unwrap_or(&empty_relationship);
    Ok(Json(Document::single(entity_to_resource(&artist, related))))
}

pub async fn create_artist(
    State(AppState(db)): State<AppState>,
    Json(document): Json<InsertDocument<ArtistAttributes>>,
) -> Result<(StatusCode, Json<Document<ArtistResource>>), Error> {
    let attributes = document.attributes(ResourceType::Artist)?;
    let tx = begin(&db).await?;
    let artist = store::artists::create_artist(&tx, &attributes.name).await?;
    commit(tx).await?;
    Ok((
        StatusCode::CREATED,
        Json(Document::single(entity_to_resource(
            &artist,
            &ArtistRelated::default(),
        ))),
    ))
}

pub async fn update_artist(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Json(document): Json<InsertDocument<ArtistAttributes>>,
) -> Result<Json<MetaDocument>, Error> {
    let attributes = document.attributes(ResourceType::Artist)?;
    let tx = begin(&db).await?;
    store::artists::update_artist(&tx, id, &attributes.name).await?;
    commit(tx).await?;
    Ok(Json(message("Artist name updated")))
}

pub async fn delete_artist(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MetaDocument>, Error> {
    let tx = begin(&db).await?;
    store::artists::delete_artist(&tx, id).await?;
    commit(tx).await?;
    Ok(Json(message("Artist deleted")))
}

pub async fn artist_songs(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Document<SongResource>>, Error> {
    let tx = begin(&db).await?;
    let songs = store::artists::artist_songs(&tx, id).await?;
    Ok(Json(Document::multi(
        songs::resources(&tx, &songs).await?,
    )))
}
