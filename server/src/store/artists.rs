use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{CatalogError, Conflict, Resource};

async fn find_by_name<C>(db: &C, name: &str) -> Result<Option<entity::Artist>, CatalogError>
where
    C: ConnectionTrait,
{
    Ok(entity::ArtistEntity::find()
        .filter(entity::ArtistColumn::Name.eq(name))
        .one(db)
        .await?)
}

pub async fn create_artist<C>(db: &C, name: &str) -> Result<entity::Artist, CatalogError>
where
    C: ConnectionTrait,
{
    if find_by_name(db, name).await?.is_some() {
        return Err(Conflict::ArtistName(name.to_owned()).into());
    }
    let artist = entity::ArtistActive {
        name: Set(name.to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    tracing::info!(id = artist.id, name = %artist.name, "Created artist");
    Ok(artist)
}

pub async fn get_artist<C>(db: &C, id: i32) -> Result<entity::Artist, CatalogError>
where
    C: ConnectionTrait,
{
    entity::ArtistEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound(Resource::Artist))
}

pub async fn list_artists<C>(db: &C) -> Result<Vec<entity::Artist>, CatalogError>
where
    C: ConnectionTrait,
{
    Ok(entity::ArtistEntity::find()
        .order_by_asc(entity::ArtistColumn::Id)
        .all(db)
        .await?)
}

pub async fn update_artist<C>(db: &C, id: i32, name: &str) -> Result<entity::Artist, CatalogError>
where
    C: ConnectionTrait,
{
    let artist = get_artist(db, id).await?;
    if let Some(other) = find_by_name(db, name).await? {
        if other.id != artist.id {
            return Err(Conflict::ArtistName(name.to_owned()).into());
        }
    }
    let mut active: entity::ArtistActive = artist.into();
    active.name = Set(name.to_owned());
    let artist = active.update(db).await?;
    tracing::info!(id, name = %artist.name, "Renamed artist");
    Ok(artist)
}

pub async fn delete_artist<C>(db: &C, id: i32) -> Result<(), CatalogError>
where
    C: ConnectionTrait,
{
    let artist = get_artist(db, id).await?;
    let songs = artist.find_related(entity::SongEntity).count(db).await?;
    if songs > 0 {
        tracing::debug!(id, songs, "Refusing to delete artist with songs");
        return Err(Conflict::ArtistHasSongs.into());
    }
    artist.delete(db).await?;
    tracing::info!(id, "Deleted artist");
    Ok(())
}

pub async fn artist_songs<C>(db: &C, id: i32) -> Result<Vec<entity::Song>, CatalogError>
where
    C: ConnectionTrait,
{
    let artist = get_artist(db, id).await?;
    Ok(artist
        .find_related(entity::SongEntity)
        .order_by_asc(entity::SongColumn::Id)
        .all(db)
        .await?)
}
