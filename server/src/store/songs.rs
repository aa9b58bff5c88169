use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{CatalogError, Resource};

pub async fn create_song<C>(
    db: &C,
    title: &str,
    artist_name: &str,
) -> Result<entity::Song, CatalogError>
where
    C: ConnectionTrait,
{
    let artist = entity::ArtistEntity::find()
        .filter(entity::ArtistColumn::Name.eq(artist_name))
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound(Resource::Artist))?;
    let song = entity::SongActive {
        title: Set(title.to_owned()),
        artist_id: Set(artist.id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    tracing::info!(id = song.id, title = %song.title, artist = artist.id, "Created song");
    Ok(song)
}

pub async fn get_song<C>(db: &C, id: i32) -> Result<entity::Song, CatalogError>
where
    C: ConnectionTrait,
{
    entity::SongEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound(Resource::Song))
}

pub async fn list_songs<C>(db: &C) -> Result<Vec<entity::Song>, CatalogError>
where
    C: ConnectionTrait,
{
    Ok(entity::SongEntity::find()
        .order_by_asc(entity::SongColumn::Id)
        .all(db)
        .await?)
}

/// Looks a song up by its title and the name of its artist. Titles are not
/// unique, so the oldest matching song wins.
pub async fn find_song<C>(
    db: &C,
    title: &str,
    artist_name: &str,
) -> Result<entity::Song, CatalogError>
where
    C: ConnectionTrait,
{
    entity::SongEntity::find()
        .inner_join(entity::ArtistEntity)
        .filter(entity::SongColumn::Title.eq(title))
        .filter(entity::ArtistColumn::Name.eq(artist_name))
        .order_by_asc(entity::SongColumn::Id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound(Resource::Song))
}

pub async fn update_song<C>(db: &C, id: i32, title: &str) -> Result<entity::Song, CatalogError>
where
    C: ConnectionTrait,
{
    let song = get_song(db, id).await?;
    let mut active: entity::SongActive = song.into();
    active.title = Set(title.to_owned());
    let song = active.update(db).await?;
    tracing::info!(id, title = %song.title, "Renamed song");
    Ok(song)
}

pub async fn delete_song<C>(db: &C, id: i32) -> Result<(), CatalogError>
where
    C: ConnectionTrait,
{
    let song = get_song(db, id).await?;
    let removed = entity::PlaylistSongEntity::delete_many()
        .filter(entity::PlaylistSongColumn::SongId.eq(id))
        .exec(db)
        .await?
        .rows_affected;
    song.delete(db).await?;
    tracing::info!(id, playlists = removed, "Deleted song");
    Ok(())
}
