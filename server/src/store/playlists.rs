use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{songs, CatalogError, Conflict, Resource};

async fn find_by_name<C>(db: &C, name: &str) -> Result<Option<entity::Playlist>, CatalogError>
where
    C: ConnectionTrait,
{
    Ok(entity::PlaylistEntity::find()
        .filter(entity::PlaylistColumn::Name.eq(name))
        .one(db)
        .await?)
}

pub async fn create_playlist<C>(db: &C, name: &str) -> Result<entity::Playlist, CatalogError>
where
    C: ConnectionTrait,
{
    if find_by_name(db, name).await?.is_some() {
        return Err(Conflict::PlaylistName(name.to_owned()).into());
    }
    let playlist = entity::PlaylistActive {
        name: Set(name.to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    tracing::info!(id = playlist.id, name = %playlist.name, "Created playlist");
    Ok(playlist)
}

pub async fn get_playlist<C>(db: &C, id: i32) -> Result<entity::Playlist, CatalogError>
where
    C: ConnectionTrait,
{
    entity::PlaylistEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound(Resource::Playlist))
}

pub async fn list_playlists<C>(db: &C) -> Result<Vec<entity::Playlist>, CatalogError>
where
    C: ConnectionTrait,
{
    Ok(entity::PlaylistEntity::find()
        .order_by_asc(entity::PlaylistColumn::Id)
        .all(db)
        .await?)
}

pub async fn update_playlist<C>(
    db: &C,
    id: i32,
    name: &str,
) -> Result<entity::Playlist, CatalogError>
where
    C: ConnectionTrait,
{
    let playlist = get_playlist(db, id).await?;
    if let Some(other) = find_by_name(db, name).await? {
        if other.id != playlist.id {
            return Err(Conflict::PlaylistName(name.to_owned()).into());
        }
    }
    let mut active: entity::PlaylistActive = playlist.into();
    active.name = Set(name.to_owned());
    let playlist = active.update(db).await?;
    tracing::info!(id, name = %playlist.name, "Renamed playlist");
    Ok(playlist)
}

pub async fn playlist_songs<C>(db: &C, id: i32) -> Result<Vec<entity::Song>, CatalogError>
where
    C: ConnectionTrait,
{
    let playlist = get_playlist(db, id).await?;
    Ok(playlist
        .find_related(entity::SongEntity)
        .order_by_asc(entity::SongColumn::Id)
        .all(db)
        .await?)
}

pub async fn add_song_to_playlist<C>(
    db: &C,
    playlist_id: i32,
    song_title: &str,
    artist_name: &str,
) -> Result<entity::Song, CatalogError>
where
    C: ConnectionTrait,
{
    let playlist = get_playlist(db, playlist_id).await?;
    let song = songs::find_song(db, song_title, artist_name).await?;
    let existing = entity::PlaylistSongEntity::find_by_id((playlist.id, song.id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Conflict::SongInPlaylist.into());
    }
    entity::PlaylistSongEntity::insert(entity::PlaylistSongActive {
        playlist_id: Set(playlist.id),
        song_id: Set(song.id),
    })
    .exec(db)
    .await?;
    tracing::info!(playlist = playlist.id, song = song.id, "Added song to playlist");
    Ok(song)
}

pub async fn remove_song_from_playlist<C>(
    db: &C,
    playlist_id: i32,
    song_id: i32,
) -> Result<(), CatalogError>
where
    C: ConnectionTrait,
{
    let playlist = get_playlist(db, playlist_id).await?;
    let song = songs::get_song(db, song_id).await?;
    let res = entity::PlaylistSongEntity::delete_by_id((playlist.id, song.id))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(CatalogError::NotFound(Resource::PlaylistSong));
    }
    tracing::info!(playlist = playlist.id, song = song.id, "Removed song from playlist");
    Ok(())
}

pub async fn delete_playlist<C>(db: &C, id: i32) -> Result<(), CatalogError>
where
    C: ConnectionTrait,
{
    let playlist = get_playlist(db, id).await?;
    let songs = playlist
        .find_related(entity::PlaylistSongEntity)
        .count(db)
        .await?;
    if songs > 0 {
        tracing::debug!(id, songs, "Refusing to delete non-empty playlist");
        return Err(Conflict::PlaylistNotEmpty.into());
    }
    playlist.delete(db).await?;
    tracing::info!(id, "Deleted playlist");
    Ok(())
}
