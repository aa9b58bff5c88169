use sea_orm::DbErr;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Artist,
    Song,
    Playlist,
    PlaylistSong,
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Artist => write!(f, "Artist"),
            Resource::Song => write!(f, "Song"),
            Resource::Playlist => write!(f, "Playlist"),
            Resource::PlaylistSong => write!(f, "Playlist song"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    #[error("An artist named {0:?} already exists")]
    ArtistName(String),
    #[error("Cannot delete an artist that has songs")]
    ArtistHasSongs,
    #[error("A playlist named {0:?} already exists")]
    PlaylistName(String),
    #[error("Cannot delete a playlist that is not empty")]
    PlaylistNotEmpty,
    #[error("The song is already in the playlist")]
    SongInPlaylist,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("{0} not found")]
    NotFound(Resource),

    #[error("{0}")]
    Conflict(#[from] Conflict),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }

    pub fn conflict(&self) -> Option<&Conflict> {
        match self {
            CatalogError::Conflict(c) => Some(c),
            _ => None,
        }
    }
}
