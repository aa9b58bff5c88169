use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ArtistAttributes {
    pub name: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArtistRelation {
    Songs,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SongAttributes {
    pub title: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SongRelation {
    Artist,
    Playlists,
}

#[derive(Deserialize, Debug, Clone)]
pub struct InsertSongAttributes {
    pub title: String,
    pub artist_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlaylistAttributes {
    pub name: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistRelation {
    Songs,
}

/// Identifies the song to add to a playlist by its title and artist name.
#[derive(Deserialize, Debug, Clone)]
pub struct PlaylistEntryAttributes {
    pub song_title: String,
    pub artist_name: String,
}
