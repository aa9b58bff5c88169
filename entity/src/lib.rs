mod artist;
mod playlist;
mod playlist_song;
mod song;

pub use artist::ActiveModel as ArtistActive;
pub use artist::Column as ArtistColumn;
pub use artist::Entity as ArtistEntity;
pub use artist::Model as Artist;
pub use playlist::ActiveModel as PlaylistActive;
pub use playlist::Column as PlaylistColumn;
pub use playlist::Entity as PlaylistEntity;
pub use playlist::Model as Playlist;
pub use playlist_song::ActiveModel as PlaylistSongActive;
pub use playlist_song::Column as PlaylistSongColumn;
pub use playlist_song::Entity as PlaylistSongEntity;
pub use playlist_song::Model as PlaylistSong;
pub use song::ActiveModel as SongActive;
pub use song::Column as SongColumn;
pub use song::Entity as SongEntity;
pub use song::Model as Song;
