//! Catalog store: the integrity rules of the artist, song and playlist
//! collections. Every operation runs on the connection handed to it, which is
//! the request's transaction when called from the API.

pub mod artists;
pub mod error;
pub mod playlists;
pub mod songs;

pub use error::{CatalogError, Conflict, Resource};
