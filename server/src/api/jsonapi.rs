use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::{cmp::Eq, collections::HashMap, error::Error as StdError, hash::Hash};

use super::documents::{
    ArtistAttributes, ArtistRelation, PlaylistAttributes, PlaylistRelation, SongAttributes,
    SongRelation,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Artist,
    Song,
    Playlist,
}

pub type ArtistResource = Resource<i32, ArtistAttributes, ArtistRelation>;
pub type SongResource = Resource<i32, SongAttributes, SongRelation>;
pub type PlaylistResource = Resource<i32, PlaylistAttributes, PlaylistRelation>;

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum Included {
    Artist(ArtistResource),
    Song(SongResource),
}

#[derive(Serialize, Debug)]
pub struct Document<R> {
    pub data: DocumentData<R>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Included>,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum DocumentData<R> {
    Single(R),
    Multi(Vec<R>),
}

impl<R> Document<R> {
    pub fn single(data: R) -> Self {
        Self {
            data: DocumentData::Single(data),
            included: Vec::new(),
        }
    }

    pub fn multi(data: Vec<R>) -> Self {
        Self {
            data: DocumentData::Multi(data),
            included: Vec::new(),
        }
    }
}

/// Top level document carrying only a human readable outcome, used by
/// updates and deletions.
#[derive(Serialize, Debug)]
pub struct MetaDocument {
    pub meta: MessageMeta,
}

#[derive(Serialize, Debug)]
pub struct MessageMeta {
    pub message: String,
}

pub fn message<S: Into<String>>(message: S) -> MetaDocument {
    MetaDocument {
        meta: MessageMeta {
            message: message.into(),
        },
    }
}

#[derive(Serialize, Debug)]
pub struct Resource<I, T, R: Eq + Hash> {
    pub r#type: ResourceType,
    pub id: I,
    pub attributes: T,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub relationships: HashMap<R, Relationship>,
}

#[derive(Serialize, Debug)]
pub struct Relationship {
    pub data: Relation,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum Relation {
    Single(ResourceIdentifier),
    Multi(Vec<ResourceIdentifier>),
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceIdentifier {
    pub r#type: ResourceType,
    pub id: i32,
}

impl Relationship {
    pub fn single(r#type: ResourceType, id: i32) -> Self {
        Self {
            data: Relation::Single(ResourceIdentifier { r#type, id }),
        }
    }

    pub fn multi<It: IntoIterator<Item = i32>>(r#type: ResourceType, ids: It) -> Self {
        Self {
            data: Relation::Multi(
                ids.into_iter()
                    .map(|id| ResourceIdentifier { r#type, id })
                    .collect(),
            ),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct InsertDocument<A> {
    pub data: InsertResource<A>,
}

#[derive(Deserialize, Debug)]
pub struct InsertResource<A> {
    pub r#type: ResourceType,
    pub attributes: A,
}

impl<A> InsertDocument<A> {
    /// Unwraps the attributes, checking the resource is of the type the
    /// endpoint operates on.
    pub fn attributes(self, expected: ResourceType) -> Result<A, Error> {
        if self.data.r#type != expected {
            return Err(Error {
                status: StatusCode::BAD_REQUEST,
                title: "Invalid resource type".to_string(),
                detail: Some(
                    format!("expected {:?}, got {:?}", expected, self.data.r#type).into(),
                ),
            });
        }
        Ok(self.data.attributes)
    }
}

pub struct Error {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<Box<dyn StdError + Send + Sync>>,
}

#[derive(Serialize, Deserialize)]
pub struct SerializableError {
    pub status: u16,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let err = SerializableError {
            status: u16::from(self.status),
            title: self.title,
            detail: self.detail.map(|e| e.to_string()),
        };
        (self.status, Json(err)).into_response()
    }
}

pub fn dedup(mut included: Vec<Included>) -> Vec<Included> {
    included.sort_unstable_by_key(|i| match i {
        Included::Artist(a) => (0, a.id),
        Included::Song(s) => (1, s.id),
    });
    included.dedup_by_key(|i| match i {
        Included::Artist(a) => (ResourceType::Artist, a.id),
        Included::Song(s) => (ResourceType::Song, s.id),
    });
    included
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(id: i32) -> Included {
        Included::Artist(ArtistResource {
            r#type: ResourceType::Artist,
            id,
            attributes: ArtistAttributes {
                name: format!("artist {}", id),
            },
            relationships: HashMap::new(),
        })
    }

    #[test]
    fn dedup_keeps_one_of_each_resource() {
        let included = dedup(vec![artist(2), artist(1), artist(2)]);
        let ids: Vec<_> = included
            .iter()
            .map(|i| match i {
                Included::Artist(a) => a.id,
                Included::Song(s) => s.id,
            })
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn resource_serializes_with_type_and_relationships() {
        let mut relationships = HashMap::new();
        relationships.insert(
            ArtistRelation::Songs,
            Relationship::multi(ResourceType::Song, [3, 4]),
        );
        let resource = ArtistResource {
            r#type: ResourceType::Artist,
            id: 1,
            attributes: ArtistAttributes {
                name: "A".to_string(),
            },
            relationships,
        };
        let value = serde_json::to_value(Document::single(resource)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "data": {
                    "type": "artist",
                    "id": 1,
                    "attributes": { "name": "A" },
                    "relationships": {
                        "songs": { "data": [
                            { "type": "song", "id": 3 },
                            { "type": "song", "id": 4 }
                        ] }
                    }
                }
            })
        );
    }

    #[test]
    fn insert_document_rejects_wrong_type() {
        let doc: InsertDocument<ArtistAttributes> = serde_json::from_value(serde_json::json!({
            "data": { "type": "playlist", "attributes": { "name": "A" } }
        }))
        .unwrap();
        let err = doc.attributes(ResourceType::Artist).err().unwrap();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
