use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::jsonapi::Error;
use crate::store::{CatalogError, Conflict};

impl CatalogError {
    fn status(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            // guarded deletions keep the status the service always answered with
            CatalogError::Conflict(Conflict::ArtistHasSongs | Conflict::PlaylistNotEmpty) => {
                StatusCode::METHOD_NOT_ALLOWED
            }
            CatalogError::Conflict(_) => StatusCode::CONFLICT,
            CatalogError::DbErr(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for Error {
    fn from(value: CatalogError) -> Self {
        let status = value.status();
        match value {
            CatalogError::DbErr(e) => {
                tracing::error!(error = %e, "Catalog operation failed");
                Self {
                    status,
                    title: "Database error".to_string(),
                    detail: Some(e.into()),
                }
            }
            e => Self {
                status,
                title: e.to_string(),
                detail: None,
            },
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        <Self as Into<Error>>::into(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Resource;
    use sea_orm::DbErr;

    #[test]
    fn statuses_follow_the_error_kind() {
        let cases = [
            (
                CatalogError::NotFound(Resource::Song),
                StatusCode::NOT_FOUND,
            ),
            (
                CatalogError::Conflict(Conflict::ArtistName("A".to_string())),
                StatusCode::CONFLICT,
            ),
            (
                CatalogError::Conflict(Conflict::SongInPlaylist),
                StatusCode::CONFLICT,
            ),
            (
                CatalogError::Conflict(Conflict::ArtistHasSongs),
                StatusCode::METHOD_NOT_ALLOWED,
            ),
            (
                CatalogError::Conflict(Conflict::PlaylistNotEmpty),
                StatusCode::METHOD_NOT_ALLOWED,
            ),
            (
                CatalogError::DbErr(DbErr::Custom("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(Error::from(err).status, status);
        }
    }

    #[test]
    fn not_found_title_names_the_resource() {
        let err = Error::from(CatalogError::NotFound(Resource::Playlist));
        assert_eq!(err.title, "Playlist not found");
        assert!(err.detail.is_none());
    }
}
