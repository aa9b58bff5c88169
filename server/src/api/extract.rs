use super::jsonapi::Error;
use axum::{
    async_trait,
    body::{Bytes, HttpBody},
    extract::{FromRequest, FromRequestParts, Json as AxumJson, Path as AxumPath},
    http::header::{self, HeaderMap, HeaderValue},
    http::{request::Parts, Request, StatusCode},
    response::{IntoResponse, Response},
    BoxError,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

static HEADER_VALUE: &str = "application/vnd.api+json";

/// JSON:API body, both as an extractor and as a response.
pub struct Json<T>(pub T);

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("Invalid mime type, expected application/vnd.api+json")]
    Mime,
    #[error("Could not read body bytes: {}", .0)]
    BodyRead(#[from] axum::extract::rejection::BytesRejection),
    #[error("Invalid JSON structure: {}", .0)]
    Data(String),
    #[error("Invalid JSON syntax: {}", .0)]
    Syntax(String),
    #[error("IO error")]
    Io,
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let status = match self {
            JsonError::Io | JsonError::BodyRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            JsonError::Mime | JsonError::Syntax(_) | JsonError::Data(_) => StatusCode::BAD_REQUEST,
        };
        Error {
            status,
            title: "Could not parse JSON request body".to_string(),
            detail: Some(self.into()),
        }
        .into_response()
    }
}

#[async_trait]
impl<S, B, T> FromRequest<S, B> for Json<T>
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
    T: for<'de> Deserialize<'de> + Send,
{
    type Rejection = JsonError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        if !jsonapi_content_type(req.headers()) {
            return Err(JsonError::Mime);
        }
        let bytes = Bytes::from_request(req, state).await?;
        let deserializer = &mut serde_json::Deserializer::from_slice(&bytes);

        match serde_path_to_error::deserialize(deserializer) {
            Ok(value) => Ok(Json(value)),
            Err(err) => Err(match err.inner().classify() {
                serde_json::error::Category::Data => JsonError::Data(err.to_string()),
                serde_json::error::Category::Syntax | serde_json::error::Category::Eof => {
                    JsonError::Syntax(err.path().to_string())
                }
                serde_json::error::Category::Io => JsonError::Io,
            }),
        }
    }
}

fn jsonapi_content_type(headers: &HeaderMap) -> bool {
    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .and_then(|content_type| content_type.parse::<mime::Mime>().ok());

    match mime {
        Some(mime) => {
            mime.type_() == "application"
                && mime.subtype() == "vnd.api"
                && mime.suffix().map_or(false, |suffix| suffix == "json")
        }
        None => false,
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, HeaderValue::from_static(HEADER_VALUE))],
            AxumJson(self.0).into_response(),
        )
            .into_response()
    }
}

/// Path extractor answering malformed ids as missing resources.
pub struct Path<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumPath(t) = AxumPath::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error {
                status: StatusCode::NOT_FOUND,
                title: "Invalid URL path".to_string(),
                detail: Some(e.to_string().into()),
            })?;
        Ok(Self(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(content_type).unwrap(),
        );
        headers
    }

    #[test]
    fn accepts_jsonapi_content_type() {
        assert!(jsonapi_content_type(&headers("application/vnd.api+json")));
    }

    #[test]
    fn rejects_other_content_types() {
        assert!(!jsonapi_content_type(&headers("application/json")));
        assert!(!jsonapi_content_type(&headers("text/plain")));
        assert!(!jsonapi_content_type(&HeaderMap::new()));
    }
}
