use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Request body as the exact bytes sent by the client.
///
/// Only `application/json` bodies are buffered; any other content type
/// yields an empty buffer.
#[derive(Debug, Clone)]
pub struct RawJson(pub Bytes);

#[async_trait]
impl<S> FromRequest<S> for RawJson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_body(&req) {
            return Ok(Self(Bytes::new()));
        }

        let body = Bytes::from_request(req, state).await?;
        Ok(Self(body))
    }
}

/// Parsed JSON body. Rejections go through [`AppError`] like any other
/// request failure.
///
/// A request that is not `application/json` is not parsed at all and
/// yields `T::default()`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_body(&req) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

fn has_json_body(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(is_json_content_type)
}

fn is_json_content_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
}
