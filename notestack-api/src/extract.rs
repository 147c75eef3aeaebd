/// Request extractors with API-shaped rejections
///
/// Axum's stock `Json` extractor rejects malformed bodies with its own
/// response format (and a 422 for data errors). The API contract requires a
/// 400 with the standard `{error, message}` body for every unparseable or
/// incomplete request body, so handlers use [`ApiJson`] instead.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor that rejects with 400 and the standard error body
///
/// Missing fields, type mismatches, and syntactically invalid JSON all map
/// to `ApiError::BadRequest`, never a 422 or 500.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}
