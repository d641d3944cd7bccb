use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Request body decoded from either JSON or an urlencoded HTML form.
///
/// An empty body decodes as `{}`. Anything undecodable is an internal
/// error rather than a 4xx, matching how the API reports bad input.
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
                tracing::error!("Rejected form body: {}", e);
                ApiError::internal_server_error(e.body_text())
            })?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::error!("Failed to read request body: {}", e);
            ApiError::internal_server_error(e.body_text())
        })?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(raw).map(Self).map_err(|e| {
            tracing::error!("Rejected JSON body: {}", e);
            ApiError::internal_server_error(e.to_string())
        })
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}
