use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::de::DeserializeOwned;

use crate::ApiError;

pub const TOKEN_COOKIE: &str = "token";

/// Token from the `token` cookie, falling back to `Authorization: Bearer`.
pub fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Ok(cookie.value().to_string());
        }
    }
    require_bearer(headers)
}

pub fn require_bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or("");
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(ApiError::unauthorized("Invalid authorization scheme"));
    }

    let token = parts.next().unwrap_or("");
    if token.is_empty() {
        return Err(ApiError::unauthorized("Missing bearer token"));
    }

    Ok(token.to_string())
}

/// `Json` extractor whose rejections render as a 400 `ApiError`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

/// Parse a numeric path segment such as `:cohortYear` or `:deadlineId`.
pub fn parse_number(name: &str, value: &str) -> Result<i64, ApiError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request(format!("{name} must be a number")))
}

/// Fallback for known paths hit with an unsupported method.
pub async fn invalid_method() -> ApiError {
    ApiError::bad_request("Invalid method to access endpoint")
}
