use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use skylab_auth::{Claims, TokenManager};
use skylab_config::AuthConfig;
use sqlx::SqlitePool;

use crate::util::extract_token;
use crate::ApiError;

#[derive(Clone)]
pub struct AppState {
    db_pool: SqlitePool,
    tokens: TokenManager,
    cookie_secure: bool,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, auth: &AuthConfig) -> Self {
        Self {
            db_pool,
            tokens: TokenManager::from_config(auth),
            cookie_secure: auth.cookie_secure,
        }
    }

    pub fn db_pool(&self) -> &SqlitePool {
        &self.db_pool
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    /// Validate the token carried by the request, from the `token` cookie or
    /// a bearer header.
    pub fn authenticate(&self, jar: &CookieJar, headers: &HeaderMap) -> Result<Claims, ApiError> {
        let token = extract_token(jar, headers)?;
        self.tokens.validate(&token).map_err(ApiError::from)
    }
}
