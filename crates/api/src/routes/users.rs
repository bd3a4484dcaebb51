use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use skylab_database::{User, UserWithRoles};

use crate::{
    routes::models::{LoginRequest, LoginResponse, UserChangesBody},
    services::user as user_service,
    util::{JsonBody, TOKEN_COOKIE},
    ApiError, AppState,
};

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users with role data for the current cohort", body = [UserWithRoles]),
        (status = 500, description = "Failed to fetch users", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserWithRoles>>, ApiError> {
    let users = user_service::get_all_users(state.db_pool())
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch users: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "Users",
    security(("cookieAuth" = []), ("bearerAuth" = [])),
    params(
        ("email" = String, Path, description = "User email")
    ),
    responses(
        (status = 200, description = "User with role data for the current cohort", body = UserWithRoles),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Json<UserWithRoles>, ApiError> {
    state.authenticate(&jar, &headers)?;

    let user = user_service::get_user_by_email(state.db_pool(), &email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(user))
}

/// Log in as `email`; the issued JWT is returned in an HttpOnly `token` cookie.
#[utoipa::path(
    post,
    path = "/users/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "User email")
    ),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; token cookie set", body = LoginResponse),
        (status = 400, description = "Password missing", body = crate::error::ErrorResponse),
        (status = 401, description = "Password is incorrect", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Path(email): Path<String>,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let password = req
        .password
        .filter(|password| !password.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing request parameters"))?;

    let outcome = user_service::user_login(state.db_pool(), state.tokens(), &email, &password)
        .await
        .map_err(|e| {
            tracing::error!("Failed to log in: {}", e);
            ApiError::from(e)
        })?;

    let Some((user, token)) = outcome else {
        return Err(ApiError::unauthorized("Password is incorrect"));
    };

    let cookie = Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure());

    Ok((jar.add(cookie), Json(LoginResponse { email: user.email })))
}

#[utoipa::path(
    put,
    path = "/users/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "User email")
    ),
    request_body = UserChangesBody,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid update payload", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    JsonBody(body): JsonBody<UserChangesBody>,
) -> Result<Json<User>, ApiError> {
    let changes = body
        .user
        .ok_or_else(|| ApiError::bad_request("Missing request parameters"))?;

    let user = user_service::update_user_by_email(state.db_pool(), &email, changes)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/users/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "User email")
    ),
    responses(
        (status = 200, description = "User deleted", body = User),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = user_service::delete_user_by_email(state.db_pool(), &email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete user: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(user))
}
