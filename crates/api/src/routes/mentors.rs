use axum::{
    extract::{Path, State},
    Json,
};
use skylab_database::MentorWithUser;

use crate::{
    routes::models::{NewUserBody, NewUsersBody},
    services::mentor as mentor_service,
    util::JsonBody,
    ApiError, AppState,
};

#[utoipa::path(
    get,
    path = "/mentors",
    tag = "Mentors",
    responses(
        (status = 200, description = "Mentors of the current cohort", body = [MentorWithUser]),
        (status = 404, description = "No current cohort", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_mentors(
    State(state): State<AppState>,
) -> Result<Json<Vec<MentorWithUser>>, ApiError> {
    let mentors = mentor_service::get_all_mentors(state.db_pool())
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch mentors: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(mentors))
}

#[utoipa::path(
    post,
    path = "/mentors",
    tag = "Mentors",
    request_body = NewUserBody,
    responses(
        (status = 200, description = "Mentor created", body = MentorWithUser),
        (status = 400, description = "Missing email or duplicate user", body = crate::error::ErrorResponse),
        (status = 404, description = "No current cohort", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_mentor(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewUserBody>,
) -> Result<Json<MentorWithUser>, ApiError> {
    let new_user = body
        .user
        .ok_or_else(|| ApiError::bad_request("Arguments missing from request"))?;

    let mentor = mentor_service::create_mentor_user(state.db_pool(), new_user)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create mentor: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(mentor))
}

#[utoipa::path(
    get,
    path = "/mentors/{email}",
    tag = "Mentors",
    params(
        ("email" = String, Path, description = "Mentor email")
    ),
    responses(
        (status = 200, description = "Mentor fetched", body = MentorWithUser),
        (status = 404, description = "Mentor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_mentor(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MentorWithUser>, ApiError> {
    let mentor = mentor_service::get_mentor_by_email(state.db_pool(), &email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch mentor: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(mentor))
}

/// Create several mentors at once; a single failure creates none of them.
#[utoipa::path(
    post,
    path = "/mentors/batch",
    tag = "Mentors",
    request_body = NewUsersBody,
    responses(
        (status = 200, description = "Mentors created", body = [MentorWithUser]),
        (status = 400, description = "Missing users or a duplicate in the batch", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_mentors_batch(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewUsersBody>,
) -> Result<Json<Vec<MentorWithUser>>, ApiError> {
    let users = body
        .users
        .ok_or_else(|| ApiError::bad_request("Parameters missing from request"))?;

    let mentors = mentor_service::create_many_mentor_users(state.db_pool(), users)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create mentors: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(mentors))
}
