use axum::{
    extract::{Path, Query, State},
    Json,
};
use skylab_database::{DeadlineFilter, DeadlineWithQuestions};

use crate::{
    routes::models::{
        DeadlineBody, DeadlineQuery, DeadlineResponse, DeadlineWithQuestionsResponse,
        DeadlinesResponse, QuestionsBody,
    },
    services::deadline as deadline_service,
    util::{parse_number, JsonBody},
    ApiError, AppState,
};

#[utoipa::path(
    get,
    path = "/deadlines",
    tag = "Deadlines",
    params(DeadlineQuery),
    responses(
        (status = 200, description = "Deadlines matching the filter", body = DeadlinesResponse),
        (status = 400, description = "cohortYear is not a number", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_deadlines(
    State(state): State<AppState>,
    Query(query): Query<DeadlineQuery>,
) -> Result<Json<DeadlinesResponse>, ApiError> {
    let cohort_year = query
        .cohort_year
        .as_deref()
        .map(|value| parse_number("cohortYear", value))
        .transpose()?;
    let filter = DeadlineFilter {
        cohort_year,
        name: query.name,
    };

    let deadlines = deadline_service::list_deadlines(state.db_pool(), filter)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch deadlines: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(DeadlinesResponse { deadlines }))
}

#[utoipa::path(
    post,
    path = "/deadlines",
    tag = "Deadlines",
    request_body = DeadlineBody,
    responses(
        (status = 200, description = "Deadline created", body = DeadlineResponse),
        (status = 400, description = "Missing fields, unknown cohort or duplicate", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_deadline(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeadlineBody>,
) -> Result<Json<DeadlineResponse>, ApiError> {
    let input = body
        .deadline
        .ok_or_else(|| ApiError::bad_request("Parameters missing from request"))?;

    let deadline = deadline_service::create_deadline(state.db_pool(), input)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create deadline: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(DeadlineResponse { deadline }))
}

#[utoipa::path(
    get,
    path = "/deadlines/{deadlineId}",
    tag = "Deadlines",
    params(
        ("deadlineId" = i64, Path, description = "Deadline id")
    ),
    responses(
        (status = 200, description = "Deadline fetched", body = DeadlineResponse),
        (status = 404, description = "Deadline not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_deadline(
    State(state): State<AppState>,
    Path(deadline_id): Path<String>,
) -> Result<Json<DeadlineResponse>, ApiError> {
    let deadline_id = parse_number("deadlineId", &deadline_id)?;

    let deadline = deadline_service::get_deadline(state.db_pool(), deadline_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch deadline: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(DeadlineResponse { deadline }))
}

#[utoipa::path(
    put,
    path = "/deadlines/{deadlineId}",
    tag = "Deadlines",
    params(
        ("deadlineId" = i64, Path, description = "Deadline id")
    ),
    request_body = DeadlineBody,
    responses(
        (status = 200, description = "Deadline updated", body = DeadlineResponse),
        (status = 400, description = "Missing body or invalid field", body = crate::error::ErrorResponse),
        (status = 404, description = "Deadline not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_deadline(
    State(state): State<AppState>,
    Path(deadline_id): Path<String>,
    JsonBody(body): JsonBody<DeadlineBody>,
) -> Result<Json<DeadlineResponse>, ApiError> {
    let deadline_id = parse_number("deadlineId", &deadline_id)?;
    let input = body
        .deadline
        .ok_or_else(|| ApiError::bad_request("Parameters missing from request body"))?;

    let deadline = deadline_service::update_deadline(state.db_pool(), deadline_id, input)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update deadline: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(DeadlineResponse { deadline }))
}

#[utoipa::path(
    delete,
    path = "/deadlines/{deadlineId}",
    tag = "Deadlines",
    params(
        ("deadlineId" = i64, Path, description = "Deadline id")
    ),
    responses(
        (status = 200, description = "Deleted deadline", body = DeadlineResponse),
        (status = 404, description = "Deadline not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_deadline(
    State(state): State<AppState>,
    Path(deadline_id): Path<String>,
) -> Result<Json<DeadlineResponse>, ApiError> {
    let deadline_id = parse_number("deadlineId", &deadline_id)?;

    let deadline = deadline_service::delete_deadline(state.db_pool(), deadline_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete deadline: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(DeadlineResponse { deadline }))
}

#[utoipa::path(
    get,
    path = "/deadlines/{deadlineId}/questions",
    tag = "Deadlines",
    params(
        ("deadlineId" = i64, Path, description = "Deadline id")
    ),
    responses(
        (status = 200, description = "Deadline with its questions in order", body = DeadlineWithQuestions),
        (status = 404, description = "Deadline not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_questions(
    State(state): State<AppState>,
    Path(deadline_id): Path<String>,
) -> Result<Json<DeadlineWithQuestions>, ApiError> {
    let deadline_id = parse_number("deadlineId", &deadline_id)?;

    let deadline = deadline_service::get_deadline_with_questions(state.db_pool(), deadline_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch deadline questions: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(deadline))
}

/// Replace the full question set of a deadline.
#[utoipa::path(
    put,
    path = "/deadlines/{deadlineId}/questions",
    tag = "Deadlines",
    params(
        ("deadlineId" = i64, Path, description = "Deadline id")
    ),
    request_body = QuestionsBody,
    responses(
        (status = 200, description = "Questions replaced", body = DeadlineWithQuestionsResponse),
        (status = 400, description = "Invalid question set", body = crate::error::ErrorResponse),
        (status = 404, description = "Deadline not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn replace_questions(
    State(state): State<AppState>,
    Path(deadline_id): Path<String>,
    JsonBody(body): JsonBody<QuestionsBody>,
) -> Result<Json<DeadlineWithQuestionsResponse>, ApiError> {
    let deadline_id = parse_number("deadlineId", &deadline_id)?;
    let questions = body
        .questions
        .ok_or_else(|| ApiError::bad_request("Parameters missing from request"))?;

    let deadline = deadline_service::replace_questions(state.db_pool(), deadline_id, questions)
        .await
        .map_err(|e| {
            tracing::error!("Failed to replace deadline questions: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(DeadlineWithQuestionsResponse { deadline }))
}
