use axum::{
    extract::{Path, State},
    Json,
};
use skylab_database::Cohort;

use crate::{
    routes::models::CohortBody,
    services::cohort as cohort_service,
    util::{parse_number, JsonBody},
    ApiError, AppState,
};

#[utoipa::path(
    get,
    path = "/cohorts",
    tag = "Cohorts",
    responses(
        (status = 200, description = "All cohorts, newest first", body = [Cohort])
    )
)]
pub async fn list_cohorts(State(state): State<AppState>) -> Result<Json<Vec<Cohort>>, ApiError> {
    let cohorts = cohort_service::list_cohorts(state.db_pool())
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch cohorts: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(cohorts))
}

#[utoipa::path(
    post,
    path = "/cohorts",
    tag = "Cohorts",
    request_body = CohortBody,
    responses(
        (status = 200, description = "Cohort created", body = Cohort),
        (status = 400, description = "Missing fields, bad dates or duplicate year", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_cohort(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CohortBody>,
) -> Result<Json<Cohort>, ApiError> {
    let input = body
        .cohort
        .ok_or_else(|| ApiError::bad_request("Parameters missing from request"))?;

    let cohort = cohort_service::create_cohort(state.db_pool(), input)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create cohort: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(cohort))
}

#[utoipa::path(
    get,
    path = "/cohorts/latest",
    tag = "Cohorts",
    responses(
        (status = 200, description = "Cohort with the greatest academic year", body = Cohort),
        (status = 404, description = "No cohorts exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_latest_cohort(State(state): State<AppState>) -> Result<Json<Cohort>, ApiError> {
    let cohort = cohort_service::get_latest_cohort(state.db_pool())
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch latest cohort: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(cohort))
}

#[utoipa::path(
    put,
    path = "/cohorts/{cohortYear}",
    tag = "Cohorts",
    params(
        ("cohortYear" = i64, Path, description = "Academic year of the cohort")
    ),
    request_body = CohortBody,
    responses(
        (status = 200, description = "Cohort updated", body = Cohort),
        (status = 400, description = "Missing body or invalid dates", body = crate::error::ErrorResponse),
        (status = 404, description = "Cohort not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_cohort(
    State(state): State<AppState>,
    Path(cohort_year): Path<String>,
    JsonBody(body): JsonBody<CohortBody>,
) -> Result<Json<Cohort>, ApiError> {
    let cohort_year = parse_number("cohortYear", &cohort_year)?;
    let input = body
        .cohort
        .ok_or_else(|| ApiError::bad_request("Parameters missing from request body"))?;

    let cohort = cohort_service::edit_cohort_by_year(state.db_pool(), cohort_year, input)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update cohort: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(cohort))
}

#[utoipa::path(
    delete,
    path = "/cohorts/{cohortYear}",
    tag = "Cohorts",
    params(
        ("cohortYear" = i64, Path, description = "Academic year of the cohort")
    ),
    responses(
        (status = 200, description = "Deleted cohort", body = Cohort),
        (status = 404, description = "Cohort not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_cohort(
    State(state): State<AppState>,
    Path(cohort_year): Path<String>,
) -> Result<Json<Cohort>, ApiError> {
    let cohort_year = parse_number("cohortYear", &cohort_year)?;

    let cohort = cohort_service::delete_cohort_by_year(state.db_pool(), cohort_year)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete cohort: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(cohort))
}
