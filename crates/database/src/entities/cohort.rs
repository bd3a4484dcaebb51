use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// An academic-year grouping; `academic_year` is the primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cohort {
    pub academic_year: i64,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone)]
pub struct CreateCohortRequest {
    pub academic_year: i64,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCohortRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
