//! Role records. Students, mentors and advisers belong to a single cohort
//! year; administrators are bounded by a date range instead.

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use super::user::User;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub cohort_year: i64,
    pub matric_no: Option<String>,
    pub nusnet_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub id: i64,
    pub user_id: i64,
    pub cohort_year: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Adviser {
    pub id: i64,
    pub user_id: i64,
    pub cohort_year: i64,
    pub nusnet_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Administrator {
    pub id: i64,
    pub user_id: i64,
    pub start_date: String,
    pub end_date: String,
}

/// Mentor record joined with the user it belongs to.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorWithUser {
    pub id: i64,
    pub user_id: i64,
    pub cohort_year: i64,
    pub user: User,
}

impl MentorWithUser {
    pub fn new(mentor: Mentor, user: User) -> Self {
        Self {
            id: mentor.id,
            user_id: mentor.user_id,
            cohort_year: mentor.cohort_year,
            user,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAdministratorRequest {
    pub user_id: i64,
    pub start_date: String,
    pub end_date: String,
}
