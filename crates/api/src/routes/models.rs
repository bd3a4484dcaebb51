//! Request and response bodies shared by the route handlers.
//!
//! Request fields are optional so that a missing field produces the
//! service's own 400 message instead of a deserialization failure.

use serde::{Deserialize, Serialize};
use skylab_database::{Deadline, DeadlineWithQuestions, UserProfile};
use utoipa::{IntoParams, ToSchema};

/// User fields accepted when creating a user.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// Partial user update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewUserBody {
    pub user: Option<NewUser>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewUsersBody {
    pub users: Option<Vec<NewUser>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserChangesBody {
    pub user: Option<UserChanges>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CohortInput {
    pub academic_year: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CohortBody {
    pub cohort: Option<CohortInput>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineInput {
    pub cohort_year: Option<i64>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub due_by: Option<String>,
    #[serde(rename = "type")]
    pub deadline_type: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeadlineBody {
    pub deadline: Option<DeadlineInput>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub question_number: Option<i64>,
    pub question: Option<String>,
    pub desc: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    pub options: Option<Vec<String>>,
    pub is_anonymous: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuestionsBody {
    pub questions: Option<Vec<QuestionInput>>,
}

/// Query string of `GET /deadlines`. `cohortYear` is parsed by the handler so
/// a bad value gets a readable 400.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineQuery {
    pub cohort_year: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeadlinesResponse {
    pub deadlines: Vec<Deadline>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeadlineResponse {
    pub deadline: Deadline,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeadlineWithQuestionsResponse {
    pub deadline: DeadlineWithQuestions,
}
