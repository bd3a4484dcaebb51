use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::util::TOKEN_COOKIE;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::login,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::mentors::list_mentors,
        crate::routes::mentors::create_mentor,
        crate::routes::mentors::get_mentor,
        crate::routes::mentors::create_mentors_batch,
        crate::routes::cohorts::list_cohorts,
        crate::routes::cohorts::create_cohort,
        crate::routes::cohorts::get_latest_cohort,
        crate::routes::cohorts::update_cohort,
        crate::routes::cohorts::delete_cohort,
        crate::routes::deadlines::list_deadlines,
        crate::routes::deadlines::create_deadline,
        crate::routes::deadlines::get_deadline,
        crate::routes::deadlines::update_deadline,
        crate::routes::deadlines::delete_deadline,
        crate::routes::deadlines::get_questions,
        crate::routes::deadlines::replace_questions
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::models::NewUser,
            crate::routes::models::UserChanges,
            crate::routes::models::NewUserBody,
            crate::routes::models::NewUsersBody,
            crate::routes::models::UserChangesBody,
            crate::routes::models::LoginRequest,
            crate::routes::models::LoginResponse,
            crate::routes::models::CohortInput,
            crate::routes::models::CohortBody,
            crate::routes::models::DeadlineInput,
            crate::routes::models::DeadlineBody,
            crate::routes::models::QuestionInput,
            crate::routes::models::QuestionsBody,
            crate::routes::models::DeadlinesResponse,
            crate::routes::models::DeadlineResponse,
            crate::routes::models::DeadlineWithQuestionsResponse,
            skylab_database::User,
            skylab_database::UserProfile,
            skylab_database::UserWithRoles,
            skylab_database::Student,
            skylab_database::Mentor,
            skylab_database::MentorWithUser,
            skylab_database::Adviser,
            skylab_database::Administrator,
            skylab_database::Cohort,
            skylab_database::Deadline,
            skylab_database::DeadlineType,
            skylab_database::Question,
            skylab_database::QuestionType,
            skylab_database::DeadlineWithQuestions
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Users", description = "User accounts, login and role data"),
        (name = "Mentors", description = "Mentors of the current cohort"),
        (name = "Cohorts", description = "Cohort management"),
        (name = "Deadlines", description = "Deadlines and their questions")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        let schemes = &mut components.security_schemes;

        schemes.insert(
            "cookieAuth".to_string(),
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(TOKEN_COOKIE))),
        );

        let mut scheme = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
        if let SecurityScheme::Http(http) = &mut scheme {
            http.bearer_format = Some("JWT".to_string());
        }

        schemes.insert("bearerAuth".to_string(), scheme);
    }
}
