//! User entity definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::role::{Administrator, Adviser, Mentor, Student};

/// A person known to the platform, independent of any cohort.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub profile_pic_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub personal_site_url: Option<String>,
    pub self_intro: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Optional descriptive fields shared by create and update payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub personal_site_url: Option<String>,
    #[serde(default)]
    pub self_intro: Option<String>,
}

/// Request for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password_hash: Option<String>,
    pub profile: UserProfile,
}

/// Request for updating an existing user; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub profile: UserProfile,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password_hash.is_none() && self.profile == UserProfile::default()
    }
}

/// A user together with the role records that apply to one cohort year.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRoles {
    #[serde(flatten)]
    pub user: User,
    pub student: Option<Student>,
    pub mentor: Option<Mentor>,
    pub adviser: Option<Adviser>,
    pub administrator: Option<Administrator>,
}
