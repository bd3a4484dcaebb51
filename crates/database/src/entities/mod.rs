//! Domain entities for the database layer

pub mod cohort;
pub mod deadline;
pub mod role;
pub mod user;

pub use cohort::{Cohort, CreateCohortRequest, UpdateCohortRequest};
pub use deadline::{
    CreateDeadlineRequest, Deadline, DeadlineFilter, DeadlineType, DeadlineWithQuestions,
    NewQuestion, Question, QuestionType, UpdateDeadlineRequest,
};
pub use role::{Administrator, Adviser, CreateAdministratorRequest, Mentor, MentorWithUser, Student};
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserProfile, UserWithRoles};
