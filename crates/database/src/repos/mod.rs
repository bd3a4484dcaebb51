//! Database repository implementations

pub mod administrator_repository;
pub mod cohort_repository;
pub mod deadline_repository;
pub mod mentor_repository;
pub mod user_repository;

pub use administrator_repository::AdministratorRepository;
pub use cohort_repository::CohortRepository;
pub use deadline_repository::DeadlineRepository;
pub use mentor_repository::MentorRepository;
pub use user_repository::UserRepository;
