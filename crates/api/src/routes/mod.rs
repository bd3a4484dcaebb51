pub mod cohorts;
pub mod deadlines;
pub mod health;
pub mod mentors;
pub mod models;
pub mod users;
