pub mod cohort;
pub mod deadline;
pub mod error;
pub mod mentor;
pub mod user;

#[cfg(test)]
pub mod test_utils;

pub use error::*;
