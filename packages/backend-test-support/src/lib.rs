//! Test helpers shared by the backend's integration tests: logging setup,
//! problem-details assertions and unique names.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
