//! Error handling for the Draftroom backend.

pub mod domain;
pub mod error_code;


pub use domain::DraftError;
pub use error_code::ErrorCode;
