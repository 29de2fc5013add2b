//! Error classification used by the fallback walk.

pub mod error_classifier;

pub use error_classifier::{is_not_found, is_not_found_error, StatusCoded};
