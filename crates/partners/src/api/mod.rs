// Shared API types

pub mod common;
pub mod validation;

pub use common::{ErrorResponse, SuccessResponse};
