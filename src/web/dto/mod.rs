//! Data Transfer Objects for the CloudStore web API.

pub mod request;
pub mod response;
pub mod validation;

pub use request::*;
pub use response::*;
pub use validation::{ApiQuery, ValidatedJson};
