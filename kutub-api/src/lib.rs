pub mod error;
pub use error::{ApiError, ApiErrorKind, GeneralKind, AuthKind, Detail, GENERIC_FAILURE, GENERIC_NETWORK};

pub mod traits;
pub use traits::Validator;

pub mod resource;

pub mod auth;
pub mod books;
pub mod catalog;
pub mod org;
pub mod users;
pub mod sec;
pub mod dashboard;

mod payload;
pub use payload::{Payload, Ack};

#[cfg(feature = "client")]
pub mod client;
