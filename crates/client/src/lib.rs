pub mod api;
pub mod error;
pub mod feed;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use types::*;
