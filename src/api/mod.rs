mod client;
pub use client::ApiClient;

pub mod endpoints;

mod error;
pub use error::{ApiError, ApiResult};

mod study;
pub use study::StudyApi;
