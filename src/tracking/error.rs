use thiserror::Error;

use crate::{api::ApiError, model::ValidationError};

pub type TrackingResult<T> = std::result::Result<T, TrackingError>;

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl TrackingError {
    pub fn client_display(&self) -> String {
        match self {
            Self::Api(e) => e.client_display(),
            Self::Validation(e) => e.to_string(),
        }
    }
}
