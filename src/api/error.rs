use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("{status}: {body}")]
    Http { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid session cookie")]
    InvalidCookie,
    #[error("client error: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Short text suitable for a toast.
    pub fn client_display(&self) -> String {
        match self {
            Self::Network(_) => String::from("Could not reach the server."),
            Self::Http { status: 401, .. } | Self::Http { status: 403, .. } => {
                String::from("Your session has expired, please sign in again.")
            }
            Self::Http { status, .. } if *status >= 500 => {
                String::from("The server had a problem, try again later.")
            }
            Self::Http { body, .. } => body.clone(),
            Self::Decode(_) => String::from("Unexpected response from the server."),
            Self::InvalidUrl(_) | Self::InvalidCookie | Self::Client(_) => {
                String::from("The client is misconfigured.")
            }
        }
    }
}
