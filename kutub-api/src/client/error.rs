use crate::{ApiError, GENERIC_NETWORK};

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("invalid api url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("invalid request path: {0}")]
    Url(#[from] url::ParseError),
}

impl RequestError {
    pub fn as_api(self) -> Result<ApiError, Self> {
        match self {
            RequestError::Api(v) => Ok(v),
            other => Err(other)
        }
    }

    pub fn api(&self) -> Option<&ApiError> {
        match self {
            RequestError::Api(v) => Some(v),
            _ => None
        }
    }

    /// text suitable for showing to an operator
    pub fn display_message(&self) -> String {
        match self {
            RequestError::Api(err) => err.display_message(),
            RequestError::Reqwest(_) |
            RequestError::Url(_) => String::from(GENERIC_NETWORK),
        }
    }
}
