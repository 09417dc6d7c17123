use folio_common::model::ModelValidationError;
use reqwest::{Response, StatusCode};
use thiserror::Error;

pub type Result<T, E = FetchError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error! status: {status} ({url})")]
    Status { status: StatusCode, url: String },
    #[error("Content returned by the remote source was invalid: {0}")]
    Data(#[from] ModelValidationError),
}

impl FetchError {
    /// Whether the remote source answered at all.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        match self {
            FetchError::Request(error) => error.is_connect() || error.is_timeout(),
            FetchError::Status { .. } | FetchError::Data(_) => false,
        }
    }
}

/// Treats every non-2xx status as a failure.
pub(crate) fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            status,
            url: response.url().to_string(),
        })
    }
}
