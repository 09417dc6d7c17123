use folio_cms::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Failed to {action}: {source}")]
    Write {
        action: &'static str,
        source: FetchError,
    },
    #[error("Another change is still being saved")]
    Busy,
    #[error("Admin mode was revoked")]
    NotElevated,
}
