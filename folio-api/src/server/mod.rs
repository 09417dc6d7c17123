use crate::gallery::{Gallery, PUBLIC_PREFIX};
use axum::{
    Router,
    extract::{
        DefaultBodyLimit, FromRef, Request,
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use folio_common::model::{Id, image::ImageMarker};
use json::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

mod json;
mod routes;

/// Largest accepted request body, uploads included.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, Debug, FromRef)]
pub struct ServerState {
    pub gallery: Arc<Gallery>,
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

/// The complete application: API routes, the uploaded files, and the
/// middleware stack.
pub fn app(state: ServerState) -> Router {
    let files = ServeDir::new(state.gallery.dir());

    routes()
        .nest_service(PUBLIC_PREFIX, files)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Incoming JSON rejected: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error("Incoming form rejected: {0}")]
    MultipartRejection(#[from] MultipartRejection),
    #[error("Incoming form could not be read: {0}")]
    Multipart(#[from] MultipartError),
    #[error("No file uploaded.")]
    NoFileUploaded,
    #[error("Image with id {0} was not found.")]
    ImageByIdNotFound(Id<ImageMarker>),
    #[error("Image file could not be written or removed: {0}")]
    Storage(#[from] std::io::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_)
            | ServerError::PathRejection(_)
            | ServerError::ImageByIdNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::JsonRejection(rejection) => rejection.status(),
            ServerError::MultipartRejection(rejection) => rejection.status(),
            ServerError::Multipart(error) => error.status(),
            ServerError::NoFileUploaded => StatusCode::BAD_REQUEST,
            ServerError::JsonResponse(_) | ServerError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
struct ErrorResponse {
    status: u16,
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, %status, "Replying with error");
        } else {
            info!(error = %self, %status, "Rejecting request");
        }

        let error_response = ErrorResponse {
            status: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(error_response)).into_response()
    }
}
