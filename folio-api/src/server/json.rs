use crate::server::ServerError;
use axum::{
    Json as AxumJson,
    extract::FromRequest,
    response::{IntoResponse, Response},
};
use axum_extra::TypedHeader;
use headers::ContentType;
use serde::Serialize;

/// JSON body whose rejection and serialization failures surface as
/// [`ServerError`]s, so they get the same error body as everything else.
#[derive(FromRequest, Clone, Copy, Debug, Default)]
#[from_request(via(AxumJson), rejection(ServerError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        serde_json::to_vec(&self.0).map_or_else(
            |error| ServerError::JsonResponse(error).into_response(),
            |body| (TypedHeader(ContentType::json()), body).into_response(),
        )
    }
}
