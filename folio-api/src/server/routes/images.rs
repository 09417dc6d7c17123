use crate::{
    gallery::Gallery,
    server::{Result, ServerError, ServerRouter, json::Json},
};
use axum::extract::{FromRequest, Multipart, State};
use axum_extra::routing::{RouterExt, TypedPath};
use folio_common::model::{
    Id,
    image::{Image, ImageMarker, ImageMetadata},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_images)
        .typed_post(upload_image)
        .typed_get(get_image)
        .typed_put(update_image)
        .typed_delete(delete_image)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/images", rejection(ServerError))]
struct ImagesPath();

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/images/{id}", rejection(ServerError))]
struct ImagePath {
    id: Id<ImageMarker>,
}

#[derive(FromRequest)]
#[from_request(rejection(ServerError))]
struct UploadForm(Multipart);

async fn list_images(
    ImagesPath(): ImagesPath,
    State(gallery): State<Arc<Gallery>>,
) -> Json<Vec<Image>> {
    Json(gallery.list())
}

/// Accepts an `image` file part plus `title` and `category` text parts.
async fn upload_image(
    ImagesPath(): ImagesPath,
    State(gallery): State<Arc<Gallery>>,
    UploadForm(mut form): UploadForm,
) -> Result<Json<Image>> {
    let mut file = None;
    let mut metadata = ImageMetadata::default();

    while let Some(field) = form.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("image") => {
                let file_name = field.file_name().map(str::to_owned);
                let contents = field.bytes().await?;
                // Browsers send an empty part when no file was picked.
                if !contents.is_empty() {
                    file = Some((file_name, contents));
                }
            }
            Some("title") => metadata.title = field.text().await?,
            Some("category") => metadata.category = field.text().await?,
            _ => debug!(?name, "Ignoring unknown form field"),
        }
    }

    let (file_name, contents) = file.ok_or(ServerError::NoFileUploaded)?;
    let image = gallery
        .store(file_name.as_deref(), &contents, metadata)
        .await?;

    Ok(Json(image))
}

async fn get_image(
    ImagePath { id }: ImagePath,
    State(gallery): State<Arc<Gallery>>,
) -> Result<Json<Image>> {
    let image = gallery.get(id).ok_or(ServerError::ImageByIdNotFound(id))?;

    Ok(Json(image))
}

async fn update_image(
    ImagePath { id }: ImagePath,
    State(gallery): State<Arc<Gallery>>,
    Json(metadata): Json<ImageMetadata>,
) -> Result<Json<Image>> {
    let image = gallery
        .update(id, metadata)
        .ok_or(ServerError::ImageByIdNotFound(id))?;

    Ok(Json(image))
}

async fn delete_image(
    ImagePath { id }: ImagePath,
    State(gallery): State<Arc<Gallery>>,
) -> Result<Json<Image>> {
    let image = gallery
        .remove(id)
        .await?
        .ok_or(ServerError::ImageByIdNotFound(id))?;

    Ok(Json(image))
}

#[cfg(test)]
mod tests {
    use crate::{
        gallery::Gallery,
        server::{ServerState, app},
    };
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use folio_common::model::image::Image;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const BOUNDARY: &str = "folio-test-boundary";

    fn test_app() -> (Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = ServerState {
            gallery: Arc::new(Gallery::new(dir.path())),
        };
        (app(state), dir)
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(file_name: &str, contents: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
             filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n\
             {contents}\r\n"
        )
    }

    fn upload_request(parts: &[String]) -> Request<Body> {
        let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
        Request::post("/api/images")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn upload(app: &Router, title: &str) -> Image {
        let (status, body) = send(
            app,
            upload_request(&[
                text_part("title", title),
                text_part("category", "graphic"),
                file_part("logo.png", "not really a png"),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn upload_stores_file_and_returns_image() {
        let (app, dir) = test_app();

        let image = upload(&app, "Logo").await;

        assert_eq!(image.title, "Logo");
        assert_eq!(image.category, "graphic");
        let file_name = image.src.strip_prefix("/images/").unwrap();
        let (millis, rest) = file_name.split_once('-').unwrap();
        assert_eq!(millis, image.id.to_string());
        assert_eq!(rest.len(), "0123abcd.png".len());
        assert!(rest.ends_with(".png"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join(file_name)).unwrap(),
            "not really a png"
        );
    }

    #[tokio::test]
    async fn uploaded_file_is_served() {
        let (app, _dir) = test_app();
        let image = upload(&app, "Logo").await;

        let (status, body) = send(
            &app,
            Request::get(&image.src).body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"not really a png");
    }

    #[tokio::test]
    async fn upload_without_file_is_rejected() {
        let (app, dir) = test_app();

        let (status, body) = send(
            &app,
            upload_request(&[text_part("title", "Logo"), file_part("", "")]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "status": 400, "message": "No file uploaded." }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn upload_ids_strictly_increase() {
        let (app, _dir) = test_app();

        let first = upload(&app, "One").await;
        let second = upload(&app, "Two").await;

        assert!(first.id < second.id);
        assert_ne!(first.src, second.src);
    }

    #[tokio::test]
    async fn list_and_get_return_uploads() {
        let (app, _dir) = test_app();
        let image = upload(&app, "Logo").await;

        let (status, body) = send(
            &app,
            Request::get("/api/images").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Vec<Image>>(&body).unwrap(), [image.clone()]);

        let (status, body) = send(
            &app,
            Request::get(format!("/api/images/{}", image.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Image>(&body).unwrap(), image);
    }

    #[tokio::test]
    async fn update_replaces_metadata() {
        let (app, _dir) = test_app();
        let image = upload(&app, "Logo").await;

        let (status, body) = send(
            &app,
            Request::put(format!("/api/images/{}", image.id))
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "title": "Brand", "category": "web" }).to_string(),
                ))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let updated: Image = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.title, "Brand");
        assert_eq!(updated.category, "web");
        assert_eq!(updated.src, image.src);
    }

    #[tokio::test]
    async fn delete_removes_registration_and_file() {
        let (app, dir) = test_app();
        let image = upload(&app, "Logo").await;
        let uri = format!("/api/images/{}", image.id);

        let (status, _) = send(&app, Request::delete(&uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let (status, _) = send(&app, Request::get(&uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let (app, _dir) = test_app();

        let (status, body) = send(
            &app,
            Request::put("/api/images/12")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"title":"x","category":"y"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap()["status"], 404);

        let (status, _) = send(
            &app,
            Request::delete("/api/images/12").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_gets_error_body() {
        let (app, _dir) = test_app();

        let (status, body) = send(
            &app,
            Request::get("/api/nothing").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap()["status"], 404);
    }
}
