use crate::{
    config::{ENV_PREFIX, FetcherConfig},
    error::{FetchError, Result, ensure_success},
    fetched::Fetched,
    source::ContentSource,
};
use folio_common::{
    collection::Collection,
    model::{
        Id,
        image::{Image, ImageMarker, ImageMetadata},
    },
    placeholder,
};
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use tracing::{debug, error, info, warn};

/// A new image for the gallery: file contents plus its metadata.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub metadata: ImageMetadata,
}

/// Gallery images held by the upload endpoint.
#[derive(Clone, Debug)]
pub struct GalleryClient {
    http: Client,
    base_url: String,
}

impl GalleryClient {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout.get())
            .build()?;

        Ok(Self::with_client(http, &config.api_url))
    }

    #[must_use]
    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn images_url(&self) -> String {
        format!("{}/images", self.base_url)
    }

    fn image_url(&self, id: Id<ImageMarker>) -> String {
        format!("{}/images/{id}", self.base_url)
    }

    pub async fn fetch_images(&self) -> Fetched<Collection<Image>> {
        let request = async {
            let response = self.http.get(self.images_url()).send().await?;
            let images: Vec<Image> = ensure_success(response)?.json().await?;
            Ok::<_, FetchError>(Collection::new(images))
        };

        match request.await {
            Ok(images) => {
                debug!(count = images.len(), "Fetched gallery images");
                Fetched::Live(images)
            }
            Err(reason) => {
                warn!(error = %reason, "Unable to fetch gallery images. Using placeholder data instead.");
                info!("To connect to the upload API, set the {ENV_PREFIX}API_URL environment variable.");
                Fetched::Fallback {
                    data: Collection::new(placeholder::images()),
                    reason,
                }
            }
        }
    }

    pub async fn fetch_image(&self, id: Id<ImageMarker>) -> Fetched<Option<Image>> {
        let request = async {
            let response = self.http.get(self.image_url(id)).send().await?;
            Ok::<Image, FetchError>(ensure_success(response)?.json().await?)
        };

        match request.await {
            Ok(image) => Fetched::Live(Some(image)),
            Err(reason) => {
                warn!(error = %reason, %id, "Unable to fetch gallery image. Using placeholder data instead.");
                Fetched::Fallback {
                    data: placeholder::image(id),
                    reason,
                }
            }
        }
    }

    /// Sends the file as the `image` part of a multipart form, with `title`
    /// and `category` as text parts.
    pub async fn upload_image(&self, upload: ImageUpload) -> Result<Image> {
        let ImageUpload {
            file_name,
            bytes,
            metadata,
        } = upload;

        let form = Form::new()
            .part("image", Part::bytes(bytes).file_name(file_name))
            .text("title", metadata.title)
            .text("category", metadata.category);

        async {
            let response = self
                .http
                .post(self.images_url())
                .multipart(form)
                .send()
                .await?;
            Ok::<Image, FetchError>(ensure_success(response)?.json().await?)
        }
        .await
        .inspect(|image| info!(id = %image.id, src = %image.src, "Uploaded image"))
        .inspect_err(|error| error!(%error, "Error uploading image"))
    }

    pub async fn update_image(&self, id: Id<ImageMarker>, metadata: ImageMetadata) -> Result<Image> {
        async {
            let response = self
                .http
                .put(self.image_url(id))
                .json(&metadata)
                .send()
                .await?;
            Ok::<Image, FetchError>(ensure_success(response)?.json().await?)
        }
        .await
        .inspect(|_| info!(%id, "Updated image"))
        .inspect_err(|error| error!(%error, %id, "Error updating image"))
    }

    pub async fn delete_image(&self, id: Id<ImageMarker>) -> Result<()> {
        async {
            let response = self.http.delete(self.image_url(id)).send().await?;
            ensure_success(response)?;
            Ok::<_, FetchError>(())
        }
        .await
        .inspect(|()| info!(%id, "Deleted image"))
        .inspect_err(|error| error!(%error, %id, "Error deleting image"))
    }
}

impl ContentSource for GalleryClient {
    type Item = Image;
    type Draft = ImageUpload;
    type Update = ImageMetadata;

    async fn list(&self) -> Fetched<Collection<Image>> {
        self.fetch_images().await
    }

    async fn get(&self, id: Id<ImageMarker>) -> Fetched<Option<Image>> {
        self.fetch_image(id).await
    }

    async fn create(&self, draft: ImageUpload) -> Result<Image> {
        self.upload_image(draft).await
    }

    async fn update(&self, id: Id<ImageMarker>, update: ImageMetadata) -> Result<Image> {
        self.update_image(id, update).await
    }

    async fn delete(&self, id: Id<ImageMarker>) -> Result<()> {
        self.delete_image(id).await
    }
}
