use folio_common::model::{
    Id,
    image::{Image, ImageMarker, ImageMetadata},
};
use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};
use time::OffsetDateTime;
use tracing::{debug, info};

/// URL prefix uploaded files are served under.
pub const PUBLIC_PREFIX: &str = "/images";

#[derive(Debug)]
struct StoredImage {
    image: Image,
    file_name: String,
}

#[derive(Debug, Default)]
struct Registry {
    images: BTreeMap<Id<ImageMarker>, StoredImage>,
    last_id: u64,
}

/// Uploaded images: the files live in `dir`, the metadata in memory.
#[derive(Debug)]
pub struct Gallery {
    dir: PathBuf,
    registry: Mutex<Registry>,
}

impl Gallery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            registry: Mutex::new(Registry::default()),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current millisecond timestamp, bumped past the last id handed out.
    fn next_id(&self) -> Id<ImageMarker> {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let millis = u64::try_from(millis).unwrap_or_default();

        let mut registry = self.registry();
        registry.last_id = millis.max(registry.last_id + 1);
        Id::new(registry.last_id)
    }

    /// Writes the file and registers the image.
    pub async fn store(
        &self,
        original_name: Option<&str>,
        contents: &[u8],
        metadata: ImageMetadata,
    ) -> io::Result<Image> {
        let id = self.next_id();
        let file_name = format!(
            "{id}-{:08x}{}",
            rand::random::<u32>(),
            extension(original_name.unwrap_or_default())
        );

        tokio::fs::write(self.dir.join(&file_name), contents).await?;

        let image = Image {
            id,
            src: format!("{PUBLIC_PREFIX}/{file_name}"),
            title: metadata.title,
            category: metadata.category,
        };
        info!(%id, %file_name, bytes = contents.len(), "Stored uploaded image");

        self.registry().images.insert(
            id,
            StoredImage {
                image: image.clone(),
                file_name,
            },
        );
        Ok(image)
    }

    #[must_use]
    pub fn list(&self) -> Vec<Image> {
        self.registry()
            .images
            .values()
            .map(|stored| stored.image.clone())
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: Id<ImageMarker>) -> Option<Image> {
        self.registry()
            .images
            .get(&id)
            .map(|stored| stored.image.clone())
    }

    pub fn update(&self, id: Id<ImageMarker>, metadata: ImageMetadata) -> Option<Image> {
        let mut registry = self.registry();
        let stored = registry.images.get_mut(&id)?;
        stored.image.apply(metadata);
        Some(stored.image.clone())
    }

    /// Unregisters the image and deletes its file. A file that is already
    /// gone is not an error.
    pub async fn remove(&self, id: Id<ImageMarker>) -> io::Result<Option<Image>> {
        let Some(stored) = self.registry().images.remove(&id) else {
            return Ok(None);
        };

        match tokio::fs::remove_file(self.dir.join(&stored.file_name)).await {
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(%id, file_name = %stored.file_name, "Image file was already gone");
            }
            result => result?,
        }

        info!(%id, "Removed image");
        Ok(Some(stored.image))
    }
}

/// The extension of an uploaded file name including the dot, or nothing if
/// it has none or it is not plain alphanumeric.
fn extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|extension| extension.to_str())
        .filter(|extension| {
            !extension.is_empty() && extension.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|extension| format!(".{extension}"))
        .unwrap_or_default()
}
