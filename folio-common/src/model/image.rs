use crate::{
    filter::Filterable,
    model::{ContentItem, Id},
};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct ImageMarker;

/// A gallery image served by the upload endpoint.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct Image {
    pub id: Id<ImageMarker>,
    /// Path the image is served under, e.g. `/images/1700000000000-3f2a.jpg`.
    pub src: String,
    pub title: String,
    pub category: String,
}

/// The editable fields of an image. Also sent alongside an upload.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct ImageMetadata {
    pub title: String,
    pub category: String,
}

impl Image {
    #[must_use]
    pub fn metadata(&self) -> ImageMetadata {
        ImageMetadata {
            title: self.title.clone(),
            category: self.category.clone(),
        }
    }

    pub fn apply(&mut self, metadata: ImageMetadata) {
        self.title = metadata.title;
        self.category = metadata.category;
    }
}

impl ContentItem for Image {
    type Marker = ImageMarker;
    const NOUN: &'static str = "image";

    fn id(&self) -> Id<ImageMarker> {
        self.id
    }
}

impl Filterable for Image {
    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}
