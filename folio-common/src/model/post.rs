use crate::{
    filter::Filterable,
    model::{ContentItem, Id, ModelValidationError},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

/// A blog post, flattened from the CMS wire shape.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub title: String,
    /// HTML body.
    pub content: String,
    pub excerpt: String,
    /// `None` while the post is an unpublished draft.
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image_url: String,
}

/// Create and update payload of a post, as entered in the admin form.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image_url: String,
}

impl PostDraft {
    /// Parses the comma-separated tag field of the admin form.
    #[must_use]
    pub fn split_tags(field: &str) -> Vec<String> {
        field
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    }

    /// Every field but the tags is required.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        let required = [
            ("title", &self.title),
            ("content", &self.content),
            ("excerpt", &self.excerpt),
            ("author", &self.author),
            ("category", &self.category),
            ("image_url", &self.image_url),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ModelValidationError::MissingField(*name)),
            None => Ok(()),
        }
    }
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            author: post.author.clone(),
            category: post.category.clone(),
            tags: post.tags.clone(),
            image_url: post.image_url.clone(),
        }
    }
}

impl ContentItem for Post {
    type Marker = PostMarker;
    const NOUN: &'static str = "blog post";

    fn id(&self) -> Id<PostMarker> {
        self.id
    }
}

impl Filterable for Post {
    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}
