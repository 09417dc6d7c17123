//! Wire shapes of the CMS. Nothing here leaves the crate: records are
//! flattened into the model types as soon as they are decoded.

use folio_common::model::{
    ModelValidationError,
    post::{Post, PostDraft},
};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// `{ "data": ... }`, the envelope of every CMS request and response body.
#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub(crate) struct Entry<T> {
    pub attributes: T,
}

/// A to-one relation. `data` is `null` when the relation is unset.
#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub(crate) struct Relation<T> {
    pub data: Option<Entry<T>>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub(crate) struct Relations<T> {
    #[serde(default)]
    pub data: Vec<Entry<T>>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub(crate) struct NameAttributes {
    pub name: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub(crate) struct UrlAttributes {
    pub url: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize)]
pub(crate) struct PostRecord {
    pub id: u64,
    pub attributes: PostAttributes,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PostAttributes {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub author: Relation<NameAttributes>,
    pub category: Relation<NameAttributes>,
    pub tags: Relations<NameAttributes>,
    pub image: Relation<UrlAttributes>,
}

/// Body of a create or update request.
pub(crate) type PostDraftBody = Envelope<Entry<PostAttributes>>;

fn relation<T>(attributes: T) -> Relation<T> {
    Relation {
        data: Some(Entry { attributes }),
    }
}

fn name_of(relation: Relation<NameAttributes>) -> String {
    relation
        .data
        .map(|entry| entry.attributes.name)
        .unwrap_or_default()
}

impl TryFrom<PostRecord> for Post {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        let attributes = value.attributes;

        let published_at = attributes
            .published_at
            .as_deref()
            .map(|timestamp| OffsetDateTime::parse(timestamp, &Rfc3339))
            .transpose()?;

        Ok(Self {
            id: value.id.into(),
            title: attributes.title,
            content: attributes.content,
            excerpt: attributes.excerpt,
            published_at,
            author: name_of(attributes.author),
            category: name_of(attributes.category),
            tags: attributes
                .tags
                .data
                .into_iter()
                .map(|entry| entry.attributes.name)
                .collect(),
            image_url: attributes
                .image
                .data
                .map(|entry| entry.attributes.url)
                .unwrap_or_default(),
        })
    }
}

impl From<PostDraft> for PostDraftBody {
    fn from(draft: PostDraft) -> Self {
        let attributes = PostAttributes {
            title: draft.title,
            content: draft.content,
            excerpt: draft.excerpt,
            published_at: None,
            author: relation(NameAttributes { name: draft.author }),
            category: relation(NameAttributes {
                name: draft.category,
            }),
            tags: Relations {
                data: draft
                    .tags
                    .into_iter()
                    .map(|name| Entry {
                        attributes: NameAttributes { name },
                    })
                    .collect(),
            },
            image: relation(UrlAttributes {
                url: draft.image_url,
            }),
        };

        Envelope {
            data: Entry { attributes },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{Envelope, PostDraftBody, PostRecord};
    use folio_common::model::{
        ModelValidationError,
        post::{Post, PostDraft},
    };
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn flattens_nested_relations() {
        let body = json!({
            "data": {
                "id": 7,
                "attributes": {
                    "title": "Async Rust",
                    "content": "<p>Futures</p>",
                    "excerpt": "Futures all the way down.",
                    "publishedAt": "2024-02-03T04:05:06.000Z",
                    "author": { "data": { "id": 1, "attributes": { "name": "Jane Smith" } } },
                    "category": { "data": { "id": 2, "attributes": { "name": "Backend" } } },
                    "tags": { "data": [
                        { "id": 3, "attributes": { "name": "Rust" } },
                        { "id": 4, "attributes": { "name": "Async" } }
                    ] },
                    "image": { "data": { "id": 5, "attributes": { "url": "/uploads/async.png" } } }
                }
            }
        });

        let envelope: Envelope<PostRecord> = serde_json::from_value(body).unwrap();
        let post = Post::try_from(envelope.data).unwrap();

        assert_eq!(post.id.get(), 7);
        assert_eq!(post.author, "Jane Smith");
        assert_eq!(post.category, "Backend");
        assert_eq!(post.tags, ["Rust", "Async"]);
        assert_eq!(post.image_url, "/uploads/async.png");
        assert_eq!(post.published_at, Some(datetime!(2024-02-03 04:05:06 UTC)));
    }

    #[test]
    fn unset_relations_flatten_to_empty() {
        let body = json!({
            "id": 9,
            "attributes": {
                "title": "Draft",
                "publishedAt": null,
                "author": { "data": null },
                "image": { "data": null }
            }
        });

        let post = Post::try_from(serde_json::from_value::<PostRecord>(body).unwrap()).unwrap();

        assert_eq!(post.title, "Draft");
        assert_eq!(post.published_at, None);
        assert!(post.author.is_empty());
        assert!(post.category.is_empty());
        assert!(post.tags.is_empty());
        assert!(post.image_url.is_empty());
    }

    #[test]
    fn invalid_timestamp_is_rejected() {
        let body = json!({
            "id": 9,
            "attributes": { "title": "Broken", "publishedAt": "yesterday" }
        });

        let result = Post::try_from(serde_json::from_value::<PostRecord>(body).unwrap());
        assert!(matches!(result, Err(ModelValidationError::Timestamp(_))));
    }

    #[test]
    fn drafts_encode_into_nested_shape() {
        let draft = PostDraft {
            title: "Title".into(),
            content: "<p>Body</p>".into(),
            excerpt: "Excerpt".into(),
            author: "John Doe".into(),
            category: "Frontend".into(),
            tags: vec!["React".into(), "CSS".into()],
            image_url: "/cover.jpg".into(),
        };

        let body = serde_json::to_value(PostDraftBody::from(draft)).unwrap();

        assert_eq!(
            body,
            json!({
                "data": {
                    "attributes": {
                        "title": "Title",
                        "content": "<p>Body</p>",
                        "excerpt": "Excerpt",
                        "author": { "data": { "attributes": { "name": "John Doe" } } },
                        "category": { "data": { "attributes": { "name": "Frontend" } } },
                        "tags": { "data": [
                            { "attributes": { "name": "React" } },
                            { "attributes": { "name": "CSS" } }
                        ] },
                        "image": { "data": { "attributes": { "url": "/cover.jpg" } } }
                    }
                }
            })
        );
    }
}
