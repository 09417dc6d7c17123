use crate::{
    config::{ENV_PREFIX, FetcherConfig},
    error::{FetchError, Result, ensure_success},
    fetched::Fetched,
    record::{Envelope, PostDraftBody, PostRecord},
    source::ContentSource,
};
use folio_common::{
    collection::Collection,
    model::{
        Id,
        post::{Post, PostDraft, PostMarker},
    },
    placeholder,
};
use reqwest::Client;
use tracing::{debug, error, info, warn};

const POSTS_PATH: &str = "/api/blog-posts";

/// Blog posts held by the headless CMS.
#[derive(Clone, Debug)]
pub struct CmsClient {
    http: Client,
    base_url: String,
}

impl CmsClient {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout.get())
            .build()?;

        Ok(Self::with_client(http, &config.cms_url))
    }

    #[must_use]
    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn posts_url(&self) -> String {
        format!("{}{POSTS_PATH}", self.base_url)
    }

    fn post_url(&self, id: Id<PostMarker>) -> String {
        format!("{}{POSTS_PATH}/{id}", self.base_url)
    }

    /// All posts, or the placeholder posts if the CMS cannot be read.
    pub async fn fetch_posts(&self) -> Fetched<Collection<Post>> {
        match self.request_posts().await {
            Ok(posts) => {
                debug!(count = posts.len(), "Fetched blog posts");
                Fetched::Live(posts)
            }
            Err(reason) => {
                warn!(error = %reason, "Unable to fetch blog posts from the CMS. Using placeholder data instead.");
                info!("To connect to the CMS, set the {ENV_PREFIX}CMS_URL environment variable.");
                Fetched::Fallback {
                    data: Collection::new(placeholder::posts()),
                    reason,
                }
            }
        }
    }

    /// A single post, always read from the CMS. Falls back to the placeholder
    /// post with the same id, if any.
    pub async fn fetch_post(&self, id: Id<PostMarker>) -> Fetched<Option<Post>> {
        match self.request_post(id).await {
            Ok(post) => Fetched::Live(Some(post)),
            Err(reason) => {
                warn!(error = %reason, %id, "Unable to fetch blog post from the CMS. Using placeholder data instead.");
                info!("To connect to the CMS, set the {ENV_PREFIX}CMS_URL environment variable.");
                Fetched::Fallback {
                    data: placeholder::post(id),
                    reason,
                }
            }
        }
    }

    pub async fn create_post(&self, draft: PostDraft) -> Result<Post> {
        async {
            draft.validate()?;

            let response = self
                .http
                .post(self.posts_url())
                .json(&PostDraftBody::from(draft))
                .send()
                .await?;

            decode_post(ensure_success(response)?).await
        }
        .await
        .inspect(|post| info!(id = %post.id, "Created blog post"))
        .inspect_err(|error| error!(%error, "Error creating blog post"))
    }

    pub async fn update_post(&self, id: Id<PostMarker>, draft: PostDraft) -> Result<Post> {
        async {
            draft.validate()?;

            let response = self
                .http
                .put(self.post_url(id))
                .json(&PostDraftBody::from(draft))
                .send()
                .await?;

            decode_post(ensure_success(response)?).await
        }
        .await
        .inspect(|_| info!(%id, "Updated blog post"))
        .inspect_err(|error| error!(%error, %id, "Error updating blog post"))
    }

    pub async fn delete_post(&self, id: Id<PostMarker>) -> Result<()> {
        async {
            let response = self.http.delete(self.post_url(id)).send().await?;
            ensure_success(response)?;
            Ok::<_, FetchError>(())
        }
        .await
        .inspect(|()| info!(%id, "Deleted blog post"))
        .inspect_err(|error| error!(%error, %id, "Error deleting blog post"))
    }

    async fn request_posts(&self) -> Result<Collection<Post>> {
        let response = self
            .http
            .get(self.posts_url())
            .query(&[("populate", "*")])
            .send()
            .await?;

        let envelope: Envelope<Vec<PostRecord>> = ensure_success(response)?.json().await?;

        let posts = envelope
            .data
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let received = posts.len();
        let collection = Collection::new(posts);
        if collection.len() != received {
            warn!(
                received,
                kept = collection.len(),
                "CMS returned duplicate post ids, keeping the first of each"
            );
        }

        Ok(collection)
    }

    async fn request_post(&self, id: Id<PostMarker>) -> Result<Post> {
        let response = self
            .http
            .get(self.post_url(id))
            .query(&[("populate", "*")])
            .send()
            .await?;

        decode_post(ensure_success(response)?).await
    }
}

async fn decode_post(response: reqwest::Response) -> Result<Post> {
    let envelope: Envelope<PostRecord> = response.json().await?;
    Post::try_from(envelope.data).map_err(FetchError::from)
}

impl ContentSource for CmsClient {
    type Item = Post;
    type Draft = PostDraft;
    type Update = PostDraft;

    async fn list(&self) -> Fetched<Collection<Post>> {
        self.fetch_posts().await
    }

    async fn get(&self, id: Id<PostMarker>) -> Fetched<Option<Post>> {
        self.fetch_post(id).await
    }

    async fn create(&self, draft: PostDraft) -> Result<Post> {
        self.create_post(draft).await
    }

    async fn update(&self, id: Id<PostMarker>, update: PostDraft) -> Result<Post> {
        self.update_post(id, update).await
    }

    async fn delete(&self, id: Id<PostMarker>) -> Result<()> {
        self.delete_post(id).await
    }
}
