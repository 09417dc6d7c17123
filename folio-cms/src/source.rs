use crate::{error::Result, fetched::Fetched};
use folio_common::{
    collection::Collection,
    model::{ContentItem, Id},
};

pub type ItemId<S> = Id<<<S as ContentSource>::Item as ContentItem>::Marker>;

/// A remote store of content items.
///
/// Every call is independent: implementations do not retry and do not cache
/// earlier reads.
pub trait ContentSource {
    type Item: ContentItem + Clone;
    type Draft;
    type Update;

    /// Reads the whole collection, falling back to placeholder data.
    fn list(&self) -> impl Future<Output = Fetched<Collection<Self::Item>>> + Send;

    /// Reads a single item, falling back to the placeholder with that id.
    fn get(&self, id: ItemId<Self>) -> impl Future<Output = Fetched<Option<Self::Item>>> + Send;

    fn create(&self, draft: Self::Draft) -> impl Future<Output = Result<Self::Item>> + Send;

    fn update(
        &self,
        id: ItemId<Self>,
        update: Self::Update,
    ) -> impl Future<Output = Result<Self::Item>> + Send;

    fn delete(&self, id: ItemId<Self>) -> impl Future<Output = Result<()>> + Send;
}
