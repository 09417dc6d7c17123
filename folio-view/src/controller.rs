use crate::{admin::AdminCapability, error::ViewError};
use derive_where::derive_where;
use folio_cms::{
    error::FetchError,
    source::{ContentSource, ItemId},
};
use folio_common::{
    collection::Collection,
    filter::{FilterCriteria, Filterable},
    model::{ContentItem, Id},
};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

#[derive_where(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Phase<M> {
    Loading,
    Listing,
    Detail(Id<M>),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Notice {
    /// A read was served from placeholder data.
    Advisory(String),
    /// A write failed.
    Error(String),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Notice::Advisory(message) | Notice::Error(message) => message,
        }
    }
}

/// What a page renders.
#[derive(Debug)]
pub struct ViewState<T: ContentItem> {
    pub phase: Phase<T::Marker>,
    pub collection: Collection<T>,
    pub selection: Option<T>,
    pub notice: Option<Notice>,
}

impl<T: ContentItem + Clone> Clone for ViewState<T> {
    fn clone(&self) -> Self {
        Self {
            phase: self.phase,
            collection: self.collection.clone(),
            selection: self.selection.clone(),
            notice: self.notice.clone(),
        }
    }
}

/// Whether a finished read was installed or dropped because a newer read of
/// the same kind had started.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Applied,
    Superseded,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Kind {
    List,
    Detail,
}

struct Inner<T: ContentItem> {
    view: ViewState<T>,
    list_generation: u64,
    detail_generation: u64,
    list_pending: bool,
    detail_pending: bool,
    write_pending: bool,
}

impl<T: ContentItem> Inner<T> {
    fn settle(&mut self) {
        self.view.phase = if self.list_pending || self.detail_pending {
            Phase::Loading
        } else {
            match &self.view.selection {
                Some(item) => Phase::Detail(item.id()),
                None => Phase::Listing,
            }
        };
    }

    fn begin(&mut self, kind: Kind) -> u64 {
        let generation = match kind {
            Kind::List => {
                self.list_pending = true;
                self.list_generation += 1;
                self.list_generation
            }
            Kind::Detail => {
                self.detail_pending = true;
                self.detail_generation += 1;
                self.detail_generation
            }
        };
        self.view.phase = Phase::Loading;
        generation
    }

    /// Ends a read, unless a newer read of the same kind has started since.
    fn finish(&mut self, kind: Kind, generation: u64) -> Outcome {
        let (current, pending) = match kind {
            Kind::List => (self.list_generation, &mut self.list_pending),
            Kind::Detail => (self.detail_generation, &mut self.detail_pending),
        };
        if current != generation {
            debug!(?kind, generation, current, "Dropping stale response");
            return Outcome::Superseded;
        }
        *pending = false;
        Outcome::Applied
    }
}

/// Clears the write flag even if the write future is dropped midway.
struct WriteGuard<'a, T: ContentItem> {
    inner: &'a Mutex<Inner<T>>,
}

impl<T: ContentItem> Drop for WriteGuard<'_, T> {
    fn drop(&mut self) {
        lock(self.inner).write_pending = false;
    }
}

fn lock<T: ContentItem>(inner: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives one content page: loads the collection, opens and closes the
/// detail view, and runs admin mutations against the source.
///
/// Reads of the same kind supersede each other: when two `select` calls
/// overlap, only the later one is installed, whatever order the responses
/// arrive in. List and detail reads do not interfere with each other.
pub struct ViewController<S: ContentSource> {
    source: S,
    inner: Mutex<Inner<S::Item>>,
}

impl<S: ContentSource> ViewController<S> {
    /// A controller that has not loaded anything yet.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                view: ViewState {
                    phase: Phase::Loading,
                    collection: Collection::default(),
                    selection: None,
                    notice: None,
                },
                list_generation: 0,
                detail_generation: 0,
                list_pending: false,
                detail_pending: false,
                write_pending: false,
            }),
        }
    }

    /// Creates the controller and loads the collection.
    pub async fn mount(source: S) -> Self {
        let controller = Self::new(source);
        controller.refresh().await;
        controller
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn state(&self) -> ViewState<S::Item> {
        self.lock().view.clone()
    }

    #[must_use]
    pub fn phase(&self) -> Phase<<S::Item as ContentItem>::Marker> {
        self.lock().view.phase
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S::Item>> {
        lock(&self.inner)
    }

    /// Reloads the whole collection and replaces the current one.
    pub async fn refresh(&self) -> Outcome {
        let generation = self.lock().begin(Kind::List);
        let (collection, reason) = self.source.list().await.into_parts();

        let mut inner = self.lock();
        let outcome = inner.finish(Kind::List, generation);
        if outcome == Outcome::Applied {
            inner.view.collection = collection;
            inner.view.notice = reason.map(|_| {
                Notice::Advisory(format!(
                    "Failed to load {}s. Using placeholder data.",
                    S::Item::NOUN
                ))
            });
            inner.settle();
        }
        outcome
    }

    /// Opens the detail view for `id`. The item is always read from the
    /// source, even when the collection already holds it.
    pub async fn select(&self, id: ItemId<S>) -> Outcome {
        let generation = self.lock().begin(Kind::Detail);
        let (item, reason) = self.source.get(id).await.into_parts();

        let mut inner = self.lock();
        let outcome = inner.finish(Kind::Detail, generation);
        if outcome == Outcome::Applied {
            inner.view.notice = match (&item, reason) {
                (_, None) => None,
                (Some(_), Some(_)) => Some(Notice::Advisory(format!(
                    "Failed to load the {}. Using placeholder data.",
                    S::Item::NOUN
                ))),
                (None, Some(_)) => Some(Notice::Advisory(format!(
                    "The {} could not be found.",
                    S::Item::NOUN
                ))),
            };
            inner.view.selection = item;
            inner.settle();
        }
        outcome
    }

    /// Closes the detail view. A detail read still in flight is dropped when
    /// it arrives.
    pub fn back(&self) {
        let mut inner = self.lock();
        inner.detail_generation += 1;
        inner.detail_pending = false;
        inner.view.selection = None;
        inner.settle();
    }

    /// The collection narrowed down by `criteria`, in collection order.
    #[must_use]
    pub fn visible(&self, criteria: &FilterCriteria) -> Collection<S::Item>
    where
        S::Item: Filterable,
    {
        self.lock().view.collection.filtered(criteria)
    }

    pub async fn create(
        &self,
        capability: &AdminCapability,
        draft: S::Draft,
    ) -> Result<S::Item, ViewError> {
        let _guard = self.begin_write(capability)?;
        let created = self.source.create(draft).await;
        let item = self.complete_write("create", None, created)?;
        info!(id = %item.id(), "Created {}", S::Item::NOUN);
        self.refresh().await;
        Ok(item)
    }

    pub async fn update(
        &self,
        capability: &AdminCapability,
        id: ItemId<S>,
        update: S::Update,
    ) -> Result<S::Item, ViewError> {
        let _guard = self.begin_write(capability)?;
        let updated = self.source.update(id, update).await;
        let item = self.complete_write("update", Some(id), updated)?;
        self.refresh().await;
        Ok(item)
    }

    pub async fn delete(
        &self,
        capability: &AdminCapability,
        id: ItemId<S>,
    ) -> Result<(), ViewError> {
        let _guard = self.begin_write(capability)?;
        let deleted = self.source.delete(id).await;
        self.complete_write("delete", Some(id), deleted)?;
        self.refresh().await;
        Ok(())
    }

    fn begin_write(
        &self,
        capability: &AdminCapability,
    ) -> Result<WriteGuard<'_, S::Item>, ViewError> {
        if !capability.is_active() {
            return Err(ViewError::NotElevated);
        }

        let mut inner = self.lock();
        if inner.write_pending {
            return Err(ViewError::Busy);
        }
        inner.write_pending = true;
        Ok(WriteGuard { inner: &self.inner })
    }

    /// Records the result of a write. A failure leaves the collection and
    /// the selection as they were and shows an error. A success on the open
    /// item closes the detail view, since its contents are stale, unless a
    /// detail read started since will replace the selection anyway.
    fn complete_write<R>(
        &self,
        action: &'static str,
        id: Option<ItemId<S>>,
        result: Result<R, FetchError>,
    ) -> Result<R, ViewError> {
        let mut inner = self.lock();
        match result {
            Ok(value) => {
                inner.view.notice = None;
                let open = inner.view.selection.as_ref().map(ContentItem::id);
                if id.is_some() && open == id && !inner.detail_pending {
                    inner.detail_generation += 1;
                    inner.detail_pending = false;
                    inner.view.selection = None;
                    inner.settle();
                }
                Ok(value)
            }
            Err(source) => {
                inner.view.notice = Some(Notice::Error(format!(
                    "Failed to {action} {}.",
                    S::Item::NOUN
                )));
                Err(ViewError::Write { action, source })
            }
        }
    }
}
