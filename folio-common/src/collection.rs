use crate::{
    filter::{FilterCriteria, Filterable},
    model::{ContentItem, Id},
};
use derive_where::derive_where;
use std::collections::HashSet;

/// Ordered list of content items with unique ids.
///
/// Construction keeps the first occurrence of an id and drops later ones;
/// insertion order is otherwise preserved. A collection is never patched in
/// place, it is replaced as a whole when its source is read again.
#[derive(Clone, Eq, PartialEq, Debug)]
#[derive_where(Default)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T: ContentItem> Collection<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.id()))
            .collect();

        Self { items }
    }

    #[must_use]
    pub fn get(&self, id: Id<T::Marker>) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: Id<T::Marker>) -> bool {
        self.get(id).is_some()
    }
}

impl<T> Collection<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Filterable + Clone> Collection<T> {
    /// Narrows the collection with [`crate::filter::filter`]. Order is kept.
    #[must_use]
    pub fn filtered(&self, criteria: &FilterCriteria) -> Self {
        Self {
            items: crate::filter::filter(&self.items, criteria),
        }
    }
}

impl<T: ContentItem> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        collection::Collection,
        model::{
            Id,
            image::{Image, ImageMarker},
        },
    };

    fn image(id: u64, title: &str) -> Image {
        Image {
            id: Id::new(id),
            src: format!("/images/{id}.jpg"),
            title: title.into(),
            category: "web".into(),
        }
    }

    #[test]
    fn keeps_first_occurrence_of_duplicate_ids() {
        let collection = Collection::new(vec![
            image(3, "first three"),
            image(1, "one"),
            image(3, "second three"),
            image(2, "two"),
        ]);

        let titles: Vec<&str> = collection.iter().map(|image| image.title.as_str()).collect();
        assert_eq!(titles, ["first three", "one", "two"]);
    }

    #[test]
    fn lookup_by_id() {
        let collection: Collection<Image> = [image(7, "seven"), image(8, "eight")]
            .into_iter()
            .collect();

        assert_eq!(collection.get(Id::new(8)).map(|image| image.title.as_str()), Some("eight"));
        assert!(!collection.contains(Id::<ImageMarker>::new(9)));
        assert_eq!(collection.len(), 2);
    }
}
