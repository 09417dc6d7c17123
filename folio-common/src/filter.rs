//! Narrowing of content lists by free text, category and tags.
//!
//! All predicate classes must pass for an item to be kept. Within the tag
//! class a single selected tag is enough. Filtering never reorders.

use std::{
    collections::BTreeSet,
    convert::Infallible,
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Fields a [`FilterCriteria`] can look at.
pub trait Filterable {
    fn title(&self) -> &str;

    /// Searched in addition to the title when present.
    fn description(&self) -> Option<&str> {
        None
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn tags(&self) -> &[String] {
        &[]
    }
}

pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(selected) => category == Some(selected.as_str()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(s.to_owned())
        })
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Named(category) => f.write_str(category),
        }
    }
}

/// Transient filter state of a list view. Never persisted.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct FilterCriteria {
    pub text: String,
    pub category: CategoryFilter,
    pub tags: BTreeSet<String>,
}

impl FilterCriteria {
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Selects the tag if it is not selected, deselects it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.tags.remove(tag) {
            self.tags.insert(tag.to_owned());
        }
    }

    /// Whether these criteria keep every item.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.text.is_empty() && self.category == CategoryFilter::All && self.tags.is_empty()
    }

    #[must_use]
    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        self.matches_text(item) && self.category.matches(item.category()) && self.matches_tags(item)
    }

    fn matches_text<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        if self.text.is_empty() {
            return true;
        }

        let needle = self.text.to_lowercase();
        item.title().to_lowercase().contains(&needle)
            || item
                .description()
                .is_some_and(|description| description.to_lowercase().contains(&needle))
    }

    fn matches_tags<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        self.tags.is_empty() || item.tags().iter().any(|tag| self.tags.contains(tag))
    }
}

/// Keeps the items matching `criteria`, in their original order.
#[must_use]
pub fn filter<T: Filterable + Clone>(items: &[T], criteria: &FilterCriteria) -> Vec<T> {
    items
        .iter()
        .filter(|item| criteria.matches(*item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        collection::Collection,
        filter::{CategoryFilter, FilterCriteria, filter},
        model::project::{Project, catalog},
        placeholder,
    };

    fn names(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|project| project.name.as_str()).collect()
    }

    #[test]
    fn neutral_criteria_is_identity() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_neutral());

        let images = Collection::new(placeholder::images());
        assert_eq!(images.filtered(&criteria), images);

        let projects = catalog();
        assert_eq!(filter(&projects, &criteria), projects);
    }

    #[test]
    fn filtering_is_idempotent() {
        let criteria_list = [
            FilterCriteria::default().with_text("design"),
            FilterCriteria::default().with_category(CategoryFilter::Named("web".into())),
            FilterCriteria::default()
                .with_text("e")
                .with_category(CategoryFilter::Named("graphic".into())),
        ];
        let images = Collection::new(placeholder::images());

        for criteria in &criteria_list {
            let once = images.filtered(criteria);
            assert_eq!(once.filtered(criteria), once);
        }

        let projects = catalog();
        let criteria = FilterCriteria::default().with_tags(["Express", "HTML"]);
        let once = filter(&projects, &criteria);
        assert_eq!(filter(&once, &criteria), once);
    }

    #[test]
    fn text_is_case_insensitive_substring() {
        let images = placeholder::images();
        let criteria = FilterCriteria::default().with_text("DESIGN");

        let titles: Vec<String> = filter(&images, &criteria)
            .into_iter()
            .map(|image| image.title)
            .collect();
        assert_eq!(
            titles,
            [
                "Creative Design Process",
                "Mobile App Interface Design",
                "Brand Identity Design"
            ]
        );
    }

    #[test]
    fn project_text_also_searches_description() {
        let criteria = FilterCriteria::default().with_text("websockets");
        assert_eq!(names(&filter(&catalog(), &criteria)), ["Chat Application"]);
    }

    #[test]
    fn category_is_exact_with_all_sentinel() {
        let images = placeholder::images();

        let all: CategoryFilter = "all".parse().unwrap();
        assert_eq!(all, CategoryFilter::All);
        assert_eq!(filter(&images, &FilterCriteria::default().with_category(all)).len(), 5);

        let web = FilterCriteria::default().with_category("web".parse().unwrap());
        let ids: Vec<u64> = filter(&images, &web)
            .iter()
            .map(|image| image.id.get())
            .collect();
        assert_eq!(ids, [1, 4]);

        let partial = FilterCriteria::default().with_category("we".parse().unwrap());
        assert!(filter(&images, &partial).is_empty());
    }

    #[test]
    fn tags_are_a_disjunction() {
        let react_only = Project {
            technologies: vec!["React".into()],
            ..catalog()[0].clone()
        };
        let criteria = FilterCriteria::default().with_tags(["React", "Node.js"]);
        assert!(criteria.matches(&react_only));

        assert_eq!(
            names(&filter(&catalog(), &criteria)),
            [
                "Personal Portfolio",
                "Task Manager API",
                "E-commerce Platform",
                "Chat Application"
            ]
        );
    }

    #[test]
    fn predicate_classes_are_a_conjunction() {
        let criteria = FilterCriteria::default()
            .with_text("app")
            .with_tags(["React"]);

        assert_eq!(names(&filter(&catalog(), &criteria)), ["Chat Application"]);
    }

    #[test]
    fn toggle_tag() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_tag("CSS");
        criteria.toggle_tag("HTML");
        criteria.toggle_tag("CSS");

        assert_eq!(criteria.tags.into_iter().collect::<Vec<_>>(), ["HTML"]);
    }
}
