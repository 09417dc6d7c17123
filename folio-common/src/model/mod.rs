pub mod image;
pub mod post;
pub mod project;

use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    marker::PhantomData,
    num::ParseIntError,
    str::FromStr,
};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum ModelValidationError {
    #[error("Timestamp could not be parsed: {0}")]
    Timestamp(#[from] time::error::Parse),
    #[error("Required field `{0}` was empty")]
    MissingField(&'static str),
}

/// Numeric identity of a content item, typed by the kind of item it refers to.
#[derive_where(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Default,
    Hash,
    Serialize,
    Deserialize
)]
#[serde(transparent)]
pub struct Id<Marker>(u64, #[serde(skip)] PhantomData<fn() -> Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> FromStr for Id<Marker> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str(s).map(Self::new)
    }
}

impl<Marker> From<u64> for Id<Marker> {
    fn from(value: u64) -> Self {
        Id::new(value)
    }
}

impl<Marker> From<Id<Marker>> for u64 {
    fn from(value: Id<Marker>) -> Self {
        value.get()
    }
}

/// Anything that can live in a [`Collection`](crate::collection::Collection).
pub trait ContentItem {
    type Marker;

    /// What the item is called in user-facing messages, e.g. "blog post".
    const NOUN: &'static str;

    fn id(&self) -> Id<Self::Marker>;
}

#[cfg(test)]
mod tests {
    use crate::model::{Id, post::PostMarker};

    #[test]
    fn id_is_transparent_number() {
        let id = Id::<PostMarker>::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(serde_json::from_str::<Id<PostMarker>>("42").unwrap(), id);
        assert_eq!("42".parse::<Id<PostMarker>>().unwrap(), id);
        assert!("forty-two".parse::<Id<PostMarker>>().is_err());
    }
}
