use crate::error::FetchError;

/// Outcome of a read against a remote content source.
///
/// A read either returns what the source holds, or the placeholder dataset
/// together with the reason the source could not be used.
#[derive(Debug)]
pub enum Fetched<T> {
    Live(T),
    Fallback { data: T, reason: FetchError },
}

impl<T> Fetched<T> {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback { .. })
    }

    #[must_use]
    pub fn data(&self) -> &T {
        match self {
            Fetched::Live(data) | Fetched::Fallback { data, .. } => data,
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<&FetchError> {
        match self {
            Fetched::Live(_) => None,
            Fetched::Fallback { reason, .. } => Some(reason),
        }
    }

    #[must_use]
    pub fn into_data(self) -> T {
        match self {
            Fetched::Live(data) | Fetched::Fallback { data, .. } => data,
        }
    }

    /// Splits into the data and, for a fallback, the reason.
    #[must_use]
    pub fn into_parts(self) -> (T, Option<FetchError>) {
        match self {
            Fetched::Live(data) => (data, None),
            Fetched::Fallback { data, reason } => (data, Some(reason)),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Live(data) => Fetched::Live(f(data)),
            Fetched::Fallback { data, reason } => Fetched::Fallback {
                data: f(data),
                reason,
            },
        }
    }
}
