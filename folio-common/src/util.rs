use serde::{
    Deserialize, Deserializer,
    de::{Error, Unexpected},
};
use std::time::Duration;
use thiserror::Error;

/// A non-zero [`Duration`], used for request timeouts.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct PositiveDuration(Duration);

impl PositiveDuration {
    #[must_use]
    pub fn new(duration: Duration) -> Option<Self> {
        (!duration.is_zero()).then_some(Self(duration))
    }

    #[must_use]
    pub fn new_unchecked(duration: Duration) -> Self {
        Self::new(duration).expect("Duration was not positive.")
    }

    pub fn from_millis(millis: u64) -> Result<Self, NonPositiveDurationError> {
        Duration::from_millis(millis).try_into()
    }

    #[must_use]
    pub fn get(&self) -> Duration {
        self.0
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The duration is not positive: {0:?}")]
pub struct NonPositiveDurationError(Duration);

impl TryFrom<Duration> for PositiveDuration {
    type Error = NonPositiveDurationError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(NonPositiveDurationError(value))
    }
}

/// Deserializes from a whole number of milliseconds.
impl<'de> Deserialize<'de> for PositiveDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Self::from_millis(millis)
            .map_err(|_| Error::invalid_value(Unexpected::Unsigned(millis), &"positive milliseconds"))
    }
}

#[cfg(test)]
mod tests {
    use crate::util::PositiveDuration;
    use std::time::Duration;

    #[test]
    fn zero_is_rejected() {
        assert!(PositiveDuration::new(Duration::ZERO).is_none());
        assert!(PositiveDuration::from_millis(0).is_err());
        assert_eq!(
            PositiveDuration::from_millis(250).unwrap().get(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn deserializes_from_millis() {
        let duration: PositiveDuration = serde_json::from_str("1500").unwrap();
        assert_eq!(duration.get(), Duration::from_millis(1500));

        assert!(serde_json::from_str::<PositiveDuration>("0").is_err());
    }
}
