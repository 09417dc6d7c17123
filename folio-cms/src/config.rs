use folio_common::util::PositiveDuration;
use serde::Deserialize;
use std::time::Duration;

pub const ENV_PREFIX: &str = "FOLIO_";
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_CMS_URL: &str = "http://localhost:1337";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Origins of the two content services, read from `FOLIO_`-prefixed
/// environment variables.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
pub struct FetcherConfig {
    /// Upload endpoint, `FOLIO_API_URL`.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Headless CMS, `FOLIO_CMS_URL`.
    #[serde(default = "default_cms_url")]
    pub cms_url: String,
    /// Bound on every request, `FOLIO_REQUEST_TIMEOUT_MS`.
    #[serde(default = "default_request_timeout", rename = "request_timeout_ms")]
    pub request_timeout: PositiveDuration,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn default_cms_url() -> String {
    DEFAULT_CMS_URL.to_owned()
}

fn default_request_timeout() -> PositiveDuration {
    PositiveDuration::new_unchecked(DEFAULT_REQUEST_TIMEOUT)
}

impl FetcherConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    /// Like [`FetcherConfig::from_env`], over explicit key/value pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            cms_url: default_cms_url(),
            request_timeout: default_request_timeout(),
        }
    }
}
