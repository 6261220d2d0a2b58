//! Environment-driven configuration.
//!
//! Every setting the scenarios consume comes from the process environment,
//! read once through the same fail-fast contract: a missing required variable
//! is a [`ConfigError::MissingVar`] naming that variable, never a silent
//! default. Loading happens before any WebDriver session is created, so a
//! broken environment can never cost a navigation.

use crate::error::ConfigError;
use std::env;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Environment variable names understood by [`Config::from_env`].
pub const TARGET_URL: &str = "TARGET_URL";
/// Login account name.
pub const WIKIPEDIA_USERNAME: &str = "WIKIPEDIA_USERNAME";
/// Login password.
pub const WIKIPEDIA_PASSWORD: &str = "WIKIPEDIA_PASSWORD";
/// Path the session artifact is persisted to.
pub const AUTH_FILE: &str = "AUTH_FILE";
/// Article title the search scenario drives towards.
pub const SEARCH_TERM: &str = "SEARCH_TERM";
/// Expected author of the latest revision (optional override).
pub const EXPECTED_AUTHOR: &str = "EXPECTED_AUTHOR";
/// Upper bound on the homepage article count (optional override).
pub const MAX_ARTICLE_COUNT: &str = "MAX_ARTICLE_COUNT";
/// WebDriver server to connect to (optional override).
pub const WEBDRIVER_URL: &str = "WEBDRIVER_URL";

/// Latest-revision author observed when the suite was written. The live value
/// drifts as the article is edited, so it can be overridden without a code
/// change via `EXPECTED_AUTHOR`.
const DEFAULT_EXPECTED_AUTHOR: &str = "Alenoach";

/// "Fewer than seven million articles" held at time of writing; override via
/// `MAX_ARTICLE_COUNT` once it stops holding.
const DEFAULT_MAX_ARTICLE_COUNT: u64 = 7_000_000;

const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Read a required environment variable.
///
/// This is the single fail-fast read used by every consumer in the crate.
/// An unset or empty variable yields [`ConfigError::MissingVar`] carrying the
/// variable's name.
pub fn require_env(name: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name.to_string())),
    }
}

/// Read an optional environment variable, treating empty as unset.
pub fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Immutable per-process configuration for the whole scenario suite.
///
/// Constructed once via [`Config::from_env`] and shared read-only by every
/// scenario through the runner's [`Context`](crate::scenario::Context).
#[derive(Clone)]
pub struct Config {
    /// Site under test, e.g. `https://en.wikipedia.org/`.
    pub target_url: Url,

    /// Account name used by the login scenario, and the post-login marker
    /// every dependent session is expected to carry.
    pub username: String,

    /// Account password.
    pub password: String,

    /// Where the login scenario persists the session artifact, and where the
    /// runner loads it from for dependent scenarios.
    pub auth_file: PathBuf,

    /// Article title the search scenario selects and verifies.
    pub search_term: String,

    /// Expected author of the article's latest revision. A point-in-time
    /// expectation; see [`DEFAULT_EXPECTED_AUTHOR`].
    pub expected_author: String,

    /// Sanity ceiling for the homepage article-count statistic.
    pub max_article_count: u64,

    /// WebDriver server the runner connects clients to.
    pub webdriver_url: String,
}

impl Config {
    /// Load the full configuration from the process environment.
    ///
    /// All required variables are validated up front; the first missing one
    /// aborts the load, so no scenario can start navigating on a partial
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let target_url = require_env(TARGET_URL)?;
        let target_url = Url::parse(&target_url)?;
        let username = require_env(WIKIPEDIA_USERNAME)?;
        let password = require_env(WIKIPEDIA_PASSWORD)?;
        let auth_file = PathBuf::from(require_env(AUTH_FILE)?);
        let search_term = require_env(SEARCH_TERM)?;

        let expected_author =
            optional_env(EXPECTED_AUTHOR).unwrap_or_else(|| DEFAULT_EXPECTED_AUTHOR.to_string());
        let max_article_count = match optional_env(MAX_ARTICLE_COUNT) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidVar {
                    name: MAX_ARTICLE_COUNT.to_string(),
                    message: e.to_string(),
                })?,
            None => DEFAULT_MAX_ARTICLE_COUNT,
        };
        let webdriver_url =
            optional_env(WEBDRIVER_URL).unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_string());

        Ok(Config {
            target_url,
            username,
            password,
            auth_file,
            search_term,
            expected_author,
            max_article_count,
            webdriver_url,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("target_url", &self.target_url.as_str())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("auth_file", &self.auth_file)
            .field("search_term", &self.search_term)
            .field("expected_author", &self.expected_author)
            .field("max_article_count", &self.max_article_count)
            .field("webdriver_url", &self.webdriver_url)
            .finish()
    }
}
