//! Scripted browser-session scenarios for end-to-end Wikipedia checks.
//!
//! This crate drives a real browser through the [WebDriver protocol] (via
//! [`fantoccini`]) to verify a handful of user-visible behaviors on a live
//! Wikipedia instance: signing in, searching for an article and checking its
//! revision history, and exercising the homepage text-size controls.
//!
//! The interesting part is not any single check but the shape they share: an
//! authenticated browser session is established **once** by the
//! [`LoginScenario`], persisted to disk as a [`SessionState`] artifact, and
//! then reused by every other scenario. Each scenario is an independent,
//! assertion-driven sequence over a live page handle; the [`Runner`] enforces
//! the one ordering rule (login first, everything else after) and applies a
//! single uniform retry.
//!
//! All parameters come from the environment, read once through a fail-fast
//! [`Config`]: a missing variable aborts before any navigation. Expectations
//! that decay with the live site (the latest-revision author, the article
//! count ceiling) are overridable the same way, so a drifted value is an
//! environment update and not a code change.
//!
//! # Examples
//!
//! The example assumes a WebDriver-compatible server (e.g. [`geckodriver`])
//! listening where `WEBDRIVER_URL` points, and the required variables
//! (`TARGET_URL`, `WIKIPEDIA_USERNAME`, `WIKIPEDIA_PASSWORD`, `AUTH_FILE`,
//! `SEARCH_TERM`) set.
//!
//! ```no_run
//! use wikicheck::{Config, Context, Runner};
//! use wikicheck::{LoginScenario, SearchScenario, TextSizeScenario};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let runner = Runner::new(Context::new(config));
//!
//!     let report = runner
//!         .run(&LoginScenario, &[&SearchScenario, &TextSizeScenario])
//!         .await;
//!
//!     for outcome in &report.outcomes {
//!         println!("{}: {}", outcome.name, outcome.status);
//!     }
//!     assert!(report.all_passed());
//!     Ok(())
//! }
//! ```
//!
//! [WebDriver protocol]: https://www.w3.org/TR/webdriver/
//! [`geckodriver`]: https://github.com/mozilla/geckodriver
#![deny(missing_docs)]
#![warn(missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use fantoccini::{Client, Locator};

/// Environment-driven configuration.
pub mod config;

/// Error types.
pub mod error;

/// The login scenario.
pub mod login;

/// Page-level wait and measurement helpers.
pub mod page;

/// The dependency-ordered scenario runner.
pub mod runner;

/// The scenario abstraction.
pub mod scenario;

/// The search-and-verify scenario.
pub mod search;

/// The persisted session artifact.
pub mod session;

/// The homepage text-size scenario.
pub mod text_size;

pub use crate::config::Config;
pub use crate::login::LoginScenario;
pub use crate::runner::{RunReport, Runner, ScenarioOutcome, Status};
pub use crate::scenario::{Context, Scenario, Timeouts};
pub use crate::search::SearchScenario;
pub use crate::session::SessionState;
pub use crate::text_size::TextSizeScenario;
