//! The scenario abstraction.
//!
//! A [`Scenario`] is one named, independent, assertion-driven browser
//! interaction sequence: a pure function of a live page handle and the shared
//! [`Context`]. Success is simply returning `Ok(())`. Scenarios hold no state
//! between invocations and must not depend on execution order, with the one
//! exception enforced by the runner: the login scenario runs to a terminal
//! state before any dependent scenario starts.

use crate::config::Config;
use crate::error::ScenarioError;
use async_trait::async_trait;
use fantoccini::Client;
use std::time::Duration;

/// Wait bounds owned by the runner and handed down to every scenario.
///
/// Scenarios never bake in their own bounds; both the page-settle and the
/// element-appearance waits take these.
#[derive(Clone, Copy, Debug)]
pub struct Timeouts {
    /// Bound on the network-quiescence wait after a navigation.
    pub page_load: Duration,

    /// Bound on any single element-appearance wait.
    pub element: Duration,

    /// Polling interval used inside both waits.
    pub poll: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            page_load: Duration::from_secs(60),
            element: Duration::from_secs(30),
            poll: Duration::from_millis(500),
        }
    }
}

/// The parameter bag a scenario runs against.
#[derive(Clone, Debug)]
pub struct Context {
    /// Immutable suite configuration.
    pub config: Config,

    /// Wait bounds for this run.
    pub timeouts: Timeouts,
}

impl Context {
    /// Build a context with the default wait bounds.
    pub fn new(config: Config) -> Self {
        Context {
            config,
            timeouts: Timeouts::default(),
        }
    }
}

/// One independent browser interaction sequence.
#[async_trait]
pub trait Scenario: Send + Sync {
    /// Short stable name used in reports and logs.
    fn name(&self) -> &'static str;

    /// Drive the scenario against a live page.
    ///
    /// Any error aborts the scenario; nothing is swallowed or
    /// logged-and-continued, and there is no partial-success state.
    async fn run(&self, client: &Client, cx: &Context) -> Result<(), ScenarioError>;
}
