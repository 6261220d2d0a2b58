//! The scenario runner.
//!
//! Owns everything around a scenario's body: connecting a fresh WebDriver
//! client per scenario, the explicit login-first ordering barrier, restoring
//! the persisted session into dependent scenarios, the single uniform
//! retry, and the final report.
//!
//! Execution is strictly sequential. The session artifact has one writer
//! (the login scenario) and many readers (everything else); because the gate
//! must reach a terminal state before any reader starts, no locking is
//! needed. If scenarios are ever run concurrently, that barrier is the
//! invariant to preserve.

use crate::error::ScenarioError;
use crate::scenario::{Context, Scenario};
use crate::session::SessionState;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::fmt;
use tracing::{error, info, warn};

/// How a single scenario ended up.
#[derive(Debug)]
pub enum Status {
    /// All assertions held.
    Passed,

    /// The scenario aborted with the given error (already retried if the
    /// error allowed it).
    Failed(ScenarioError),

    /// Never executed because the login gate did not pass.
    Skipped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Status::Passed => write!(f, "passed"),
            Status::Failed(ref e) => write!(f, "failed: {}", e),
            Status::Skipped => write!(f, "skipped"),
        }
    }
}

/// The outcome of one scenario, as reported by [`Runner::run`].
#[derive(Debug)]
pub struct ScenarioOutcome {
    /// The scenario's name.
    pub name: String,

    /// How it ended.
    pub status: Status,

    /// How many attempts were made (0 for skipped scenarios).
    pub attempts: u32,
}

impl ScenarioOutcome {
    /// True if the scenario passed.
    pub fn passed(&self) -> bool {
        matches!(self.status, Status::Passed)
    }
}

/// Everything [`Runner::run`] produced, in execution order.
#[derive(Debug)]
pub struct RunReport {
    /// Per-scenario outcomes; the gate comes first.
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    /// True only if every scenario passed (skipped counts as not passed).
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }
}

/// Drives an ordered set of scenarios against one WebDriver server.
#[derive(Debug)]
pub struct Runner {
    cx: Context,
    headless: bool,
    retries: u32,
}

impl Runner {
    /// Build a runner over the given context. Browsers run headless and each
    /// scenario gets one uniform re-attempt on retryable failure.
    pub fn new(cx: Context) -> Self {
        Runner {
            cx,
            headless: true,
            retries: 1,
        }
    }

    /// Run with a visible browser window instead of headless.
    pub fn headed(mut self) -> Self {
        self.headless = false;
        self
    }

    /// The context scenarios will run against.
    pub fn context(&self) -> &Context {
        &self.cx
    }

    /// Run the gate scenario to a terminal state, then each dependent in
    /// order.
    ///
    /// The gate (login) is the ordering barrier: until it has passed, no
    /// dependent scenario is executed, and if it fails every dependent is
    /// reported [`Status::Skipped`] without ever touching a browser. Each
    /// dependent runs on a fresh client with the persisted session restored
    /// first.
    pub async fn run(&self, gate: &dyn Scenario, dependents: &[&dyn Scenario]) -> RunReport {
        let mut outcomes = Vec::with_capacity(1 + dependents.len());

        let gate_outcome = self.run_scenario(gate, false).await;
        let gate_passed = gate_outcome.passed();
        outcomes.push(gate_outcome);

        for scenario in dependents {
            if !gate_passed {
                warn!(scenario = scenario.name(), "skipped: login gate did not pass");
                outcomes.push(ScenarioOutcome {
                    name: scenario.name().to_string(),
                    status: Status::Skipped,
                    attempts: 0,
                });
                continue;
            }
            outcomes.push(self.run_scenario(*scenario, true).await);
        }

        RunReport { outcomes }
    }

    /// Run dependent scenarios against an already-persisted session
    /// artifact, without re-running the login gate.
    ///
    /// This trusts that a previous run's artifact at the configured path is
    /// still valid; if it has gone stale, the scenarios' own assertions are
    /// what will catch it.
    pub async fn run_dependents(&self, dependents: &[&dyn Scenario]) -> RunReport {
        let mut outcomes = Vec::with_capacity(dependents.len());
        for scenario in dependents {
            outcomes.push(self.run_scenario(*scenario, true).await);
        }
        RunReport { outcomes }
    }

    async fn run_scenario(&self, scenario: &dyn Scenario, restore: bool) -> ScenarioOutcome {
        let mut attempts = 0;
        loop {
            attempts += 1;
            info!(scenario = scenario.name(), attempt = attempts, "running");
            match self.attempt(scenario, restore).await {
                Ok(()) => {
                    info!(scenario = scenario.name(), "passed");
                    return ScenarioOutcome {
                        name: scenario.name().to_string(),
                        status: Status::Passed,
                        attempts,
                    };
                }
                Err(e) if attempts <= self.retries && e.is_retryable() => {
                    warn!(scenario = scenario.name(), error = %e, "failed; re-attempting");
                }
                Err(e) => {
                    error!(scenario = scenario.name(), error = %e, "failed");
                    return ScenarioOutcome {
                        name: scenario.name().to_string(),
                        status: Status::Failed(e),
                        attempts,
                    };
                }
            }
        }
    }

    /// One full attempt: fresh client, optional session restore, scenario
    /// body, then client teardown regardless of outcome.
    async fn attempt(&self, scenario: &dyn Scenario, restore: bool) -> Result<(), ScenarioError> {
        let client = self.connect().await?;
        let result = self.drive(&client, scenario, restore).await;
        // geckodriver refuses a new session while one is open, so tear down
        // even on failure.
        let _ = client.close().await;
        result
    }

    async fn drive(
        &self,
        client: &Client,
        scenario: &dyn Scenario,
        restore: bool,
    ) -> Result<(), ScenarioError> {
        if restore {
            let state = SessionState::load(&self.cx.config.auth_file)?;
            // Cookies and localStorage are origin-scoped; land on the target
            // before replaying them.
            client.goto(self.cx.config.target_url.as_str()).await?;
            state.restore(client).await?;
        }
        scenario.run(client, &self.cx).await
    }

    async fn connect(&self) -> Result<Client, ScenarioError> {
        let mut caps = serde_json::map::Map::new();
        if self.headless {
            caps.insert(
                "moz:firefoxOptions".to_string(),
                json!({ "args": ["--headless"] }),
            );
            caps.insert(
                "goog:chromeOptions".to_string(),
                json!({ "args": ["--headless", "--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"] }),
            );
        }

        #[cfg(feature = "native-tls")]
        let mut builder = ClientBuilder::native();
        #[cfg(all(feature = "rustls-tls", not(feature = "native-tls")))]
        let mut builder = ClientBuilder::rustls().map_err(|e| {
            ScenarioError::Io(std::io::Error::other(e))
        })?;

        let client = builder
            .capabilities(caps)
            .connect(&self.cx.config.webdriver_url)
            .await?;
        Ok(client)
    }
}
