//! Runner ordering contract: no dependent scenario executes before the login
//! gate reaches a terminal state, and a failed gate skips every dependent
//! without touching a browser.
//!
//! These tests point the runner at an unreachable WebDriver address, so the
//! gate fails while trying to establish its session; the recording scenarios
//! prove their bodies never ran.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use url::Url;
use wikicheck::error::ScenarioError;
use wikicheck::scenario::{Context, Scenario};
use wikicheck::{Client, Config, Runner, Status};

/// Counts how many times its body actually ran.
struct Recording {
    name: &'static str,
    runs: AtomicU32,
}

impl Recording {
    fn new(name: &'static str) -> Self {
        Recording {
            name,
            runs: AtomicU32::new(0),
        }
    }

    fn runs(&self) -> u32 {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scenario for Recording {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self, _client: &Client, _cx: &Context) -> Result<(), ScenarioError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn unreachable_config() -> Config {
    Config {
        target_url: Url::parse("http://127.0.0.1:1/").unwrap(),
        username: "TestAccount".to_string(),
        password: "hunter2".to_string(),
        auth_file: PathBuf::from("/nonexistent/wikicheck-auth.json"),
        search_term: "Artificial intelligence".to_string(),
        expected_author: "Alenoach".to_string(),
        max_article_count: 7_000_000,
        // nothing listens on port 1, so session establishment fails fast
        webdriver_url: "http://127.0.0.1:1".to_string(),
    }
}

#[tokio::test]
async fn failed_gate_skips_every_dependent() {
    let runner = Runner::new(Context::new(unreachable_config()));
    let gate = Recording::new("login");
    let search = Recording::new("search-and-verify");
    let text_size = Recording::new("homepage-text-size");

    let report = runner.run(&gate, &[&search, &text_size]).await;

    assert!(!report.all_passed());
    assert_eq!(report.outcomes.len(), 3);

    // the gate failed before its body could run
    assert!(matches!(
        report.outcomes[0].status,
        Status::Failed(ScenarioError::Session(_))
    ));
    assert_eq!(gate.runs(), 0);

    // dependents were reported skipped and never executed
    for outcome in &report.outcomes[1..] {
        assert!(matches!(outcome.status, Status::Skipped));
        assert_eq!(outcome.attempts, 0);
    }
    assert_eq!(search.runs(), 0);
    assert_eq!(text_size.runs(), 0);
}

#[tokio::test]
async fn session_failures_get_exactly_one_retry() {
    let runner = Runner::new(Context::new(unreachable_config()));
    let gate = Recording::new("login");

    let report = runner.run(&gate, &[]).await;

    assert_eq!(report.outcomes.len(), 1);
    // first attempt plus the single uniform re-attempt
    assert_eq!(report.outcomes[0].attempts, 2);
}

#[tokio::test]
async fn report_preserves_execution_order() {
    let runner = Runner::new(Context::new(unreachable_config()));
    let gate = Recording::new("login");
    let a = Recording::new("a");
    let b = Recording::new("b");

    let report = runner.run(&gate, &[&a, &b]).await;
    let names: Vec<&str> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["login", "a", "b"]);
}

#[tokio::test]
async fn run_dependents_fails_without_a_server_but_reports_each() {
    let runner = Runner::new(Context::new(unreachable_config()));
    let a = Recording::new("a");
    let b = Recording::new("b");

    let report = runner.run_dependents(&[&a, &b]).await;

    assert_eq!(report.outcomes.len(), 2);
    for outcome in &report.outcomes {
        assert!(matches!(
            outcome.status,
            Status::Failed(ScenarioError::Session(_))
        ));
    }
    assert_eq!(a.runs(), 0);
    assert_eq!(b.runs(), 0);
}
