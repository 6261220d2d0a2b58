//! Live end-to-end runs against a real WebDriver server and the real site.
//!
//! Ignored by default: they need a WebDriver-compatible server (e.g.
//! `geckodriver` on port 4444), network access, real credentials, and the
//! full environment from `.env.example`. Run with `cargo test -- --ignored`.

use wikicheck::{
    Config, Context, LoginScenario, Runner, SearchScenario, SessionState, TextSizeScenario,
};

fn context() -> Context {
    Context::new(Config::from_env().expect("live tests need the full environment set"))
}

#[tokio::test]
#[ignore = "requires a WebDriver server, network access, and real credentials"]
async fn login_persists_a_nonempty_artifact() {
    let runner = Runner::new(context());
    let report = runner.run(&LoginScenario, &[]).await;
    assert!(report.all_passed(), "{:?}", report);

    let state = SessionState::load(&runner.context().config.auth_file)
        .expect("artifact should exist after a passing login");
    assert!(!state.is_empty());
}

#[tokio::test]
#[ignore = "requires a WebDriver server, network access, and real credentials"]
async fn full_suite_passes() {
    let runner = Runner::new(context());
    let report = runner
        .run(&LoginScenario, &[&SearchScenario, &TextSizeScenario])
        .await;
    assert!(report.all_passed(), "{:?}", report);
}

#[tokio::test]
#[ignore = "requires a WebDriver server, network access, and a previously persisted artifact"]
async fn dependents_run_against_a_reused_artifact() {
    let runner = Runner::new(context());
    let report = runner
        .run_dependents(&[&SearchScenario, &TextSizeScenario])
        .await;
    assert!(report.all_passed(), "{:?}", report);
}
