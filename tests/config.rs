//! Fail-fast configuration contract: omitting any required variable yields a
//! `ConfigError::MissingVar` naming that variable, before anything else
//! happens.
//!
//! These tests mutate the process environment, so they are serialized.

use serial_test::serial;
use std::env;
use wikicheck::config::{self, Config};
use wikicheck::error::ConfigError;

const REQUIRED: &[&str] = &[
    config::TARGET_URL,
    config::WIKIPEDIA_USERNAME,
    config::WIKIPEDIA_PASSWORD,
    config::AUTH_FILE,
    config::SEARCH_TERM,
];

fn set_complete_env() {
    env::set_var(config::TARGET_URL, "https://en.wikipedia.org/");
    env::set_var(config::WIKIPEDIA_USERNAME, "TestAccount");
    env::set_var(config::WIKIPEDIA_PASSWORD, "hunter2");
    env::set_var(config::AUTH_FILE, "/tmp/wikicheck-auth.json");
    env::set_var(config::SEARCH_TERM, "Artificial intelligence");
    env::remove_var(config::EXPECTED_AUTHOR);
    env::remove_var(config::MAX_ARTICLE_COUNT);
    env::remove_var(config::WEBDRIVER_URL);
}

#[test]
#[serial]
fn complete_environment_loads() {
    set_complete_env();
    let config = Config::from_env().unwrap();
    assert_eq!(config.target_url.as_str(), "https://en.wikipedia.org/");
    assert_eq!(config.username, "TestAccount");
    assert_eq!(config.search_term, "Artificial intelligence");
}

#[test]
#[serial]
fn each_missing_required_var_is_named() {
    for &var in REQUIRED {
        set_complete_env();
        env::remove_var(var);
        match Config::from_env() {
            Err(ConfigError::MissingVar(name)) => assert_eq!(name, var),
            other => panic!("expected MissingVar({}), got {:?}", var, other.map(|_| ())),
        }
    }
}

#[test]
#[serial]
fn empty_value_counts_as_missing() {
    set_complete_env();
    env::set_var(config::SEARCH_TERM, "");
    match Config::from_env() {
        Err(ConfigError::MissingVar(name)) => assert_eq!(name, config::SEARCH_TERM),
        other => panic!("expected MissingVar, got {:?}", other.map(|_| ())),
    }
}

#[test]
#[serial]
fn time_decaying_expectations_have_defaults() {
    set_complete_env();
    let config = Config::from_env().unwrap();
    assert_eq!(config.expected_author, "Alenoach");
    assert_eq!(config.max_article_count, 7_000_000);
    assert_eq!(config.webdriver_url, "http://localhost:4444");
}

#[test]
#[serial]
fn time_decaying_expectations_are_overridable() {
    set_complete_env();
    env::set_var(config::EXPECTED_AUTHOR, "SomeNewEditor");
    env::set_var(config::MAX_ARTICLE_COUNT, "8000000");
    env::set_var(config::WEBDRIVER_URL, "http://localhost:9515");
    let config = Config::from_env().unwrap();
    assert_eq!(config.expected_author, "SomeNewEditor");
    assert_eq!(config.max_article_count, 8_000_000);
    assert_eq!(config.webdriver_url, "http://localhost:9515");
}

#[test]
#[serial]
fn unparseable_target_url_is_invalid() {
    set_complete_env();
    env::set_var(config::TARGET_URL, "not a url");
    match Config::from_env() {
        Err(ConfigError::InvalidVar { name, .. }) => assert_eq!(name, config::TARGET_URL),
        other => panic!("expected InvalidVar, got {:?}", other.map(|_| ())),
    }
}

#[test]
#[serial]
fn unparseable_article_count_is_invalid() {
    set_complete_env();
    env::set_var(config::MAX_ARTICLE_COUNT, "seven million");
    match Config::from_env() {
        Err(ConfigError::InvalidVar { name, .. }) => assert_eq!(name, config::MAX_ARTICLE_COUNT),
        other => panic!("expected InvalidVar, got {:?}", other.map(|_| ())),
    }
}

#[test]
#[serial]
fn require_env_reads_present_values() {
    env::set_var("WIKICHECK_TEST_PRESENT", "yes");
    assert_eq!(
        config::require_env("WIKICHECK_TEST_PRESENT").unwrap(),
        "yes"
    );
    env::remove_var("WIKICHECK_TEST_PRESENT");
    assert!(matches!(
        config::require_env("WIKICHECK_TEST_PRESENT"),
        Err(ConfigError::MissingVar(name)) if name == "WIKICHECK_TEST_PRESENT"
    ));
}
