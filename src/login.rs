//! The login scenario: establish an authenticated session once and persist
//! it for every dependent scenario.

use crate::error::{AssertionFailed, AuthError, ScenarioError};
use crate::page;
use crate::scenario::{Context, Scenario};
use crate::session::SessionState;
use async_trait::async_trait;
use fantoccini::{Client, Locator};
use tracing::{debug, info};

const USERNAME_FIELD: &str = "#wpName1";
const PASSWORD_FIELD: &str = "#wpPassword1";
const SUBMIT_BUTTON: &str = "#wpLoginAttempt";

/// Signs in to the target site and writes the session artifact.
///
/// The flow is a linear state machine with a single branch at the end:
/// navigate, await the login form, submit credentials, await the outcome,
/// then either persist the captured session (success) or raise
/// [`AuthError`] (failure). There is no retry at this layer; re-attempts are
/// the runner's business.
#[derive(Debug, Default)]
pub struct LoginScenario;

#[async_trait]
impl Scenario for LoginScenario {
    fn name(&self) -> &'static str {
        "login"
    }

    async fn run(&self, client: &Client, cx: &Context) -> Result<(), ScenarioError> {
        let config = &cx.config;
        let t = &cx.timeouts;

        client.goto(config.target_url.as_str()).await?;
        page::settle(client, t.page_load, t.poll).await?;

        debug!("activating the login entry point");
        page::wait_visible(client, Locator::LinkText("Log in"), t.element, t.poll)
            .await?
            .click()
            .await?;

        let username_field =
            page::wait_visible(client, Locator::Css(USERNAME_FIELD), t.element, t.poll).await?;
        let password_field = client.find(Locator::Css(PASSWORD_FIELD)).await?;

        debug!(username = %config.username, "submitting credentials");
        username_field.send_keys(&config.username).await?;
        password_field.send_keys(&config.password).await?;
        client
            .find(Locator::Css(SUBMIT_BUTTON))
            .await?
            .click()
            .await?;

        page::settle(client, t.page_load, t.poll).await?;

        // The post-login marker is a visible link carrying the account name.
        let marker = page::wait_visible(
            client,
            Locator::LinkText(&config.username),
            t.element,
            t.poll,
        )
        .await;
        match marker {
            Ok(_) => {}
            Err(ref e) if e.is_timeout() => {
                return Err(AuthError {
                    username: config.username.clone(),
                }
                .into());
            }
            Err(e) => return Err(e),
        }

        let state = SessionState::capture(client).await?;
        if state.is_empty() {
            // A logged-in page with no cookies at all means the capture ran
            // on the wrong origin; persisting it would poison every
            // dependent scenario.
            return Err(AssertionFailed {
                step: "session capture",
                expected: "at least one cookie or storage entry".to_string(),
                actual: "an empty session snapshot".to_string(),
            }
            .into());
        }
        state.save(&config.auth_file)?;
        info!(
            path = %config.auth_file.display(),
            cookies = state.cookies.len(),
            "session artifact persisted"
        );
        Ok(())
    }
}
