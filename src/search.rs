//! The search-and-verify scenario.

use crate::error::{AssertionFailed, ScenarioError};
use crate::page;
use crate::scenario::{Context, Scenario};
use async_trait::async_trait;
use fantoccini::{Client, Locator};
use tracing::debug;

/// Fixed probe typed into the search box; the suggestion list it produces is
/// expected to contain the configured search term.
const SEARCH_PROBE: &str = "art";

const SEARCH_INPUT: &str = "#searchInput";
const PAGE_HEADING: &str = "#firstHeading";
/// The author link of a revision row in the history list.
const REVISION_AUTHOR: &str = ".mw-userlink";

/// Searches for the configured article and verifies the page it lands on.
///
/// Drives the site search with a short probe, selects the suggestion whose
/// text equals the search term exactly, then verifies the article heading,
/// the revision-history heading, and the latest revision's author. The author
/// check is a point-in-time assertion against live data: the expected value
/// is an overridable parameter, and a mismatch means the expectation has
/// drifted, not that the flow is broken.
#[derive(Debug, Default)]
pub struct SearchScenario;

#[async_trait]
impl Scenario for SearchScenario {
    fn name(&self) -> &'static str {
        "search-and-verify"
    }

    async fn run(&self, client: &Client, cx: &Context) -> Result<(), ScenarioError> {
        let config = &cx.config;
        let t = &cx.timeouts;
        let term = &config.search_term;

        client.goto(config.target_url.as_str()).await?;
        page::settle(client, t.page_load, t.poll).await?;

        debug!(probe = SEARCH_PROBE, term = %term, "driving the search box");
        let search_input =
            page::wait_visible(client, Locator::Css(SEARCH_INPUT), t.element, t.poll).await?;
        search_input.click().await?;
        search_input.send_keys(SEARCH_PROBE).await?;

        // Exact-text match against the suggestion list.
        page::wait_visible(client, Locator::LinkText(term), t.element, t.poll)
            .await?
            .click()
            .await?;
        page::settle(client, t.page_load, t.poll).await?;

        let heading =
            page::wait_visible(client, Locator::Css(PAGE_HEADING), t.element, t.poll).await?;
        let heading_text = heading.text().await?;
        if heading_text != *term {
            return Err(AssertionFailed {
                step: "article heading",
                expected: format!("`{}`", term),
                actual: format!("`{}`", heading_text),
            }
            .into());
        }

        debug!("opening the revision history");
        page::wait_visible(client, Locator::LinkText("View history"), t.element, t.poll)
            .await?
            .click()
            .await?;
        page::settle(client, t.page_load, t.poll).await?;

        let expected_heading = format!("{}: Revision history", term);
        let history_heading =
            page::wait_visible(client, Locator::Css(PAGE_HEADING), t.element, t.poll).await?;
        let history_text = history_heading.text().await?;
        if history_text != expected_heading {
            return Err(AssertionFailed {
                step: "revision history heading",
                expected: format!("`{}`", expected_heading),
                actual: format!("`{}`", history_text),
            }
            .into());
        }

        // First entry in the history list is the most recent revision.
        let author =
            page::wait_visible(client, Locator::Css(REVISION_AUTHOR), t.element, t.poll).await?;
        let author_text = author.text().await?;
        if author_text != config.expected_author {
            return Err(AssertionFailed {
                step: "latest revision author",
                expected: format!("`{}`", config.expected_author),
                actual: format!("`{}`", author_text),
            }
            .into());
        }

        Ok(())
    }
}
