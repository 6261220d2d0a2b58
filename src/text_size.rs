//! The homepage text-size scenario.

use crate::error::{AssertionFailed, ScenarioError};
use crate::page;
use crate::scenario::{Context, Scenario};
use async_trait::async_trait;
use fantoccini::{Client, Locator};
use tracing::debug;

/// The homepage link to Special:Statistics that displays the article count.
/// Located by its target rather than its (ever-changing) text.
const ARTICLE_COUNT_LINK: &str = "#articlecount a[href=\"/wiki/Special:Statistics\"]";

/// The content region whose computed font size the scenario measures.
const CONTENT_REGION: &str = "#bodyContent";

/// Checks the article-count statistic and the text-size appearance controls.
///
/// Reads the displayed article count and asserts it is still under the
/// configured ceiling (a time-decaying expectation, overridable without a
/// code change), then exercises the Small / Large / Standard text-size
/// options and asserts the content font size shrinks, grows, and finally
/// returns to the baseline within a documented tolerance.
#[derive(Debug, Default)]
pub struct TextSizeScenario;

#[async_trait]
impl Scenario for TextSizeScenario {
    fn name(&self) -> &'static str {
        "homepage-text-size"
    }

    async fn run(&self, client: &Client, cx: &Context) -> Result<(), ScenarioError> {
        let config = &cx.config;
        let t = &cx.timeouts;

        client.goto(config.target_url.as_str()).await?;
        page::settle(client, t.page_load, t.poll).await?;

        let stat = page::wait_visible(
            client,
            Locator::Css(ARTICLE_COUNT_LINK),
            t.element,
            t.poll,
        )
        .await?;
        let stat_text = stat.text().await?;
        let count = page::parse_grouped_count(&stat_text).ok_or_else(|| AssertionFailed {
            step: "article count",
            expected: "a grouped integer".to_string(),
            actual: format!("`{}`", stat_text),
        })?;
        debug!(count, ceiling = config.max_article_count, "article count read");
        if count >= config.max_article_count {
            return Err(AssertionFailed {
                step: "article count ceiling",
                expected: format!("fewer than {} articles", config.max_article_count),
                actual: count.to_string(),
            }
            .into());
        }

        let baseline = page::computed_font_size(client, CONTENT_REGION).await?;
        debug!(baseline, "baseline font size measured");

        select_text_size(client, cx, "Small").await?;
        let small = page::computed_font_size(client, CONTENT_REGION).await?;
        if small >= baseline {
            return Err(AssertionFailed {
                step: "small text size",
                expected: format!("smaller than the {}px baseline", baseline),
                actual: format!("{}px", small),
            }
            .into());
        }

        select_text_size(client, cx, "Large").await?;
        let large = page::computed_font_size(client, CONTENT_REGION).await?;
        if large <= baseline {
            return Err(AssertionFailed {
                step: "large text size",
                expected: format!("larger than the {}px baseline", baseline),
                actual: format!("{}px", large),
            }
            .into());
        }

        select_text_size(client, cx, "Standard").await?;
        let standard = page::computed_font_size(client, CONTENT_REGION).await?;
        if !page::font_size_matches(standard, baseline) {
            return Err(AssertionFailed {
                step: "standard text size",
                expected: format!(
                    "the {}px baseline (within {}px)",
                    baseline,
                    page::FONT_SIZE_TOLERANCE_PX
                ),
                actual: format!("{}px", standard),
            }
            .into());
        }

        Ok(())
    }
}

/// Activate one of the appearance menu's text-size options by its label.
async fn select_text_size(
    client: &Client,
    cx: &Context,
    label: &str,
) -> Result<(), ScenarioError> {
    debug!(label, "selecting text size");
    let locator = format!("//label[normalize-space(.)='{}']", label);
    page::wait_visible(client, Locator::XPath(&locator), cx.timeouts.element, cx.timeouts.poll)
        .await?
        .click()
        .await?;
    // The size change is applied client-side; give the style a poll interval
    // to take effect before re-measuring.
    tokio::time::sleep(cx.timeouts.poll).await;
    Ok(())
}
