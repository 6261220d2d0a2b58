//! Page-level helpers shared by the scenarios.
//!
//! Everything here is a thin layer over a [`fantoccini::Client`]: a
//! network-quiescence wait, a bounded visibility wait, and the two
//! measurements the scenarios assert on (computed font size and the grouped
//! article-count statistic).

use crate::error::{AssertionFailed, ScenarioError};
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, Locator};
use serde_json::Value as Json;
use std::time::{Duration, Instant};

/// Samples the page's load state and how many resources it has fetched.
const PAGE_ACTIVITY_SCRIPT: &str = "\
    return [document.readyState, performance.getEntriesByType('resource').length];";

const FONT_SIZE_SCRIPT: &str = "\
    return window.getComputedStyle(document.querySelector(arguments[0])).fontSize;";

/// How far apart two font sizes may be and still count as equal.
///
/// The "Standard" text-size control is expected to restore the baseline
/// exactly, but computed sizes go through sub-pixel rounding, so exact float
/// equality is fragile. The presets differ by well over a pixel, so this
/// tolerance cannot mask a control that actually changed the size.
pub const FONT_SIZE_TOLERANCE_PX: f64 = 0.05;

/// Wait for network quiescence.
///
/// WebDriver has no network-idle signal, so this polls until the document
/// reports `readyState == "complete"` *and* its resource-entry count has
/// stopped growing for one full `poll` interval. Exceeding `timeout` yields
/// [`ScenarioError::QuiescenceTimeout`].
pub async fn settle(
    client: &Client,
    timeout: Duration,
    poll: Duration,
) -> Result<(), ScenarioError> {
    let start = Instant::now();
    let mut last_resources = None;

    loop {
        let raw = client.execute(PAGE_ACTIVITY_SCRIPT, vec![]).await?;
        let ready = raw
            .get(0)
            .and_then(Json::as_str)
            .is_some_and(|state| state == "complete");
        let resources = raw.get(1).and_then(Json::as_u64);

        if ready && resources == last_resources {
            return Ok(());
        }
        last_resources = resources;

        if start.elapsed() > timeout {
            return Err(ScenarioError::QuiescenceTimeout {
                waited: start.elapsed(),
            });
        }
        tokio::time::sleep(poll).await;
    }
}

/// Wait until an element matching `locator` is present *and* displayed.
///
/// The timeout is supplied by the caller (ultimately the runner's
/// [`Timeouts`](crate::scenario::Timeouts)); nothing here bakes in its own
/// bound. Expiry surfaces as [`CmdError::WaitTimeout`].
pub async fn wait_visible(
    client: &Client,
    locator: Locator<'_>,
    timeout: Duration,
    poll: Duration,
) -> Result<Element, ScenarioError> {
    let start = Instant::now();
    let element = client
        .wait()
        .at_most(timeout)
        .every(poll)
        .for_element(locator)
        .await?;

    loop {
        if element.is_displayed().await? {
            return Ok(element);
        }
        if start.elapsed() > timeout {
            return Err(ScenarioError::Webdriver(CmdError::WaitTimeout));
        }
        tokio::time::sleep(poll).await;
    }
}

/// Measure the computed font size, in pixels, of the first element matching
/// the given CSS selector.
pub async fn computed_font_size(client: &Client, selector: &str) -> Result<f64, ScenarioError> {
    let raw = client
        .execute(FONT_SIZE_SCRIPT, vec![Json::String(selector.to_string())])
        .await?;
    let raw = raw.as_str().unwrap_or_default().to_string();
    parse_px(&raw).ok_or_else(|| {
        ScenarioError::Assertion(AssertionFailed {
            step: "computed font size",
            expected: format!("a pixel value for `{}`", selector),
            actual: format!("`{}`", raw),
        })
    })
}

/// True when two font sizes are equal within [`FONT_SIZE_TOLERANCE_PX`].
pub fn font_size_matches(a: f64, b: f64) -> bool {
    (a - b).abs() <= FONT_SIZE_TOLERANCE_PX
}

fn parse_px(raw: &str) -> Option<f64> {
    raw.trim().strip_suffix("px")?.parse().ok()
}

/// Parse a displayed statistic like `"6,996,186"` into an integer.
///
/// Grouping separators (commas, periods, regular and narrow no-break spaces)
/// are stripped; any other non-digit character rejects the input.
pub fn parse_grouped_count(text: &str) -> Option<u64> {
    let mut digits = String::new();
    for c in text.trim().chars() {
        match c {
            '0'..='9' => digits.push(c),
            ',' | '.' | ' ' | '\u{00a0}' | '\u{202f}' => {}
            _ => return None,
        }
    }
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_count_strips_commas() {
        assert_eq!(parse_grouped_count("6,996,186"), Some(6_996_186));
    }

    #[test]
    fn grouped_count_accepts_other_separators() {
        assert_eq!(parse_grouped_count("6.996.186"), Some(6_996_186));
        assert_eq!(parse_grouped_count("6 996 186"), Some(6_996_186));
        assert_eq!(parse_grouped_count("6\u{202f}996\u{202f}186"), Some(6_996_186));
        assert_eq!(parse_grouped_count(" 42 "), Some(42));
    }

    #[test]
    fn grouped_count_rejects_garbage() {
        assert_eq!(parse_grouped_count(""), None);
        assert_eq!(parse_grouped_count(", ,"), None);
        assert_eq!(parse_grouped_count("about 7 million"), None);
    }

    #[test]
    fn pixel_values_parse() {
        assert_eq!(parse_px("14px"), Some(14.0));
        assert_eq!(parse_px("15.4px"), Some(15.4));
        assert_eq!(parse_px("14"), None);
        assert_eq!(parse_px("large"), None);
    }

    #[test]
    fn tolerant_equality_is_tight() {
        assert!(font_size_matches(14.0, 14.0));
        assert!(font_size_matches(14.0, 14.04));
        assert!(!font_size_matches(14.0, 14.2));
        // the gap between adjacent size presets is far larger than the tolerance
        assert!(!font_size_matches(14.0, 12.6));
    }
}
