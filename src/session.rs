//! The persisted session artifact.
//!
//! A [`SessionState`] is an opaque-to-callers snapshot of the browser's
//! session: its cookies plus the target origin's `localStorage` entries. The
//! login scenario captures and persists one on success; the runner restores
//! it into a fresh client before every dependent scenario, so each scenario
//! starts authenticated without repeating the login flow.
//!
//! The artifact is keyed by nothing but its file path. Writes overwrite,
//! never merge. No expiry is tracked here; a stale artifact only shows up as
//! assertion failures in the scenarios that consume it.

use crate::error::ScenarioError;
use fantoccini::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use time::OffsetDateTime;

const CAPTURE_STORAGE_SCRIPT: &str = "\
    let entries = {};\
    for (let i = 0; i < window.localStorage.length; i++) {\
        const key = window.localStorage.key(i);\
        entries[key] = window.localStorage.getItem(key);\
    }\
    return entries;";

const RESTORE_STORAGE_SCRIPT: &str = "\
    const entries = arguments[0];\
    for (const key of Object.keys(entries)) {\
        window.localStorage.setItem(key, entries[key]);\
    }";

/// One browser cookie in the shape WebDriver serializes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    /// Cookie name.
    pub name: String,

    /// Cookie value.
    pub value: String,

    /// Path scope, if the browser reported one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<String>,

    /// Domain scope, if the browser reported one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub domain: Option<String>,

    /// Secure flag.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub secure: Option<bool>,

    /// HttpOnly flag.
    #[serde(rename = "httpOnly", skip_serializing_if = "Option::is_none", default)]
    pub http_only: Option<bool>,

    /// Expiry as unix seconds; absent for session cookies.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expiry: Option<i64>,
}

impl StoredCookie {
    /// Snapshot a live `cookie::Cookie` into its serializable form.
    pub fn from_cookie(cookie: &cookie::Cookie<'_>) -> Self {
        StoredCookie {
            name: cookie.name().to_string(),
            value: cookie.value().to_string(),
            path: cookie.path().map(String::from),
            domain: cookie.domain().map(String::from),
            secure: cookie.secure(),
            http_only: cookie.http_only(),
            expiry: cookie.expires_datetime().map(|t| t.unix_timestamp()),
        }
    }

    /// Rebuild the `cookie::Cookie` this snapshot was taken from.
    pub fn to_cookie(&self) -> cookie::Cookie<'static> {
        let mut cookie = cookie::Cookie::new(self.name.clone(), self.value.clone());
        if let Some(ref path) = self.path {
            cookie.set_path(path.clone());
        }
        if let Some(ref domain) = self.domain {
            cookie.set_domain(domain.clone());
        }
        if let Some(secure) = self.secure {
            cookie.set_secure(secure);
        }
        if let Some(http_only) = self.http_only {
            cookie.set_http_only(http_only);
        }
        if let Some(expiry) = self.expiry {
            if let Ok(expiry) = OffsetDateTime::from_unix_timestamp(expiry) {
                cookie.set_expires(expiry);
            }
        }
        cookie
    }
}

/// Serialized browser session state: cookies plus `localStorage` entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// All cookies visible to the current document at capture time.
    pub cookies: Vec<StoredCookie>,

    /// The current origin's `localStorage` entries at capture time.
    #[serde(default)]
    pub local_storage: BTreeMap<String, String>,
}

impl SessionState {
    /// Snapshot the client's current session.
    ///
    /// The client must be on the target origin, since `localStorage` is
    /// origin-scoped.
    pub async fn capture(client: &Client) -> Result<Self, ScenarioError> {
        let mut cookies = Vec::new();
        for cookie in client.get_all_cookies().await? {
            cookies.push(StoredCookie::from_cookie(&cookie));
        }

        let raw = client.execute(CAPTURE_STORAGE_SCRIPT, vec![]).await?;
        let mut local_storage = BTreeMap::new();
        if let Some(entries) = raw.as_object() {
            for (key, value) in entries {
                if let Some(value) = value.as_str() {
                    local_storage.insert(key.clone(), value.to_string());
                }
            }
        }

        Ok(SessionState {
            cookies,
            local_storage,
        })
    }

    /// Replay this session into the given client.
    ///
    /// The client must already have navigated to the target origin; cookies
    /// and storage are installed there and the page is then refreshed so that
    /// it observes the authenticated state.
    pub async fn restore(&self, client: &Client) -> Result<(), ScenarioError> {
        for cookie in &self.cookies {
            client.add_cookie(cookie.to_cookie()).await?;
        }
        if !self.local_storage.is_empty() {
            let entries = serde_json::to_value(&self.local_storage)?;
            client
                .execute(RESTORE_STORAGE_SCRIPT, vec![entries])
                .await?;
        }
        client.refresh().await?;
        Ok(())
    }

    /// Persist to `path` as JSON, replacing any previous artifact wholesale.
    pub fn save(&self, path: &Path) -> Result<(), ScenarioError> {
        let encoded = serde_json::to_vec_pretty(self)?;
        fs::write(path, encoded)?;
        Ok(())
    }

    /// Load a previously persisted artifact.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = fs::read(path)?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// True when the snapshot holds neither cookies nor storage entries.
    ///
    /// A successful login that captures an empty state indicates the capture
    /// happened on the wrong origin; callers must not persist it.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty() && self.local_storage.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_snapshot_round_trips() {
        let mut cookie = cookie::Cookie::new("centralauth_Session", "deadbeef");
        cookie.set_path("/");
        cookie.set_domain(".wikipedia.org");
        cookie.set_secure(true);
        cookie.set_http_only(true);
        cookie.set_expires(OffsetDateTime::from_unix_timestamp(1_735_689_600).unwrap());

        let stored = StoredCookie::from_cookie(&cookie);
        assert_eq!(stored.expiry, Some(1_735_689_600));
        assert_eq!(StoredCookie::from_cookie(&stored.to_cookie()), stored);
    }

    #[test]
    fn session_cookie_has_no_expiry() {
        let cookie = cookie::Cookie::new("enwikiSession", "abc123");
        let stored = StoredCookie::from_cookie(&cookie);
        assert_eq!(stored.expiry, None);
        let json = serde_json::to_value(&stored).unwrap();
        assert!(json.get("expiry").is_none());
        assert!(json.get("httpOnly").is_none());
    }

    #[test]
    fn artifact_uses_webdriver_field_names() {
        let stored = StoredCookie {
            name: "n".to_string(),
            value: "v".to_string(),
            path: Some("/".to_string()),
            domain: None,
            secure: Some(false),
            http_only: Some(true),
            expiry: None,
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["name"], "n");
        assert_eq!(json["value"], "v");
        assert_eq!(json["path"], "/");
        assert_eq!(json["secure"], false);
        assert_eq!(json["httpOnly"], true);
        assert!(json.get("domain").is_none());
        assert!(json.get("expiry").is_none());
    }

    #[test]
    fn empty_state_is_detected() {
        let mut state = SessionState::default();
        assert!(state.is_empty());
        state.local_storage.insert("k".to_string(), "v".to_string());
        assert!(!state.is_empty());
    }
}
