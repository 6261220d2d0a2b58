use fantoccini::error::{CmdError, NewSessionError};
use std::error::Error;
use std::fmt;
use std::io::Error as IOError;
use std::time::Duration;
use url::ParseError;

/// A required configuration value was missing or unusable.
///
/// Configuration errors are always fatal and never retried: a scenario whose
/// environment is incomplete must fail before any navigation happens.
#[derive(Debug)]
pub enum ConfigError {
    /// The named environment variable is not set.
    MissingVar(String),

    /// The named environment variable is set, but its value could not be used.
    InvalidVar {
        /// Name of the offending variable.
        name: String,
        /// What was wrong with it.
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigError::MissingVar(ref name) => {
                write!(f, "required environment variable `{}` is not set", name)
            }
            ConfigError::InvalidVar {
                ref name,
                ref message,
            } => {
                write!(f, "environment variable `{}` is invalid: {}", name, message)
            }
        }
    }
}

impl Error for ConfigError {}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::InvalidVar {
            name: "TARGET_URL".to_string(),
            message: e.to_string(),
        }
    }
}

/// The login flow completed, but the post-login marker never appeared.
///
/// Raised by the login scenario when, after submitting the form and waiting
/// for the page to settle, no visible link carrying the account name can be
/// found. Fatal for the login scenario and for every scenario depending on
/// its session artifact.
#[derive(Debug)]
pub struct AuthError {
    /// The account name that was expected to appear after login.
    pub username: String,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "login failed: no account link for `{}` appeared after submitting \
             the form; check the configured username and password",
            self.username
        )
    }
}

impl Error for AuthError {}

/// An expected UI state did not hold.
///
/// Carries the step name and the expected-vs-actual values so that the
/// knowingly time-sensitive checks (latest-revision author, article count,
/// font sizes) can be diagnosed from the failure report alone.
#[derive(Debug)]
pub struct AssertionFailed {
    /// Which scenario step was being verified.
    pub step: &'static str,

    /// The value the step expected.
    pub expected: String,

    /// The value the live page actually produced.
    pub actual: String,
}

impl fmt::Display for AssertionFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assertion failed at `{}`: expected {}, got {}",
            self.step, self.expected, self.actual
        )
    }
}

impl Error for AssertionFailed {}

/// An error occurred while executing a scenario.
///
/// Every scenario returns this; the runner surfaces it verbatim in its
/// report. Nothing in this crate logs-and-continues past one of these.
#[derive(Debug)]
pub enum ScenarioError {
    /// A required configuration value was missing or invalid.
    Config(ConfigError),

    /// The login flow did not produce an authenticated session.
    Auth(AuthError),

    /// An expected UI state did not hold.
    Assertion(AssertionFailed),

    /// The page did not reach network quiescence within the allotted time.
    QuiescenceTimeout {
        /// How long the settle loop waited before giving up.
        waited: Duration,
    },

    /// The WebDriver layer reported an error.
    ///
    /// Bounded element waits that expire surface here as
    /// [`CmdError::WaitTimeout`].
    Webdriver(CmdError),

    /// A WebDriver session could not be established.
    Session(NewSessionError),

    /// Reading or writing the session artifact failed.
    Io(IOError),

    /// The session artifact could not be encoded or decoded.
    Json(serde_json::Error),
}

impl ScenarioError {
    /// Returns true if the runner's single global retry may re-attempt the
    /// scenario after this error.
    ///
    /// Configuration and authentication failures are deterministic and are
    /// never retried; everything else (wait timeouts, lost connections,
    /// assertion drift on the live site) gets the one uniform re-attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ScenarioError::Config(..) | ScenarioError::Auth(..))
    }

    /// Returns true if this error is a wait that ran out of time, either the
    /// quiescence settle loop or an element-appearance wait.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ScenarioError::QuiescenceTimeout { .. }
                | ScenarioError::Webdriver(CmdError::WaitTimeout)
        )
    }
}

impl Error for ScenarioError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ScenarioError::Config(ref e) => Some(e),
            ScenarioError::Auth(ref e) => Some(e),
            ScenarioError::Assertion(ref e) => Some(e),
            ScenarioError::QuiescenceTimeout { .. } => None,
            ScenarioError::Webdriver(ref e) => Some(e),
            ScenarioError::Session(ref e) => Some(e),
            ScenarioError::Io(ref e) => Some(e),
            ScenarioError::Json(ref e) => Some(e),
        }
    }
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ScenarioError::Config(ref e) => write!(f, "configuration error: {}", e),
            ScenarioError::Auth(ref e) => write!(f, "authentication error: {}", e),
            ScenarioError::Assertion(ref e) => write!(f, "{}", e),
            ScenarioError::QuiescenceTimeout { waited } => {
                write!(
                    f,
                    "page did not reach network quiescence within {:?}",
                    waited
                )
            }
            ScenarioError::Webdriver(ref e) => write!(f, "webdriver command failed: {}", e),
            ScenarioError::Session(ref e) => write!(f, "could not establish session: {}", e),
            ScenarioError::Io(ref e) => write!(f, "session artifact i/o failed: {}", e),
            ScenarioError::Json(ref e) => write!(f, "session artifact encoding failed: {}", e),
        }
    }
}

impl From<ConfigError> for ScenarioError {
    fn from(e: ConfigError) -> Self {
        ScenarioError::Config(e)
    }
}

impl From<AuthError> for ScenarioError {
    fn from(e: AuthError) -> Self {
        ScenarioError::Auth(e)
    }
}

impl From<AssertionFailed> for ScenarioError {
    fn from(e: AssertionFailed) -> Self {
        ScenarioError::Assertion(e)
    }
}

impl From<CmdError> for ScenarioError {
    fn from(e: CmdError) -> Self {
        ScenarioError::Webdriver(e)
    }
}

impl From<NewSessionError> for ScenarioError {
    fn from(e: NewSessionError) -> Self {
        ScenarioError::Session(e)
    }
}

impl From<IOError> for ScenarioError {
    fn from(e: IOError) -> Self {
        ScenarioError::Io(e)
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(e: serde_json::Error) -> Self {
        ScenarioError::Json(e)
    }
}
