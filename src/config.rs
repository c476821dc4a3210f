// Run configuration, read from the process environment once in `main`
// and passed down explicitly from there.

use std::time::Duration;

use crate::error::{Error, Result};

/// Credential for the create endpoint.
pub const AUTH_ENV: &str = "SMOKESHOW_AUTH";
/// Optional override of the create endpoint, e.g. a local dev server.
pub const CREATE_URL_ENV: &str = "SMOKESHOW_CREATE_URL";
pub const DEFAULT_CREATE_URL: &str = "https://smokeshow.samuelcolvin.workers.dev/create/";
/// Applies to every request, site creation and uploads alike.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings needed to talk to the hosting service.
#[derive(Debug, Clone)]
pub struct Config {
    pub auth: String,
    pub create_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Build a config with the default timeout.
    pub fn new(auth: impl Into<String>, create_url: impl Into<String>) -> Self {
        Config {
            auth: auth.into(),
            create_url: create_url.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Read `SMOKESHOW_AUTH` (required) and `SMOKESHOW_CREATE_URL`
    /// (falls back to the public service).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let auth = lookup(AUTH_ENV).ok_or(Error::MissingEnv(AUTH_ENV))?;
        let create_url = lookup(CREATE_URL_ENV).unwrap_or_else(|| DEFAULT_CREATE_URL.into());
        Ok(Config::new(auth, create_url))
    }
}
