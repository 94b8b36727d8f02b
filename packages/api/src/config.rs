//! Server configuration: defaults, then `tipme.toml`, then environment variables.

use std::time::Duration;

use anyhow::{ensure, Context};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Minimum length of `session.secret`; the cookie signing key is derived from it.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Deserialize)]
pub struct Backend {
    pub url: String,
    /// Per-request timeout in seconds; 0 disables it.
    pub timeout: u64,
}

impl Backend {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".into(),
            timeout: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Session {
    pub secret: String,
    /// Mark the session cookie `Secure` (HTTPS only).
    pub secure: bool,
    /// Days of inactivity before the session expires.
    pub ttl: u64,
}

impl Session {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(60 * 60 * 24 * self.ttl)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            secret: String::new(),
            secure: false,
            ttl: 7,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    pub backend: Backend,
    pub session: Session,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("backend.url", "http://localhost:3000")?
            .set_default("backend.timeout", 30)?
            .set_default("session.secret", "")?
            .set_default("session.secure", false)?
            .set_default("session.ttl", 7)?
            .add_source(
                File::with_name("tipme.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().separator("_").try_parsing(true))
            .build()?;

        config.try_deserialize()
    }

    /// Load `.env`, build the settings and check the values the server cannot run without.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Self::new().context("invalid configuration")?;
        ensure!(
            settings.session.secret.len() >= MIN_SECRET_LEN,
            "SESSION_SECRET must be at least {} bytes long",
            MIN_SECRET_LEN
        );
        ensure!(settings.session.ttl > 0, "SESSION_TTL must be at least one day");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::set_var;

    #[test]
    fn test_settings() {
        set_var("BACKEND_URL", "https://api.tipme.test");
        set_var("BACKEND_TIMEOUT", "0");
        set_var("SESSION_TTL", "14");
        let settings = Settings::new().unwrap_or_default();
        println!("Settings = {:?}", settings);
        assert_eq!(settings.backend.url, "https://api.tipme.test");
        assert_eq!(settings.backend.timeout(), None);
        assert_eq!(settings.session.ttl(), Duration::from_secs(14 * 24 * 60 * 60));
        assert!(!settings.session.secure);
    }

    #[test]
    fn test_defaults() {
        let backend = Backend::default();
        assert_eq!(backend.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(Session::default().ttl(), Duration::from_secs(7 * 24 * 60 * 60));
    }
}
