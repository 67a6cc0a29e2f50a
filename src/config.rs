//! Process configuration, read once from the environment (and `.env`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::transport::rest::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_MENU_DATA_PATH: &str = "menu-data.json";
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    fn from_flag(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("development") => Self::Development,
            _ => Self::Production,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub upstream_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub menu_data_path: PathBuf,
    pub static_dir: PathBuf,
    pub environment: Environment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            upstream_timeout: DEFAULT_TIMEOUT,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            menu_data_path: PathBuf::from(DEFAULT_MENU_DATA_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            environment: Environment::default(),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when a variable is set but malformed.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    /// Returns [`Error::Config`] when a variable is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got {raw:?}")))?,
            None => defaults.port,
        };

        let upstream_timeout = match non_empty("OPENAI_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| Error::Config(format!("OPENAI_TIMEOUT_SECS must be whole seconds, got {raw:?}")))?,
            None => defaults.upstream_timeout,
        };

        let openai_base_url = non_empty("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url);
        url::Url::parse(&openai_base_url)?;

        Ok(Self {
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_base_url,
            upstream_timeout,
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            menu_data_path: non_empty("MENU_DATA_PATH").map_or(defaults.menu_data_path, PathBuf::from),
            static_dir: non_empty("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            environment: Environment::from_flag(lookup("APP_ENV").as_deref()),
        })
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_menu_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.menu_data_path = path.into();
        self
    }

    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    #[must_use]
    pub const fn openai_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// # Errors
    /// Returns [`Error::Config`] if `host:port` is not a socket address.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| Error::Config(format!("cannot listen on {}:{}", self.host, self.port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert!(!config.openai_configured());
        assert!(!config.is_development());
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
        assert_eq!(config.listen_addr().unwrap().port(), 3000);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "8081"),
            ("HOST", "127.0.0.1"),
            ("APP_ENV", "Development"),
            ("OPENAI_TIMEOUT_SECS", "5"),
            ("MENU_DATA_PATH", "/srv/menu.json"),
        ]))
        .unwrap();
        assert!(config.openai_configured());
        assert!(config.is_development());
        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:8081");
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
        assert_eq!(config.menu_data_path, PathBuf::from("/srv/menu.json"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert!(!config.openai_configured());
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("OPENAI_BASE_URL", "::nope")])),
            Err(Error::Url(_))
        ));
    }
}
