use std::time::Duration;

use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

/// Overrides `api.session_cookie` when set.
pub static SESSION_COOKIE_ENV: &str = "WRENCHPREP_SESSION_COOKIE";

mod config_dir;
pub use config_dir::{find_config_file, read_config, read_config_from};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    api: Api,
    #[serde(default)]
    notify: Notify,
    #[serde(default)]
    streak: Streak,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    base_url: String,
    #[serde(default)]
    session_cookie: Option<String>,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Notify {
    #[serde(default = "default_presentation_delay_ms")]
    presentation_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Streak {
    #[serde(default = "default_validate_interval_hours")]
    validate_interval_hours: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_presentation_delay_ms() -> u64 {
    1500
}

fn default_validate_interval_hours() -> u64 {
    24
}

impl Default for Notify {
    fn default() -> Self {
        Self {
            presentation_delay_ms: default_presentation_delay_ms(),
        }
    }
}

impl Default for Streak {
    fn default() -> Self {
        Self {
            validate_interval_hours: default_validate_interval_hours(),
        }
    }
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                match Self::load(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if !matches!(e, error::ConfigError::ConfigNotFound) {
                            crate::error::log_error(&e);
                        }
                        tracing::error!("Config not found or invalid.");
                        std::process::exit(1);
                    }
                }
            })
            .await
    }

    /// Reads, parses and validates the configuration file, then applies
    /// environment overrides.
    pub fn load(use_local: bool) -> ConfigResult<Self> {
        let bytes = read_config(use_local)?;
        let mut config = Self::from_slice(&bytes)?;

        if let Ok(cookie) = std::env::var(SESSION_COOKIE_ENV) {
            config.api.session_cookie = Some(cookie);
        }

        Ok(config)
    }

    pub fn from_slice(bytes: &[u8]) -> ConfigResult<Self> {
        let config: Self = toml::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if let Err(e) = url::Url::parse(&self.api.base_url) {
            return Err(ConfigError::Invalid {
                key: "api.base_url",
                reason: e.to_string(),
            });
        }

        if self.streak.validate_interval_hours == 0 {
            return Err(ConfigError::Invalid {
                key: "streak.validate_interval_hours",
                reason: String::from("must be at least 1"),
            });
        }

        Ok(())
    }

    #[inline]
    pub fn api(&self) -> &Api {
        &self.api
    }

    #[inline]
    pub fn notify(&self) -> &Notify {
        &self.notify
    }

    #[inline]
    pub fn streak(&self) -> &Streak {
        &self.streak
    }
}

impl Api {
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[inline]
    pub fn session_cookie(&self) -> Option<&str> {
        self.session_cookie.as_deref()
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Notify {
    #[inline]
    pub fn presentation_delay(&self) -> Duration {
        Duration::from_millis(self.presentation_delay_ms)
    }
}

impl Streak {
    #[inline]
    pub fn validate_interval(&self) -> Duration {
        Duration::from_secs(self.validate_interval_hours * 60 * 60)
    }
}
