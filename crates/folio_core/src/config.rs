//! Process-wide site configuration.
//!
//! # Responsibility
//! - Hold theme, guestbook and ambient-layer settings for the page.
//! - Initialize once at startup; every later reader sees the same value.
//!
//! # Invariants
//! - `init_site_config` is idempotent for an identical value.
//! - A conflicting second initialization is rejected, never applied.

use crate::guestbook::store::STORAGE_KEY;
use crate::particles::backdrop::BackdropConfig;
use crate::particles::field::FieldConfig;
use crate::particles::orbs::OrbConfig;
use log::info;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static SITE_CONFIG: OnceCell<SiteConfig> = OnceCell::new();

/// Color theme applied to the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Class to add on the root element, if any.
    pub fn root_class(self) -> Option<&'static str> {
        match self {
            Self::Dark => Some("dark"),
            Self::Light => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestbookConfig {
    /// Key of the storage slot holding the message array.
    pub storage_key: String,
}

impl Default for GuestbookConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

/// Everything the page needs to know before mounting components.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub theme: Theme,
    pub guestbook: GuestbookConfig,
    pub particles: FieldConfig,
    pub orbs: OrbConfig,
    pub backdrop: BackdropConfig,
}

impl SiteConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    /// A different config is already active.
    Conflict,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid site config: {message}"),
            Self::Conflict => write!(
                f,
                "site config already initialized with different values; refusing to switch"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Installs `config` as the process-wide site configuration.
pub fn init_site_config(config: SiteConfig) -> Result<&'static SiteConfig, ConfigError> {
    let mut installed = false;
    let active = SITE_CONFIG.get_or_init(|| {
        installed = true;
        config.clone()
    });

    if *active != config {
        return Err(ConfigError::Conflict);
    }
    if installed {
        info!(
            "event=config_init module=config status=ok theme={:?} particles={} orbs={}",
            active.theme, active.particles.count, active.orbs.count
        );
    }
    Ok(active)
}

/// Active site configuration, or defaults when none was installed.
pub fn site_config() -> SiteConfig {
    SITE_CONFIG.get().cloned().unwrap_or_default()
}
