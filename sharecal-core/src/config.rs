//! Global sharecal configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ShareCalError, ShareCalResult};

static DEFAULT_SHARE_BASE_URL: &str = "http://localhost:8000/";

fn default_share_base_url() -> String {
    DEFAULT_SHARE_BASE_URL.to_string()
}

fn is_default_share_base_url(s: &String) -> bool {
    s == DEFAULT_SHARE_BASE_URL
}

/// Global configuration at ~/.config/sharecal/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SharecalConfig {
    /// Where the event list is stored. Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Page that share links point at
    #[serde(
        default = "default_share_base_url",
        skip_serializing_if = "is_default_share_base_url"
    )]
    pub share_base_url: String,

    /// IANA zone name used for dates and times. Defaults to the system zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for SharecalConfig {
    fn default() -> Self {
        SharecalConfig {
            data_dir: None,
            share_base_url: default_share_base_url(),
            timezone: None,
        }
    }
}

impl SharecalConfig {
    pub fn config_path() -> ShareCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ShareCalError::Config("Could not determine config directory".into()))?
            .join("sharecal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/sharecal/config.toml, creating a commented default on first run
    pub fn load() -> ShareCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ShareCalResult<Self> {
        let config: SharecalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| ShareCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ShareCalError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Save to `path`, omitting values that are still at their defaults
    pub fn save_to(&self, path: &Path) -> ShareCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ShareCalError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| ShareCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Data directory with `~` expanded
    pub fn data_path(&self) -> ShareCalResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => {
                let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
                Ok(PathBuf::from(expanded))
            }
            None => dirs::data_dir()
                .map(|d| d.join("sharecal"))
                .ok_or_else(|| ShareCalError::Config("Could not determine data directory".into())),
        }
    }

    pub fn share_base_url(&self) -> ShareCalResult<Url> {
        Url::parse(&self.share_base_url).map_err(|e| {
            ShareCalError::Config(format!(
                "Invalid share_base_url '{}': {e}",
                self.share_base_url
            ))
        })
    }

    /// Configured zone, if any. Unknown names are a configuration error.
    pub fn timezone(&self) -> ShareCalResult<Option<chrono_tz::Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<chrono_tz::Tz>()
                    .map_err(|_| ShareCalError::Config(format!("Unknown timezone '{}'", name)))
            })
            .transpose()
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ShareCalResult<()> {
        let contents = format!(
            "\
# sharecal configuration

# Where your events are stored:
# data_dir = \"~/.local/share/sharecal\"

# Page that share links point at:
# share_base_url = \"{}\"

# Timezone for dates and times (defaults to the system timezone):
# timezone = \"Europe/Berlin\"
",
            DEFAULT_SHARE_BASE_URL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ShareCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ShareCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
