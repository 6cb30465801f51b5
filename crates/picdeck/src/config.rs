use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::presenter::{MAX_INTERVAL_MS, MIN_INTERVAL_MS};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "picdeck";

pub const VALID_KEYS: &str = "defaults.theme, defaults.interval_ms, defaults.autoplay, defaults.demo_dir, defaults.title";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u32>,

    /// Start playing as soon as slides are loaded at launch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `picdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the config at `path`. A missing file yields the defaults; a
    /// file that cannot be read or parsed is an error.
    pub fn load_or_new(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    pub fn load_or_default() -> Self {
        match Self::path().and_then(|path| Self::load_or_new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config, using defaults: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# PicDeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn theme(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("dark")
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.defaults.as_ref().and_then(|d| d.interval_ms)
    }

    pub fn autoplay(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.autoplay)
            .unwrap_or(false)
    }

    pub fn demo_dir(&self) -> Option<&Path> {
        self.defaults.as_ref().and_then(|d| d.demo_dir.as_deref())
    }

    pub fn title(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.title.as_deref())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults_mut().theme = Some(value.to_string());
            }
            "defaults.interval_ms" => {
                let ms: u32 = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid interval_ms: {value}. Must be a number of milliseconds.")
                })?;
                if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&ms) {
                    anyhow::bail!(
                        "Invalid interval_ms: {value}. Must be between {MIN_INTERVAL_MS} and {MAX_INTERVAL_MS}."
                    );
                }
                self.defaults_mut().interval_ms = Some(ms);
            }
            "defaults.autoplay" => {
                let autoplay = match value {
                    "true" => true,
                    "false" => false,
                    _ => anyhow::bail!("Invalid autoplay: {value}. Must be 'true' or 'false'."),
                };
                self.defaults_mut().autoplay = Some(autoplay);
            }
            "defaults.demo_dir" => {
                if value.is_empty() {
                    anyhow::bail!("Invalid demo_dir: must not be empty.");
                }
                self.defaults_mut().demo_dir = Some(PathBuf::from(value));
            }
            "defaults.title" => {
                self.defaults_mut().title = Some(value.to_string());
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }

    fn defaults_mut(&mut self) -> &mut DefaultsConfig {
        self.defaults.get_or_insert_with(DefaultsConfig::default)
    }
}
