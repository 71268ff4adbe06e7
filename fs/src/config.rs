//! Configuration for the fs binary

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::driver::LoopConfig;
use crate::scheduler::SchedulerConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub frame_loop: LoopConfig,

    /// Timers registered by `fs run`
    #[serde(default = "default_timers")]
    pub timers: Vec<TimerSpec>,
}

/// One configured timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSpec {
    pub name: String,

    /// Seconds before the first call
    #[serde(default)]
    pub delay: f64,

    /// Seconds between calls; 0 means every tick when repeating
    #[serde(default)]
    pub interval: f64,

    #[serde(default)]
    pub repeat: bool,

    #[serde(default)]
    pub soft: bool,
}

impl TimerSpec {
    pub fn once(name: impl Into<String>, delay: f64) -> Self {
        Self {
            name: name.into(),
            delay,
            interval: 0.0,
            repeat: false,
            soft: false,
        }
    }

    pub fn interval(name: impl Into<String>, interval: f64, delay: f64, soft: bool) -> Self {
        Self {
            name: name.into(),
            delay,
            interval,
            repeat: true,
            soft,
        }
    }
}

fn default_timers() -> Vec<TimerSpec> {
    vec![
        TimerSpec::interval("heartbeat", 1.0, 1.0, false),
        TimerSpec::interval("ai-think-a", 0.5, 0.5, true),
        TimerSpec::interval("ai-think-b", 0.5, 0.5, true),
        TimerSpec::interval("ai-think-c", 0.5, 0.5, true),
        TimerSpec::once("autosave", 3.0),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: None,
            scheduler: SchedulerConfig::default(),
            frame_loop: LoopConfig::default(),
            timers: default_timers(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        debug!(?path, "Config::load: called");
        if let Some(config_path) = path {
            return Self::load_from(config_path);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("framesched").join("framesched.yml")),
            Some(PathBuf::from("framesched.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Config::load: found default config");
                return Self::load_from(path);
            }
        }

        debug!("Config::load: no config file, using defaults");
        Ok(Config::default())
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
