//! TOML-based planner configuration.
//!
//! Stores the children roster and gamification tuning knobs at
//! `~/.config/schoolroom/config.toml`. The roster is configuration rather
//! than planner state: snapshots only carry per-child progression, matched
//! back onto the roster by id at load time.
//!
//! Child ids are assigned from roster position ("1", "2", ...) so they stay
//! stable across runs and match the progression records in old snapshots.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::plan::Child;
use crate::progression;

/// One child on the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildConfig {
    pub name: String,
    #[serde(default)]
    pub grade: u8,
    /// Display emoji/icon.
    #[serde(default)]
    pub avatar: String,
    /// Free-form learning track label.
    #[serde(default)]
    pub track: String,
}

/// Gamification tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationConfig {
    /// XP awarded per completed lesson.
    #[serde(default = "default_base_xp")]
    pub base_xp: u32,
    /// Extra XP per award while a streak is running.
    #[serde(default = "default_streak_bonus")]
    pub streak_bonus_xp: u32,
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            base_xp: default_base_xp(),
            streak_bonus_xp: default_streak_bonus(),
        }
    }
}

/// Planner configuration.
///
/// Serialized to/from TOML at `~/.config/schoolroom/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_children")]
    pub children: Vec<ChildConfig>,
    #[serde(default)]
    pub gamification: GamificationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            children: default_children(),
            gamification: GamificationConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    /// Load from a specific path, writing defaults when no file exists.
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Save to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// Default config file path.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/schoolroom"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Build the children roster, ids assigned from roster position.
    pub fn roster(&self) -> Vec<Child> {
        self.children
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let mut child = Child::new((i + 1).to_string(), c.name.clone(), c.grade);
                child.avatar = c.avatar.clone();
                child.track = c.track.clone();
                child
            })
            .collect()
    }
}

fn default_base_xp() -> u32 {
    progression::BASE_XP
}

fn default_streak_bonus() -> u32 {
    progression::STREAK_BONUS_XP
}

fn default_children() -> Vec<ChildConfig> {
    vec![
        ChildConfig {
            name: "Prentiss".to_string(),
            grade: 4,
            avatar: "🧑‍💻".to_string(),
            track: "Game Design".to_string(),
        },
        ChildConfig {
            name: "Faye".to_string(),
            grade: 6,
            avatar: "🎭".to_string(),
            track: "Performance Arts".to_string(),
        },
    ]
}
