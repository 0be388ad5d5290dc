//! Runtime configuration, loadable from a TOML file.
//!
//! Every field has a default so partial files (or no file at all) work.

use super::constants::*;
use super::errors::GameResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Combat tuning knobs used by the turn resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Fraction of target defense subtracted from a basic attack.
    pub defense_reduction: f64,
    /// Fraction of target defense subtracted from a damaging skill.
    pub skill_defense_reduction: f64,
    pub jitter_min: f64,
    pub jitter_max: f64,
    pub flee_chance: f64,
    /// Player dodge chance per point of AGI.
    pub player_dodge_per_agi: f64,
    /// Chance an evasive monster forfeits its attack.
    pub evasive_skip_chance: f64,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            defense_reduction: DEFENSE_REDUCTION,
            skill_defense_reduction: SKILL_DEFENSE_REDUCTION,
            jitter_min: DAMAGE_JITTER_MIN,
            jitter_max: DAMAGE_JITTER_MAX,
            flee_chance: FLEE_CHANCE,
            player_dodge_per_agi: PLAYER_DODGE_PER_AGI,
            evasive_skip_chance: EVASIVE_SKIP_CHANCE,
        }
    }
}

impl CombatTuning {
    /// Tuning with damage jitter pinned to 1.0.
    pub fn without_jitter() -> Self {
        Self {
            jitter_min: 1.0,
            jitter_max: 1.0,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding one JSON record per player.
    pub save_dir: PathBuf,
    pub daily_battle_quota: u32,
    pub inventory_capacity: usize,
    pub confirm_timeout_secs: i64,
    pub starting_stat_points: u32,
    pub level_up_stat_points: u32,
    pub combat: CombatTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            daily_battle_quota: DAILY_BATTLE_QUOTA,
            inventory_capacity: INVENTORY_CAPACITY,
            confirm_timeout_secs: CONFIRM_TIMEOUT_SECONDS,
            starting_stat_points: STARTING_STAT_POINTS,
            level_up_stat_points: LEVEL_UP_STAT_POINTS,
            combat: CombatTuning::default(),
        }
    }
}

impl GameConfig {
    /// Loads a config file, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml_str(text: &str) -> GameResult<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// `~/.battlebot/saves`, or `./saves` when no home directory is known.
pub fn default_save_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".battlebot").join("saves"))
        .unwrap_or_else(|| PathBuf::from("saves"))
}
