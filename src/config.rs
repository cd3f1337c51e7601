//! Session configuration
//!
//! The read-only bundle the progression/shop layer hands the core at the start
//! of a run. The core never writes it back.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{HEAD_START_LENGTH, INITIAL_SNAKE_LENGTH, MAX_LEVEL, SCORE_BOOSTER_TICKS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read session config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid session config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("upgrade {kind:?} at level {level} exceeds max level {max}")]
    UpgradeOutOfRange {
        kind: UpgradeType,
        level: u8,
        max: u8,
    },
    #[error("level {level} is outside 1..={max}")]
    LevelOutOfRange { level: u32, max: u32 },
}

/// Permanent upgrades bought in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeType {
    /// Pickup range
    Magnet,
    /// Bonus score per pickup
    Greed,
    /// Reduced damage from traps and walls
    IronScale,
    /// Gold spawns more often
    LuckyFind,
    /// Power-ups last longer
    ExtendedPower,
}

impl UpgradeType {
    pub const ALL: [UpgradeType; 5] = [
        UpgradeType::Magnet,
        UpgradeType::Greed,
        UpgradeType::IronScale,
        UpgradeType::LuckyFind,
        UpgradeType::ExtendedPower,
    ];

    pub fn max_level(&self) -> u8 {
        match self {
            UpgradeType::Magnet => 5,
            UpgradeType::Greed => 5,
            UpgradeType::IronScale => 3,
            UpgradeType::LuckyFind => 3,
            UpgradeType::ExtendedPower => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeType::Magnet => "MAGNET",
            UpgradeType::Greed => "GREED",
            UpgradeType::IronScale => "IRON_SCALE",
            UpgradeType::LuckyFind => "LUCKY_FIND",
            UpgradeType::ExtendedPower => "EXTENDED_POWER",
        }
    }
}

/// Upgrade levels, one field per `UpgradeType`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeLevels {
    pub magnet: u8,
    pub greed: u8,
    pub iron_scale: u8,
    pub lucky_find: u8,
    pub extended_power: u8,
}

impl UpgradeLevels {
    pub fn level(&self, kind: UpgradeType) -> u8 {
        match kind {
            UpgradeType::Magnet => self.magnet,
            UpgradeType::Greed => self.greed,
            UpgradeType::IronScale => self.iron_scale,
            UpgradeType::LuckyFind => self.lucky_find,
            UpgradeType::ExtendedPower => self.extended_power,
        }
    }

    pub fn set(&mut self, kind: UpgradeType, level: u8) {
        let slot = match kind {
            UpgradeType::Magnet => &mut self.magnet,
            UpgradeType::Greed => &mut self.greed,
            UpgradeType::IronScale => &mut self.iron_scale,
            UpgradeType::LuckyFind => &mut self.lucky_find,
            UpgradeType::ExtendedPower => &mut self.extended_power,
        };
        *slot = level;
    }

    /// Flat score bonus per pickup
    pub fn greed_bonus(&self) -> f32 {
        self.greed as f32 * 0.5
    }

    /// Wall/trap damage after IRON_SCALE reduction (never below 1)
    pub fn armored(&self, damage: i32) -> i32 {
        (damage - self.iron_scale as i32 * crate::consts::ARMOR_PER_LEVEL).max(1)
    }

    /// Multiplier on power-up duration
    pub fn power_duration_factor(&self) -> f32 {
        1.0 + self.extended_power as f32 * 0.2
    }

    /// Chance that a spawned DIRT is upgraded to GOLD
    pub fn lucky_gold_chance(&self) -> f64 {
        (self.lucky_find as f64 * 0.1).min(1.0)
    }
}

/// Consumables applied once at session start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consumables {
    pub head_start: u32,
    pub score_booster: u32,
}

/// Everything the core needs from the progression/shop layer for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Starting level (1-based)
    pub level: u32,
    /// Scripted tutorial run
    pub tutorial: bool,
    /// Seed for every random roll in the run
    pub seed: u64,
    pub upgrades: UpgradeLevels,
    pub consumables: Consumables,
    /// Cosmetic skin id (render-only, ignored by the simulation)
    pub skin: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            level: 1,
            tutorial: false,
            seed: 0,
            upgrades: UpgradeLevels::default(),
            consumables: Consumables::default(),
            skin: "classic".to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a session bundle
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a session bundle from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded session config: level {}, tutorial {}",
            config.level,
            config.tutorial
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject upgrade levels the shop could never have sold
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_LEVEL).contains(&self.level) {
            log::warn!("Rejecting session level {}", self.level);
            return Err(ConfigError::LevelOutOfRange {
                level: self.level,
                max: MAX_LEVEL,
            });
        }
        for kind in UpgradeType::ALL {
            let level = self.upgrades.level(kind);
            if level > kind.max_level() {
                log::warn!("Rejecting {} at level {}", kind.as_str(), level);
                return Err(ConfigError::UpgradeOutOfRange {
                    kind,
                    level,
                    max: kind.max_level(),
                });
            }
        }
        Ok(())
    }

    /// Snake length at spawn (HEAD_START applies outside the tutorial)
    pub fn start_length(&self) -> usize {
        if !self.tutorial && self.consumables.head_start > 0 {
            HEAD_START_LENGTH
        } else {
            INITIAL_SNAKE_LENGTH
        }
    }

    /// Initial 2x score window in ticks
    pub fn score_booster_ticks(&self) -> u32 {
        if !self.tutorial && self.consumables.score_booster > 0 {
            SCORE_BOOSTER_TICKS
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let cfg = SessionConfig::from_json("{}").unwrap();
        assert_eq!(cfg, SessionConfig::default());
        assert_eq!(cfg.start_length(), INITIAL_SNAKE_LENGTH);
        assert_eq!(cfg.score_booster_ticks(), 0);
    }

    #[test]
    fn test_partial_json() {
        let cfg = SessionConfig::from_json(
            r#"{"level": 3, "upgrades": {"greed": 2}, "consumables": {"head_start": 1}}"#,
        )
        .unwrap();
        assert_eq!(cfg.level, 3);
        assert_eq!(cfg.upgrades.level(UpgradeType::Greed), 2);
        assert_eq!(cfg.upgrades.level(UpgradeType::Magnet), 0);
        assert_eq!(cfg.start_length(), HEAD_START_LENGTH);
    }

    #[test]
    fn test_consumables_ignored_in_tutorial() {
        let cfg = SessionConfig {
            tutorial: true,
            consumables: Consumables {
                head_start: 1,
                score_booster: 1,
            },
            ..Default::default()
        };
        assert_eq!(cfg.start_length(), INITIAL_SNAKE_LENGTH);
        assert_eq!(cfg.score_booster_ticks(), 0);
    }

    #[test]
    fn test_rejects_out_of_range_upgrade() {
        let err = SessionConfig::from_json(r#"{"upgrades": {"iron_scale": 9}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UpgradeOutOfRange {
                kind: UpgradeType::IronScale,
                level: 9,
                max: 3
            }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_level() {
        for level in [0, MAX_LEVEL + 1, u32::MAX] {
            let json = format!(r#"{{"level": {}}}"#, level);
            let err = SessionConfig::from_json(&json).unwrap_err();
            assert!(matches!(err, ConfigError::LevelOutOfRange { max: MAX_LEVEL, .. }));
        }
        assert!(SessionConfig::from_json(&format!(r#"{{"level": {}}}"#, MAX_LEVEL)).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            SessionConfig::from_json("{level:"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_armor_never_below_one() {
        let mut up = UpgradeLevels::default();
        assert_eq!(up.armored(20), 20);
        up.set(UpgradeType::IronScale, 3);
        assert_eq!(up.armored(20), 14);
        assert_eq!(up.armored(3), 1);
    }

    #[test]
    fn test_round_trip() {
        let mut cfg = SessionConfig::default();
        cfg.upgrades.set(UpgradeType::ExtendedPower, 5);
        let json = cfg.to_json().unwrap();
        assert_eq!(SessionConfig::from_json(&json).unwrap(), cfg);
    }
}
