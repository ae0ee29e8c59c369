//! Game settings
//!
//! Loaded from a JSON file; every field falls back to its default when absent.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_STAKE, STARTING_BALANCE};
use crate::error::{ConfigError, SettingsError};
use crate::sim::{BoardConfig, LayoutKind, Weighting};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Board geometry and slot values
    pub board: BoardConfig,

    // === Wallet ===
    pub starting_balance: i64,
    /// Deducted at the start of every round
    pub stake: i64,

    // === Outcome ===
    /// Steer the ball toward a pre-selected slot
    pub bias_enabled: bool,
    pub weighting: Weighting,

    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board: BoardConfig::grid(),
            starting_balance: STARTING_BALANCE,
            stake: DEFAULT_STAKE,
            bias_enabled: false,
            weighting: Weighting::default(),
            seed: None,
        }
    }
}

impl GameSettings {
    /// Defaults with the preset board for `kind`
    pub fn with_layout(kind: LayoutKind) -> Self {
        Self {
            board: BoardConfig::preset(kind),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stake < 0 {
            return Err(ConfigError::InvalidStake(self.stake));
        }
        if self.starting_balance < 0 {
            return Err(ConfigError::InvalidBalance(self.starting_balance));
        }
        self.board.validate()
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
