//! Engine configuration.
//!
//! The rules are fixed; what varies between hosts is pacing (how long each
//! animated step is held), the dice seed, and where snapshots are kept.
//! Configuration is read from a TOML file when one exists, then individual
//! values can be overridden from `LUDO_*` environment variables.
//!
//! ```toml
//! seed = 42
//!
//! [pacing]
//! move_step_ms = 100
//! roll_animation_ms = 1300
//!
//! [storage]
//! namespace = "ludo"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::error::EngineError;

/// Hold times for the externally visible steps of a sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause after each forward cell of a move.
    pub move_step_ms: u64,
    /// Pause after each backward cell of a captured piece.
    pub capture_step_ms: u64,
    /// Dice animation before the outcome is known.
    pub roll_animation_ms: u64,
    /// Pause before the turn passes when nothing can move.
    pub forfeit_cooldown_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            move_step_ms: 100,
            capture_step_ms: 1,
            roll_animation_ms: 1300,
            forfeit_cooldown_ms: 600,
        }
    }
}

impl PacingConfig {
    /// No pauses at all. For tests and headless simulation.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            move_step_ms: 0,
            capture_step_ms: 0,
            roll_animation_ms: 0,
            forfeit_cooldown_ms: 0,
        }
    }

    #[must_use]
    pub fn move_step(&self) -> Duration {
        Duration::from_millis(self.move_step_ms)
    }

    #[must_use]
    pub fn capture_step(&self) -> Duration {
        Duration::from_millis(self.capture_step_ms)
    }

    #[must_use]
    pub fn roll_animation(&self) -> Duration {
        Duration::from_millis(self.roll_animation_ms)
    }

    #[must_use]
    pub fn forfeit_cooldown(&self) -> Duration {
        Duration::from_millis(self.forfeit_cooldown_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Prefix for every persisted key.
    pub namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: "ludo".to_string(),
        }
    }
}

impl StorageConfig {
    /// Fully qualified storage key for `entry`.
    #[must_use]
    pub fn key(&self, entry: &str) -> String {
        format!("{}:{}", self.namespace, entry)
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Dice seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub pacing: PacingConfig,
    pub storage: StorageConfig,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `path` as TOML, falling back to defaults when it does not exist,
    /// then apply environment overrides.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path).map_err(|e| EngineError::Config {
                message: format!("failed to read {}: {e}", path.display()),
            })?;
            Self::from_toml(&contents)?
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.merge_env();

        info!(
            seed = ?config.seed,
            move_step_ms = config.pacing.move_step_ms,
            roll_animation_ms = config.pacing.roll_animation_ms,
            namespace = %config.storage.namespace,
            "engine configuration loaded"
        );
        Ok(config)
    }

    /// Parse a TOML document. Missing tables and keys take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, EngineError> {
        toml::from_str(contents).map_err(|e| EngineError::Config {
            message: e.to_string(),
        })
    }

    /// Override from `LUDO_*` variables. Unparsable values are ignored.
    pub fn merge_env(&mut self) {
        if let Some(seed) = env_parse("LUDO_SEED") {
            self.seed = Some(seed);
        }
        if let Some(ms) = env_parse("LUDO_MOVE_STEP_MS") {
            self.pacing.move_step_ms = ms;
        }
        if let Some(ms) = env_parse("LUDO_CAPTURE_STEP_MS") {
            self.pacing.capture_step_ms = ms;
        }
        if let Some(ms) = env_parse("LUDO_ROLL_ANIMATION_MS") {
            self.pacing.roll_animation_ms = ms;
        }
        if let Some(ms) = env_parse("LUDO_FORFEIT_COOLDOWN_MS") {
            self.pacing.forfeit_cooldown_ms = ms;
        }
        if let Ok(namespace) = std::env::var("LUDO_STORAGE_NAMESPACE") {
            if !namespace.is_empty() {
                self.storage.namespace = namespace;
            }
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.storage.namespace = namespace.into();
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}
