//! Configuration with YAML schema and validation.
//!
//! Settings are checked in two passes:
//! - field ranges through `validator` derive rules
//! - cross-field constraints in `validate_semantic`

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{TraceError, TraceResult};

/// Top-level configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VisualizerConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Playback timing.
    #[validate(nested)]
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Instance size limits.
    #[validate(nested)]
    #[serde(default)]
    pub limits: LimitsConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl VisualizerConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> TraceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> TraceResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VisualizerConfigBuilder {
        VisualizerConfigBuilder::default()
    }

    /// Validate constraints spanning several fields.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Config`] if the speed bounds are inconsistent.
    pub fn validate_semantic(&self) -> TraceResult<()> {
        let p = &self.playback;
        if p.min_speed_ms > p.max_speed_ms {
            return Err(TraceError::config(format!(
                "min_speed_ms {} exceeds max_speed_ms {}",
                p.min_speed_ms, p.max_speed_ms
            )));
        }
        if !(p.min_speed_ms..=p.max_speed_ms).contains(&p.speed_ms) {
            return Err(TraceError::config(format!(
                "speed_ms {} outside [{}, {}]",
                p.speed_ms, p.min_speed_ms, p.max_speed_ms
            )));
        }
        Ok(())
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            playback: PlaybackConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VisualizerConfigBuilder {
    speed_ms: Option<u64>,
    auto_play: Option<bool>,
    limits: Option<LimitsConfig>,
}

impl VisualizerConfigBuilder {
    /// Set the delay between automatic steps.
    #[must_use]
    pub const fn speed_ms(mut self, ms: u64) -> Self {
        self.speed_ms = Some(ms);
        self
    }

    /// Start playing as soon as a trace is loaded.
    #[must_use]
    pub const fn auto_play(mut self, enabled: bool) -> Self {
        self.auto_play = Some(enabled);
        self
    }

    /// Replace the instance limits.
    #[must_use]
    pub fn limits(mut self, limits: LimitsConfig) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Build the configuration.
    ///
    /// The speed is clamped into the default bounds.
    #[must_use]
    pub fn build(self) -> VisualizerConfig {
        let mut config = VisualizerConfig::default();

        if let Some(ms) = self.speed_ms {
            config.playback.speed_ms = config.playback.clamp_speed(ms);
        }

        if let Some(auto_play) = self.auto_play {
            config.playback.auto_play = auto_play;
        }

        if let Some(limits) = self.limits {
            config.limits = limits;
        }

        config
    }
}

/// Playback timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PlaybackConfig {
    /// Delay between automatic steps, in milliseconds.
    #[validate(range(min = 1, max = 60_000))]
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u64,
    /// Fastest allowed speed.
    #[validate(range(min = 1))]
    #[serde(default = "default_min_speed_ms")]
    pub min_speed_ms: u64,
    /// Slowest allowed speed.
    #[validate(range(max = 60_000))]
    #[serde(default = "default_max_speed_ms")]
    pub max_speed_ms: u64,
    /// Start playing right after `load`.
    #[serde(default)]
    pub auto_play: bool,
}

const fn default_speed_ms() -> u64 {
    500
}

const fn default_min_speed_ms() -> u64 {
    10
}

const fn default_max_speed_ms() -> u64 {
    10_000
}

impl PlaybackConfig {
    /// Clamp `ms` into `[min_speed_ms, max_speed_ms]`.
    #[must_use]
    pub fn clamp_speed(&self, ms: u64) -> u64 {
        ms.clamp(self.min_speed_ms, self.max_speed_ms.max(self.min_speed_ms))
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed_ms: default_speed_ms(),
            min_speed_ms: default_min_speed_ms(),
            max_speed_ms: default_max_speed_ms(),
            auto_play: false,
        }
    }
}

/// Largest instances the runner accepts.
///
/// Each step owns a full snapshot, so trace memory grows with
/// steps × snapshot size; these keep a trace in the low megabytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LimitsConfig {
    /// Sorting array length.
    #[validate(range(min = 1, max = 1024))]
    pub max_array_len: usize,
    /// Graph node count.
    #[validate(range(min = 1, max = 64))]
    pub max_graph_nodes: usize,
    /// 0/1 knapsack item count.
    #[validate(range(min = 1, max = 64))]
    pub max_knapsack_items: usize,
    /// 0/1 knapsack capacity.
    #[validate(range(min = 1, max = 10_000))]
    pub max_knapsack_capacity: usize,
    /// Coin denominations.
    #[validate(range(min = 1, max = 64))]
    pub max_coins: usize,
    /// Coin change target amount.
    #[validate(range(min = 1, max = 100_000))]
    pub max_coin_target: usize,
    /// LCS string length, in characters.
    #[validate(range(min = 1, max = 256))]
    pub max_string_len: usize,
    /// Activities or fractional-knapsack items.
    #[validate(range(min = 1, max = 4096))]
    pub max_greedy_items: usize,
    /// Subset and combination input size.
    #[validate(range(min = 1, max = 20))]
    pub max_backtracking_items: usize,
    /// Permutation input size.
    #[validate(range(min = 1, max = 10))]
    pub max_permutation_items: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_array_len: 64,
            max_graph_nodes: 12,
            max_knapsack_items: 10,
            max_knapsack_capacity: 50,
            max_coins: 8,
            max_coin_target: 100,
            max_string_len: 12,
            max_greedy_items: 32,
            max_backtracking_items: 10,
            max_permutation_items: 6,
        }
    }
}
