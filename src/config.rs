// Configuration module for reading Snake.toml
//
// All tunable decision constants live here and are loaded once at
// startup; the decision core never mutates them, which keeps every turn a
// pure function of (snapshot, config).

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub policy: PolicyConfig,
    pub debug: DebugConfig,
    pub profiling: ProfilingConfig,
}

/// Timing constants. The core does not implement timeouts (its work is
/// bounded by board area and lookahead depth); the budget is used to log
/// overruns.
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms
            .saturating_sub(self.network_overhead_ms)
    }
}

/// Turn-policy constants: phase thresholds, lookahead depth, and the
/// terminal fallback direction.
#[derive(Debug, Deserialize, Clone)]
pub struct PolicyConfig {
    /// Forward-simulation depth for the post-selection survival check
    pub lookahead_steps: u32,
    /// Length at which the snake switches to space-filling play
    pub fill_space_min_length: i32,
    /// Minimum own length before attempting the 1v1 edge trap
    pub trap_min_length: i32,
    /// Opponent head must be within this many cells of an edge to trap
    pub trap_edge_distance: i32,
    /// Manhattan radius within which rival heads trigger defensive or
    /// aggressive play
    pub alert_radius: i32,
    /// Below this health, contested food is taken anyway
    pub desperate_health: i32,
    /// Minimum own length before chasing smaller rivals
    pub attack_min_length: i32,
    /// Terminal fallback when not even a legal move exists
    pub default_direction: String,
    /// When true, equally-scored food candidates are shuffled with the
    /// seeded generator before the deterministic ranking
    pub shuffle_equal_candidates: bool,
    /// Seed for the injectable tie-break generator
    pub tie_break_seed: u64,
}

impl PolicyConfig {
    /// Parses the configured terminal fallback direction. An unparseable
    /// value falls back to Up rather than failing the whole turn.
    pub fn fallback_direction(&self) -> Direction {
        match self.default_direction.to_lowercase().as_str() {
            "down" => Direction::Down,
            "left" => Direction::Left,
            "right" => Direction::Right,
            _ => Direction::Up,
        }
    }
}

/// Debug decision-log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

/// Stage-profiling configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ProfilingConfig {
    pub enabled: bool,
    pub log_to_stderr: bool,
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback.
    /// These must match the constants defined in Snake.toml.
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            policy: PolicyConfig {
                lookahead_steps: 4,
                fill_space_min_length: 12,
                trap_min_length: 8,
                trap_edge_distance: 1,
                alert_radius: 3,
                desperate_health: 25,
                attack_min_length: 5,
                default_direction: "up".to_string(),
                shuffle_equal_candidates: false,
                tie_break_seed: 0,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "cardinal_debug.jsonl".to_string(),
            },
            profiling: ProfilingConfig {
                enabled: false,
                log_to_stderr: true,
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Snake.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
