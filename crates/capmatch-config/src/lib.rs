//! Configuration system for capmatch.
//!
//! Load engine and advisor configuration from TOML or YAML to control the
//! intra-round processing order, assertion level and recommendation
//! thresholds without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use capmatch_config::{MatchConfig, TieBreak};
//!
//! let config = MatchConfig::from_toml_str(r#"
//!     tie_break = "shuffled"
//!     random_seed = 7
//!
//!     [advisor]
//!     min_match_rate = 0.95
//! "#).unwrap();
//!
//! assert_eq!(config.tie_break, TieBreak::Shuffled);
//! assert_eq!(config.seed(), 7);
//! assert_eq!(config.advisor.min_match_rate, 0.95);
//! assert_eq!(config.advisor.max_gini, 0.3);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use capmatch_config::MatchConfig;
//!
//! let config = MatchConfig::load("capmatch.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main matching configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchConfig {
    /// Order in which proposals of one round are processed.
    #[serde(default)]
    pub tie_break: TieBreak,

    /// Seed for [`TieBreak::Shuffled`].
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Environment mode affecting runtime assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Recommendation thresholds.
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

impl MatchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every advisor threshold is a usable number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.advisor.validate()
    }

    /// Sets the tie-break order.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the advisor thresholds.
    pub fn with_advisor(mut self, advisor: AdvisorConfig) -> Self {
        self.advisor = advisor;
        self
    }

    /// Returns the seed used for shuffled tie-breaking (0 when unset).
    pub fn seed(&self) -> u64 {
        self.random_seed.unwrap_or(0)
    }
}

/// Processing order for the proposals of a single round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Ascending student identifier.
    #[default]
    AscendingId,

    /// Descending student identifier.
    DescendingId,

    /// Seeded pseudo-random permutation, redrawn every round.
    Shuffled,
}

impl TieBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::AscendingId => "ascending_id",
            TieBreak::DescendingId => "descending_id",
            TieBreak::Shuffled => "shuffled",
        }
    }
}

/// Environment mode affecting runtime assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Deterministic run with no extra checks.
    #[default]
    Reproducible,

    /// Re-checks capacity and round/rank invariants after every round.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Thresholds used when turning an evaluation report into recommendations.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct AdvisorConfig {
    /// Match rate below which unmatched students are analysed.
    pub min_match_rate: f64,

    /// Average rank above which satisfaction is flagged.
    pub max_average_rank: f64,

    /// Gini coefficient above which fairness is flagged.
    pub max_gini: f64,

    /// Topic utilization below which unused topics are flagged.
    pub min_project_utilization: f64,

    /// Share of covered topics below which a program's coverage is flagged.
    pub min_program_coverage: f64,

    /// Topics per student below which more topics are suggested.
    pub min_topics_per_student: f64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            min_match_rate: 0.9,
            max_average_rank: 2.5,
            max_gini: 0.3,
            min_project_utilization: 0.7,
            min_program_coverage: 0.6,
            min_topics_per_student: 0.25,
        }
    }
}

impl AdvisorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let ratios = [
            ("min_match_rate", self.min_match_rate),
            ("max_gini", self.max_gini),
            ("min_project_utilization", self.min_project_utilization),
            ("min_program_coverage", self.min_program_coverage),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        if !(1.0..=5.0).contains(&self.max_average_rank) {
            return Err(ConfigError::Invalid(format!(
                "max_average_rank must be within 1.0..=5.0, got {}",
                self.max_average_rank
            )));
        }
        if !self.min_topics_per_student.is_finite() || self.min_topics_per_student < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_topics_per_student must be non-negative, got {}",
                self.min_topics_per_student
            )));
        }
        Ok(())
    }
}
