//! Configuration System for lingsum
//!
//! Provides a flexible configuration system supporting:
//! - TOML configuration files
//! - Environment variable overrides
//! - Quality-weight presets for the optimal summary measure
//!
//! # Configuration File Locations
//!
//! Configuration files are searched in order (first found wins):
//! 1. `./lingsum.toml` - Project-local configuration
//! 2. `~/.config/lingsum/config.toml` - User configuration (XDG)
//! 3. `~/.lingsum/config.toml` - User configuration (legacy)
//! 4. `/etc/lingsum/config.toml` - System-wide configuration
//!
//! # Environment Variables
//!
//! - `LINGSUM_SUBJECT` - Subject noun used in generated sentences
//! - `LINGSUM_MAX_SUMMARIZERS` - Maximum summarizer combination length
//! - `LINGSUM_WORKERS` - Worker thread count (0 = auto-detect)
//! - `LINGSUM_PARALLEL` - Enable parallel generation (true/false)
//!
//! # Example Configuration
//!
//! ```toml
//! # lingsum.toml
//!
//! [generation]
//! subject = "houses"
//! max_summarizers = 3
//!
//! [parallel]
//! enabled = true
//! workers = 0
//! min_jobs_per_worker = 16
//!
//! [weights]
//! truth = 0.7
//! auxiliary = [0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03]
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::summaries::DEFAULT_WEIGHTS;

// ============================================================================
// Configuration Schema
// ============================================================================

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LingsumConfig {
    /// Sentence generation settings
    pub generation: GenerationConfig,
    /// Parallel execution settings
    pub parallel: ParallelConfig,
    /// Quality weights for the optimal summary measure
    pub weights: WeightsConfig,
}

/// Sentence generation options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Subject noun inserted into generated sentences
    pub subject: String,
    /// Maximum number of summarizers combined in one sentence
    pub max_summarizers: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            subject: "records".to_string(),
            max_summarizers: 3,
        }
    }
}

/// Parallel generation options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Enable parallel generation
    pub enabled: bool,
    /// Worker thread count (0 = auto-detect)
    pub workers: usize,
    /// Minimum sentences per worker before threads are spawned
    pub min_jobs_per_worker: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            workers: 0,
            min_jobs_per_worker: 16,
        }
    }
}

/// Quality weights: one for the degree of truth, ten for the auxiliary
/// measures T2..T11
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    /// Weight of the degree of truth (T1)
    pub truth: f64,
    /// Weights of the auxiliary measures T2..T11, in order
    pub auxiliary: Vec<f64>,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            truth: DEFAULT_WEIGHTS[0],
            auxiliary: DEFAULT_WEIGHTS[1..].to_vec(),
        }
    }
}

impl WeightsConfig {
    /// Flatten into the eleven-element weight vector the summary
    /// calculator expects
    pub fn to_vector(&self) -> Vec<f64> {
        let mut weights = Vec::with_capacity(1 + self.auxiliary.len());
        weights.push(self.truth);
        weights.extend_from_slice(&self.auxiliary);
        weights
    }

    /// Check the weight vector shape: exactly ten auxiliary weights, all
    /// entries non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auxiliary.len() != 10 {
            return Err(ConfigError::InvalidWeights(format!(
                "expected 10 auxiliary weights, got {}",
                self.auxiliary.len()
            )));
        }
        if self.truth < 0.0 || self.auxiliary.iter().any(|&w| w < 0.0) {
            return Err(ConfigError::InvalidWeights(
                "weights must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Configuration Loading
// ============================================================================

impl LingsumConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from default locations
    ///
    /// Searches for config files in order:
    /// 1. ./lingsum.toml
    /// 2. ~/.config/lingsum/config.toml
    /// 3. ~/.lingsum/config.toml
    /// 4. /etc/lingsum/config.toml
    ///
    /// Then applies environment variable overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for path in Self::config_paths() {
            if path.exists() {
                config = Self::load_from_file(&path)?;
                break;
            }
        }

        config.apply_env_overrides();
        config.weights.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.clone(), e.to_string()))?;

        let config: LingsumConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.clone(), e.to_string()))?;

        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(PathBuf::from("<string>"), e.to_string()))
    }

    /// Get the list of config file search paths
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Project-local
        paths.push(PathBuf::from("./lingsum.toml"));

        // XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("lingsum").join("config.toml"));
        }

        // Legacy home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".lingsum").join("config.toml"));
        }

        // System-wide (Unix only)
        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/lingsum/config.toml"));

        paths
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        // LINGSUM_SUBJECT
        if let Ok(val) = env::var("LINGSUM_SUBJECT") {
            if !val.is_empty() {
                self.generation.subject = val;
            }
        }

        // LINGSUM_MAX_SUMMARIZERS
        if let Ok(val) = env::var("LINGSUM_MAX_SUMMARIZERS") {
            if let Ok(len) = val.parse::<usize>() {
                self.generation.max_summarizers = len;
            }
        }

        // LINGSUM_WORKERS
        if let Ok(val) = env::var("LINGSUM_WORKERS") {
            if let Ok(workers) = val.parse::<usize>() {
                self.parallel.workers = workers;
            }
        }

        // LINGSUM_PARALLEL
        if let Ok(val) = env::var("LINGSUM_PARALLEL") {
            self.parallel.enabled = val == "true" || val == "1" || val == "yes";
        }
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Write configuration to a file
    pub fn save_to_file(&self, path: &PathBuf) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        fs::write(path, content).map_err(|e| ConfigError::IoError(path.clone(), e.to_string()))
    }

    /// Generate a default configuration file content
    pub fn default_config_content() -> &'static str {
        r#"# lingsum configuration file

[generation]
# Subject noun inserted into generated sentences
subject = "records"
# Maximum number of summarizers combined in one sentence
max_summarizers = 3

[parallel]
# Enable parallel generation
enabled = true
# Worker thread count (0 = auto-detect)
workers = 0
# Minimum sentences per worker before threads are spawned
min_jobs_per_worker = 16

[weights]
# Weight of the degree of truth
truth = 0.7
# Weights of the ten auxiliary quality measures, in order
auxiliary = [0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03]
"#
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading/writing config file
    IoError(PathBuf, String),
    /// Parse error in config file
    ParseError(PathBuf, String),
    /// Serialization error
    SerializeError(String),
    /// Weight vector has the wrong shape or negative entries
    InvalidWeights(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, msg) => {
                write!(f, "IO error reading {}: {}", path.display(), msg)
            }
            ConfigError::ParseError(path, msg) => {
                write!(f, "Parse error in {}: {}", path.display(), msg)
            }
            ConfigError::SerializeError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            ConfigError::InvalidWeights(msg) => {
                write!(f, "Invalid weights: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Tests
// ============================================================================
