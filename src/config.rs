//! Pipeline Configuration
//!
//! Tunables for the refinement loop and domain resolution, plus a
//! JSON-file-backed configuration service (load existing or create defaults).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_reqforge_dir};

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Maximum refinement iterations before a terminal rejection
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Minimum weighted score to accept an existing handler
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    /// Whether synthesis of new handlers is permitted
    #[serde(default = "default_synthesis_enabled")]
    pub synthesis_enabled: bool,
    /// Time budget for a synthesizer call, in seconds
    #[serde(default = "default_synthesis_timeout_secs")]
    pub synthesis_timeout_secs: u64,
    /// Override for the synthesized handler spec directory
    #[serde(default)]
    pub handler_dir: Option<PathBuf>,
}

fn default_max_iterations() -> u32 {
    3
}

fn default_confidence_threshold() -> f64 {
    0.6
}

fn default_synthesis_enabled() -> bool {
    true
}

fn default_synthesis_timeout_secs() -> u64 {
    30
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            confidence_threshold: default_confidence_threshold(),
            synthesis_enabled: default_synthesis_enabled(),
            synthesis_timeout_secs: default_synthesis_timeout_secs(),
            handler_dir: None,
        }
    }
}

impl PipelineConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("maxIterations must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err("confidenceThreshold must be within 0.0-1.0".to_string());
        }
        if self.synthesis_timeout_secs == 0 {
            return Err("synthesisTimeoutSecs must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Configuration service for managing pipeline settings on disk.
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: PipelineConfig,
}

impl ConfigService {
    /// Create a new config service, loading existing config or creating defaults.
    pub fn new() -> AppResult<Self> {
        ensure_reqforge_dir()?;
        let path = config_path()?;
        Self::from_path(path)
    }

    /// Create a config service rooted at an explicit path (used by tests).
    pub fn from_path(config_path: PathBuf) -> AppResult<Self> {
        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            let default_config = PipelineConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file.
    fn load_from_file(path: &Path) -> AppResult<PipelineConfig> {
        let content = fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting.
    fn save_to_file(path: &Path, config: &PipelineConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration.
    pub fn get_config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Save the current configuration to disk.
    pub fn save(&self) -> AppResult<()> {
        Self::save_to_file(&self.config_path, &self.config)
    }

    /// Reload configuration from disk.
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }
}
