use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::compliance::ComplianceConfig;
use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Presentation rules
    #[serde(default)]
    pub compliance: ComplianceConfig,

    /// Chunking of large tracks
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Output file naming
    #[serde(default)]
    pub output: OutputConfig,

    /// Input handling
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Chunking configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChunkingConfig {
    // @field: Character budget of one chunk
    #[serde(default = "default_max_chars_per_chunk")]
    pub max_chars_per_chunk: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars_per_chunk: default_max_chars_per_chunk(),
        }
    }
}

/// Output naming configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    // @field: Directory for written files, relative to the working directory
    #[serde(default = "default_output_directory")]
    pub directory: String,

    // @field: Joined before the file stem with '-' when not empty
    #[serde(default)]
    pub prefix: String,

    // @field: Joined after the file stem with '-' when not empty
    #[serde(default = "default_postfix")]
    pub postfix: String,

    // @field: Append -YYYY-MM-DD--HH-MM to file names
    #[serde(default = "default_true")]
    pub timestamp_suffix: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            prefix: String::new(),
            postfix: default_postfix(),
            timestamp_suffix: true,
        }
    }
}

/// Input handling configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IntakeConfig {
    /// Whether to repair timing lines damaged by machine translation
    #[serde(default = "default_true")]
    pub repair_translated_timecodes: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            repair_translated_timecodes: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Highest frame rate accepted in a config file
pub const MAX_FRAMES_PER_SECOND: u32 = 240;

fn default_max_chars_per_chunk() -> usize {
    4300
}

fn default_output_directory() -> String {
    "output".to_string()
}

fn default_postfix() -> String {
    "compliant".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration file, writing the defaults there first if it
    /// does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;

            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        config.save(path)?;

        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let fps = self.compliance.frames_per_second;
        if fps == 0 || fps > MAX_FRAMES_PER_SECOND {
            return Err(ConfigError::InvalidFramesPerSecond(fps).into());
        }

        if self.chunking.max_chars_per_chunk == 0 {
            return Err(ConfigError::InvalidChunkSize(self.chunking.max_chars_per_chunk).into());
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            compliance: ComplianceConfig::default(),
            chunking: ChunkingConfig::default(),
            output: OutputConfig::default(),
            intake: IntakeConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
