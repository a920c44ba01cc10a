/*!
 * Error types for the subcomply application.
 *
 * The compliance engine itself never fails: malformed blocks are dropped and
 * degenerate values are clamped. These types cover the edges around it
 * (timestamp parsing, configuration, file handling), using the thiserror
 * crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while reading subtitle text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A timestamp did not match `HH:MM:SS,mmm`
    #[error("Invalid timestamp: '{0}'")]
    InvalidTimestamp(String),

    /// A block could not be turned into a cue
    #[error("Malformed block {block_number}: {reason}")]
    MalformedBlock {
        /// 1-based position of the block in the input
        block_number: usize,
        /// Why the block was rejected
        reason: String,
    },
}

/// Errors raised by configuration validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Frame rate outside the supported range
    #[error("Invalid frames per second: {0} (expected 1..=240)")]
    InvalidFramesPerSecond(u32),

    /// Chunk size of zero
    #[error("Invalid chunk size: {0} (must be greater than zero)")]
    InvalidChunkSize(usize),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
