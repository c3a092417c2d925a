//! Error types for quorate core.
//!
//! Only setup can fail. Generation problems are reported as text, never
//! as an error.

use thiserror::Error;

/// Core error type.
#[derive(Debug, Error)]
pub enum QuorateError {
    /// Configuration is present but invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("Failed to read config file: {0}")]
    ConfigFile(#[from] std::io::Error),

    /// Configuration file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be rendered back to TOML.
    #[error("Failed to render config: {0}")]
    ConfigRender(#[from] toml::ser::Error),
}
