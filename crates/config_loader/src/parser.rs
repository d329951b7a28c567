//! Config file parsing
//!
//! TOML (primary) and JSON formats. A config file supplies a partial
//! overlay; anything it omits keeps the built-in default.

use contracts::ExportError;
use serde::Deserialize;

/// Config file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Partial hub settings read from a config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub address: Option<String>,
    pub api_key: Option<String>,
    pub add_hash: Option<bool>,
}

/// Parse TOML config content
pub fn parse_toml(content: &str) -> Result<FileConfig, ExportError> {
    toml::from_str(content).map_err(|e| ExportError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON config content
pub fn parse_json(content: &str) -> Result<FileConfig, ExportError> {
    serde_json::from_str(content).map_err(|e| ExportError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse config content in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<FileConfig, ExportError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}
