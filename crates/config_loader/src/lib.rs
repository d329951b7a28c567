//! # Config Loader
//!
//! Process-wide hub defaults, resolved once at startup.
//!
//! Resolution order (later wins):
//! 1. Built-in defaults (`http://piveau-hub:8080`, empty API key, hashing off)
//! 2. Optional config file (TOML or JSON)
//! 3. Environment (`PIVEAU_HUB_ADDRESS`, `PIVEAU_HUB_APIKEY`, `PIVEAU_HUB_ADD_HASH`)
//!
//! The result is an immutable [`HubEndpoint`]; per-unit overrides are merged
//! later by the pure `HubEndpoint::resolve`.
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//!
//! let defaults = ConfigLoader::load(None).unwrap();
//! println!("Hub: {}", defaults.address);
//! ```

mod parser;
mod validator;

pub use contracts::HubEndpoint;
pub use parser::ConfigFormat;

use contracts::ExportError;
use parser::FileConfig;
use std::path::Path;

/// Environment variable naming the hub base address
pub const ENV_HUB_ADDRESS: &str = "PIVEAU_HUB_ADDRESS";
/// Environment variable naming the hub API key
pub const ENV_HUB_APIKEY: &str = "PIVEAU_HUB_APIKEY";
/// Environment variable toggling hash-on-export
pub const ENV_HUB_ADD_HASH: &str = "PIVEAU_HUB_ADD_HASH";

/// Configuration loader
///
/// Provides static methods to resolve hub defaults from files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve hub defaults: built-ins, then optional file, then environment
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load(path: Option<&Path>) -> Result<HubEndpoint, ExportError> {
        let mut endpoint = HubEndpoint::default();
        if let Some(path) = path {
            let file = Self::load_file(path)?;
            apply_file(&mut endpoint, &file);
        }
        apply_env_from(&mut endpoint, std::env::vars())?;
        validator::validate(&endpoint)?;
        Ok(endpoint)
    }

    /// Resolve hub defaults from config content, skipping the environment
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<HubEndpoint, ExportError> {
        let mut endpoint = HubEndpoint::default();
        apply_file(&mut endpoint, &parser::parse(content, format)?);
        validator::validate(&endpoint)?;
        Ok(endpoint)
    }
}

impl ConfigLoader {
    /// Infer format from the file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ExportError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ExportError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext)
            .ok_or_else(|| ExportError::config_parse(format!("unsupported config format: .{ext}")))
    }

    fn load_file(path: &Path) -> Result<FileConfig, ExportError> {
        let format = Self::detect_format(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::ConfigParse {
            message: format!("cannot read {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })?;
        parser::parse(&content, format)
    }
}

/// Overlay file settings on top of the current defaults
fn apply_file(endpoint: &mut HubEndpoint, file: &FileConfig) {
    if let Some(address) = &file.address {
        endpoint.address = address.clone();
    }
    if let Some(api_key) = &file.api_key {
        endpoint.api_key = api_key.clone();
    }
    if let Some(add_hash) = file.add_hash {
        endpoint.add_hash = add_hash;
    }
}

/// Overlay environment settings on top of the current defaults
///
/// Takes the variables as an iterator so tests can inject them without
/// touching process state.
fn apply_env_from<I>(endpoint: &mut HubEndpoint, vars: I) -> Result<(), ExportError>
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        match key.as_str() {
            ENV_HUB_ADDRESS => endpoint.address = value,
            ENV_HUB_APIKEY => endpoint.api_key = value,
            ENV_HUB_ADD_HASH => endpoint.add_hash = parse_bool(&key, &value)?,
            _ => {}
        }
    }
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ExportError> {
    match value.to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ExportError::config_parse(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}
