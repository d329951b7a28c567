//! `validate` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use config_loader::ConfigLoader;

use crate::cli::ValidateArgs;

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    let defaults = ConfigLoader::load(args.config.as_deref())
        .context("Failed to resolve hub configuration")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&defaults)?);
    } else {
        println!("Hub configuration is valid");
        println!("  Address:  {}", defaults.address);
        println!(
            "  API key:  {}",
            if defaults.api_key.is_empty() {
                "(empty)"
            } else {
                "(set)"
            }
        );
        println!("  Add hash: {}", defaults.add_hash);
    }

    info!("Configuration validated");
    Ok(())
}
