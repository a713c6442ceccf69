//! Config Command
//!
//! Manage CodeGenius configuration.
//!
//! Usage:
//!   codegenius config show [-f json]
//!   codegenius config path
//!   codegenius config init [-g] [--force]

use clap::ValueEnum;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Json,
}

/// Show the merged effective configuration
pub fn show(format: ConfigFormat) -> Result<()> {
    let config = ConfigLoader::load()?;
    println!(
        "{}",
        ConfigLoader::render(&config, format == ConfigFormat::Json)?
    );
    Ok(())
}

/// Show configuration file locations and whether they exist
pub fn path() -> Result<()> {
    let describe = |path: &std::path::Path| {
        let state = if path.exists() { "" } else { " (not found)" };
        format!("{}{}", path.display(), state)
    };

    match ConfigLoader::global_config_path() {
        Some(global) => println!("Global:  {}", describe(&global)),
        None => println!("Global:  (cannot determine config directory)"),
    }
    println!(
        "Project: {}",
        describe(&ConfigLoader::project_config_path())
    );
    Ok(())
}

/// Initialize global or project configuration
pub fn init(global: bool, force: bool) -> Result<()> {
    let out = Output::new();
    let config_path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(&std::env::current_dir()?, force)?
    };

    let scope = if global { "global" } else { "project" };
    out.success(&format!("Initialized {} configuration", scope));
    out.field("Config", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_values() {
        assert_eq!(ConfigFormat::from_str("toml", false), Ok(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_str("json", false), Ok(ConfigFormat::Json));
        assert!(ConfigFormat::from_str("yaml", false).is_err());
    }
}
