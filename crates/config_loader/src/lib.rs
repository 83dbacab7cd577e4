//! # Config Loader
//!
//! Reads a logging configuration (TOML or JSON) into a validated
//! [`LoggingBlueprint`]; `handlers::build` turns it into a composite handler.
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("logging.toml")).unwrap();
//! println!("handlers: {}", blueprint.handlers.len());
//! ```

mod format;
mod validator;

pub use contracts::LoggingBlueprint;
pub use format::ConfigFormat;

use contracts::ContractError;
use std::path::Path;
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read, parse and validate the file at `path`.
    ///
    /// The format comes from the extension (`.toml` / `.json`, any case).
    ///
    /// # Errors
    /// `Io` when the file cannot be read, `ConfigParse` for an unknown
    /// extension or malformed content, `ConfigValidation` for rule violations.
    pub fn load_from_path(path: &Path) -> Result<LoggingBlueprint, ContractError> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), ?format, "Loading logging config");
        Self::load_from_str(&content, format)
    }

    /// Parse and validate an in-memory configuration
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<LoggingBlueprint, ContractError> {
        let blueprint = format.decode(content)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }

    /// Render a blueprint back to TOML
    pub fn to_toml(blueprint: &LoggingBlueprint) -> Result<String, ContractError> {
        ConfigFormat::Toml.encode(blueprint)
    }

    /// Render a blueprint as pretty JSON
    pub fn to_json(blueprint: &LoggingBlueprint) -> Result<String, ContractError> {
        ConfigFormat::Json.encode(blueprint)
    }
}
