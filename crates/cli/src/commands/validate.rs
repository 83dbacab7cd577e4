//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::LoggingBlueprint;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    handler_count: usize,
    attr_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = match super::load_blueprint(&args.config) {
        Ok(blueprint) => ValidationResult {
            valid: true,
            config_path: args.config.display().to_string(),
            error: None,
            warnings: collect_warnings(&blueprint),
            summary: Some(ConfigSummary {
                handler_count: blueprint.handlers.len(),
                attr_count: blueprint.attrs.len(),
                group: blueprint.group.clone(),
            }),
        },
        Err(e) => ValidationResult {
            valid: false,
            config_path: args.config.display().to_string(),
            error: Some(format!("{e:#}")),
            warnings: Vec::new(),
            summary: None,
        },
    };

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{json}");
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

/// Non-fatal configuration issues
fn collect_warnings(blueprint: &LoggingBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();
    if blueprint.handlers.is_empty() {
        warnings.push("No handlers configured - records will be discarded".to_string());
    }
    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if !result.valid {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {error}");
        }
        return;
    }

    println!("✓ Configuration is valid: {}", result.config_path);
    if let Some(ref summary) = result.summary {
        println!("\n  Handlers: {}", summary.handler_count);
        println!("  Attributes: {}", summary.attr_count);
        if let Some(ref group) = summary.group {
            println!("  Group: {group}");
        }
    }
    if !result.warnings.is_empty() {
        println!("\n⚠ Warnings:");
        for warning in &result.warnings {
            println!("  - {warning}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_warns_without_handlers() {
        let blueprint: LoggingBlueprint = serde_json::from_str("{}").unwrap();
        assert_eq!(collect_warnings(&blueprint).len(), 1);
    }

    #[test]
    fn test_missing_file_is_invalid() {
        let args = ValidateArgs {
            config: PathBuf::from("/nonexistent/logging.toml"),
            json: true,
        };
        assert!(run_validate(&args).is_err());
    }

    #[test]
    fn test_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        std::fs::write(&path, "[[handlers]]\nname = \"console\"\ntype = \"text\"\n").unwrap();

        let args = ValidateArgs { config: path, json: false };
        assert!(run_validate(&args).is_ok());
    }
}
