//! `info` command implementation.

use anyhow::{Context, Result};
use composer::Shape;
use contracts::{HandlerConfig, LoggingBlueprint, OutputTarget};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    shape: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attrs: Vec<String>,
    handlers: Vec<HandlerInfo>,
}

#[derive(Serialize)]
struct HandlerInfo {
    name: String,
    handler_type: String,
    level: String,
    output: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    let blueprint = super::load_blueprint(&args.config)?;
    let info = build_config_info(&blueprint);

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{json}");
    } else {
        print_config_info(&info);
    }

    Ok(())
}

fn describe_output(output: &OutputTarget) -> String {
    match output {
        OutputTarget::Stdout => "stdout".to_string(),
        OutputTarget::Stderr => "stderr".to_string(),
        OutputTarget::File(path) => format!("file:{}", path.display()),
    }
}

fn handler_info(config: &HandlerConfig) -> HandlerInfo {
    HandlerInfo {
        name: config.name.clone(),
        handler_type: format!("{:?}", config.handler_type).to_lowercase(),
        level: config.level.to_string(),
        output: describe_output(&config.output),
    }
}

fn build_config_info(blueprint: &LoggingBlueprint) -> ConfigInfo {
    ConfigInfo {
        shape: Shape::for_leaves(blueprint.handlers.len()).to_string(),
        group: blueprint.group.clone(),
        attrs: blueprint
            .shared_attrs()
            .iter()
            .map(|attr| format!("{}={}", attr.key, attr.value))
            .collect(),
        handlers: blueprint.handlers.iter().map(handler_info).collect(),
    }
}

fn print_config_info(info: &ConfigInfo) {
    println!("Composite: {}", info.shape);
    if let Some(ref group) = info.group {
        println!("Group: {group}");
    }
    if !info.attrs.is_empty() {
        println!("Attributes: {}", info.attrs.join(" "));
    }

    println!("\nHandlers ({}):", info.handlers.len());
    for handler in &info.handlers {
        println!(
            "  - {} [{}] level>={} -> {}",
            handler.name, handler.handler_type, handler.level, handler.output
        );
    }
}
