//! `emit` command implementation.

use anyhow::{Context as _, Result};
use contracts::Context;
use tracing::{info, warn};

use crate::cli::EmitArgs;
use crate::error::CliError;

/// Execute the `emit` command
pub fn run_emit(args: &EmitArgs) -> Result<()> {
    info!(
        config = %args.config.display(),
        level = %args.level,
        "Emitting record"
    );

    let blueprint = super::load_blueprint(&args.config)?;
    if blueprint.handlers.is_empty() {
        warn!("No handlers configured - record will be discarded");
    }

    let mut logger = handlers::build_logger(&blueprint).context("Failed to build handlers")?;
    if let Some(group) = &args.group {
        logger = logger.with_group(group);
    }

    let ctx = Context::background();
    if !logger.enabled(&ctx, args.level) {
        info!(level = %args.level, "No handler enabled for level");
        return Ok(());
    }

    match logger.log(&ctx, args.level, &args.message, args.attrs.iter().cloned()) {
        Ok(()) => Ok(()),
        Err(err) => {
            let causes: Vec<_> = err.causes().collect();
            eprintln!("✗ Record was not delivered everywhere:");
            for cause in &causes {
                eprintln!("  - {cause}");
            }
            Err(CliError::handlers_failed(causes.len()).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{Attr, Level};

    fn write_config(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("logging.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_emit_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("out.log");
        let json = dir.path().join("out.jsonl");
        let config = write_config(
            dir.path(),
            &format!(
                "[[handlers]]\nname = \"text\"\ntype = \"text\"\noutput = {{ file = {:?} }}\n\n\
                 [[handlers]]\nname = \"json\"\ntype = \"json\"\noutput = {{ file = {:?} }}\n",
                text.display().to_string(),
                json.display().to_string(),
            ),
        );

        let args = EmitArgs {
            config,
            level: Level::WARN,
            message: "disk low".to_string(),
            attrs: vec![Attr::new("free", 12)],
            group: Some("fs".to_string()),
        };
        run_emit(&args).unwrap();

        let text = std::fs::read_to_string(text).unwrap();
        assert!(text.contains(" level=WARN msg=\"disk low\" fs.free=12\n"));
        let json = std::fs::read_to_string(json).unwrap();
        assert!(json.contains("\"fs\":{\"free\":12}"));
    }

    #[test]
    fn test_emit_below_level_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.log");
        let config = write_config(
            dir.path(),
            &format!(
                "[[handlers]]\nname = \"text\"\ntype = \"text\"\nlevel = \"error\"\noutput = {{ file = {:?} }}\n",
                out.display().to_string(),
            ),
        );

        let args = EmitArgs {
            config,
            level: Level::INFO,
            message: "ignored".to_string(),
            attrs: Vec::new(),
            group: None,
        };
        run_emit(&args).unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "");
    }
}
