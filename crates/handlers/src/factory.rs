//! Build handlers from a [`LoggingBlueprint`]

use std::sync::Arc;

use contracts::{
    HandlerConfig, HandlerType, Logger, LoggingBlueprint, OutputTarget, SharedHandler,
};
use tracing::{debug, info};

use crate::error::BuildError;
use crate::options::HandlerOptions;
use crate::sinks::{JsonHandler, TextHandler, TracingHandler};
use crate::writer::SharedWriter;

fn open_output(name: &str, target: &OutputTarget) -> Result<SharedWriter, BuildError> {
    match target {
        OutputTarget::Stdout => Ok(SharedWriter::stdout()),
        OutputTarget::Stderr => Ok(SharedWriter::stderr()),
        OutputTarget::File(path) => SharedWriter::file(path).map_err(|e| {
            BuildError::handler_creation(name, format!("cannot open {}: {e}", path.display()))
        }),
    }
}

/// Create one leaf handler from its configuration
pub fn create_handler(config: &HandlerConfig) -> Result<SharedHandler, BuildError> {
    let options = HandlerOptions::new(config.level);
    let handler: SharedHandler = match config.handler_type {
        HandlerType::Text => {
            let writer = open_output(&config.name, &config.output)?;
            Arc::new(TextHandler::new(&config.name, writer, options))
        }
        HandlerType::Json => {
            let writer = open_output(&config.name, &config.output)?;
            Arc::new(JsonHandler::new(&config.name, writer, options))
        }
        HandlerType::Tracing => Arc::new(TracingHandler::new(&config.name, options)),
    };

    debug!(
        handler = %config.name,
        kind = ?config.handler_type,
        level = %config.level,
        "Created handler"
    );
    Ok(handler)
}

/// Create every configured handler and compose them into one.
///
/// Blueprint attributes are applied before the group, so they stay at the top
/// level of each record.
pub fn build(blueprint: &LoggingBlueprint) -> Result<SharedHandler, BuildError> {
    let handlers = blueprint
        .handlers
        .iter()
        .map(create_handler)
        .collect::<Result<Vec<_>, _>>()?;

    let mut handler = composer::compose(handlers);

    let attrs = blueprint.shared_attrs();
    if !attrs.is_empty() {
        handler = handler.with_attrs(attrs);
    }
    if let Some(group) = &blueprint.group {
        handler = handler.with_group(group);
    }

    info!(
        handlers = blueprint.handlers.len(),
        shape = %composer::Shape::of(handler.as_ref()),
        "Handlers built"
    );
    Ok(handler)
}

/// [`build`] wrapped in a [`Logger`]
pub fn build_logger(blueprint: &LoggingBlueprint) -> Result<Logger, BuildError> {
    build(blueprint).map(Logger::new)
}
