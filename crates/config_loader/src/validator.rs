//! 配置校验模块
//!
//! 校验规则：
//! - handler 名称非空且唯一
//! - 文件输出路径非空
//! - group (若存在) 非空
//! - 属性键非空

use std::collections::HashSet;

use contracts::{ContractError, LoggingBlueprint, OutputTarget};

/// 校验 LoggingBlueprint 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(blueprint: &LoggingBlueprint) -> Result<(), ContractError> {
    validate_group(blueprint)?;
    validate_attrs(blueprint)?;
    validate_handler_names(blueprint)?;
    validate_outputs(blueprint)?;
    Ok(())
}

fn validate_group(blueprint: &LoggingBlueprint) -> Result<(), ContractError> {
    match blueprint.group.as_deref() {
        Some(group) if group.trim().is_empty() => Err(ContractError::config_validation(
            "group",
            "group cannot be empty",
        )),
        _ => Ok(()),
    }
}

fn validate_attrs(blueprint: &LoggingBlueprint) -> Result<(), ContractError> {
    if blueprint.attrs.keys().any(|key| key.is_empty()) {
        return Err(ContractError::config_validation(
            "attrs",
            "attribute key cannot be empty",
        ));
    }
    Ok(())
}

/// 校验 handler 名称唯一性
fn validate_handler_names(blueprint: &LoggingBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, handler) in blueprint.handlers.iter().enumerate() {
        if handler.name.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("handlers[{idx}].name"),
                "handler name cannot be empty",
            ));
        }
        if !seen.insert(handler.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("handlers[name={}]", handler.name),
                "duplicate handler name",
            ));
        }
    }
    Ok(())
}

fn validate_outputs(blueprint: &LoggingBlueprint) -> Result<(), ContractError> {
    for handler in &blueprint.handlers {
        if let OutputTarget::File(path) = &handler.output {
            if path.as_os_str().is_empty() {
                return Err(ContractError::config_validation(
                    format!("handlers[{}].output.file", handler.name),
                    "file path cannot be empty",
                ));
            }
        }
    }
    Ok(())
}
