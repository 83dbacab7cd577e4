//! 配置文件格式
//!
//! TOML 为主，JSON 可选；格式由文件扩展名决定，读写两个方向共用同一个枚举。

use std::error::Error;
use std::path::Path;

use contracts::{ContractError, LoggingBlueprint};

type BoxError = Box<dyn Error + Send + Sync>;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML 格式 (推荐)
    Toml,
    /// JSON 格式
    Json,
}

impl ConfigFormat {
    /// 从文件扩展名推断格式 (不区分大小写)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// 从路径推断格式
    pub fn from_path(path: &Path) -> Result<Self, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse(format!(
                "cannot determine config format of {}",
                path.display()
            ))
        })?;
        Self::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    fn label(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }

    /// 解析为 LoggingBlueprint (不做校验)
    pub(crate) fn decode(self, content: &str) -> Result<LoggingBlueprint, ContractError> {
        let decoded: Result<LoggingBlueprint, BoxError> = match self {
            Self::Toml => toml::from_str(content).map_err(Into::into),
            Self::Json => serde_json::from_str(content).map_err(Into::into),
        };
        decoded.map_err(|source| ContractError::ConfigParse {
            message: format!("{} parse error: {source}", self.label()),
            source: Some(source),
        })
    }

    /// 输出为可读文本
    pub(crate) fn encode(self, blueprint: &LoggingBlueprint) -> Result<String, ContractError> {
        let encoded: Result<String, BoxError> = match self {
            Self::Toml => toml::to_string_pretty(blueprint).map_err(Into::into),
            Self::Json => serde_json::to_string_pretty(blueprint).map_err(Into::into),
        };
        encoded.map_err(|e| {
            ContractError::config_parse(format!("{} serialize error: {e}", self.label()))
        })
    }
}
