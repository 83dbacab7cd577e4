//! LoggingBlueprint - Config Loader 输出
//!
//! 描述完整的日志配置：handler 列表、公共属性、分组。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::{Attr, Level, Value};

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// 完整的日志配置蓝图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingBlueprint {
    /// 配置版本
    #[serde(default)]
    pub version: ConfigVersion,

    /// 所有记录共享的分组 (可选)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// 所有记录共享的属性
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, AttrValue>,

    /// Handler 定义列表 (顺序即分发顺序)
    #[serde(default)]
    pub handlers: Vec<HandlerConfig>,
}

impl LoggingBlueprint {
    /// Blueprint attributes as record attributes, in key order
    pub fn shared_attrs(&self) -> Vec<Attr> {
        self.attrs
            .iter()
            .map(|(key, value)| Attr::new(key.clone(), value.clone()))
            .collect()
    }
}

/// 配置文件中的属性值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<AttrValue> for Value {
    fn from(v: AttrValue) -> Self {
        match v {
            AttrValue::Bool(b) => Value::Bool(b),
            AttrValue::Int(i) => Value::Int(i),
            AttrValue::Float(f) => Value::Float(f),
            AttrValue::String(s) => Value::String(s),
        }
    }
}

/// Handler 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Handler 名称
    pub name: String,

    /// Handler 类型
    #[serde(rename = "type")]
    pub handler_type: HandlerType,

    /// 最低日志级别
    #[serde(default)]
    pub level: Level,

    /// 输出目标
    #[serde(default)]
    pub output: OutputTarget,
}

/// Handler 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerType {
    /// logfmt 文本
    Text,
    /// 每行一个 JSON 对象
    Json,
    /// 转发到 tracing
    Tracing,
}

/// 输出目标
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
    /// 追加写入文件
    File(PathBuf),
}
