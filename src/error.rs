//! 统一错误处理模块
//!
//! 提供插件范围内的统一错误类型定义。
//!
//! ## 错误类型分层
//!
//! - **构建层错误** (`build::graph`): 模块清单和目标解析的错误
//! - **宿主层错误** (`module::registry`): 模块注册和生命周期的错误
//! - **配置层错误** (`config`): 配置加载和验证的错误
//!
//! `ProfilerPluginError` 可以同时处理以上各层的错误。

use thiserror::Error;

use crate::build::BuildGraphError;
use crate::config::ConfigError;
use crate::module::ModuleHostError;

/// 插件级错误类型
#[derive(Error, Debug)]
pub enum ProfilerPluginError {
    #[error("Build graph error: {0}")]
    BuildGraph(#[from] BuildGraphError),

    #[error("Module host error: {0}")]
    ModuleHost(#[from] ModuleHostError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("General error: {0}")]
    General(String),
}

/// 插件结果类型别名
pub type PluginResult<T> = Result<T, ProfilerPluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let graph_err = BuildGraphError::UnknownModule("Renderer".to_string());
        let plugin_err: ProfilerPluginError = graph_err.into();
        assert!(matches!(plugin_err, ProfilerPluginError::BuildGraph(_)));

        let config_err = ConfigError::ValidationError("bad".to_string());
        let plugin_err: ProfilerPluginError = config_err.into();
        assert!(matches!(plugin_err, ProfilerPluginError::Config(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ProfilerPluginError::General("something broke".to_string());
        assert_eq!(err.to_string(), "General error: something broke");

        let err: ProfilerPluginError = BuildGraphError::DuplicateModule("Core".to_string()).into();
        assert_eq!(err.to_string(), "Build graph error: Duplicate module: Core");
    }
}
