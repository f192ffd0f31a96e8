//! 统一配置系统
//!
//! 提供TOML/JSON配置文件、环境变量覆盖和验证。

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 性能分析器配置
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct ProfilerConfig {
    /// 是否启用采集
    pub enabled: bool,

    /// 指标记录上限（超出后丢弃最旧记录）
    pub max_metric_history: usize,

    /// 是否把作用域开始/结束写入日志
    pub log_scope_events: bool,

    /// 帧采样配置
    #[serde(default)]
    pub frame: FrameConfig,

    /// 编辑器悬浮面板配置
    #[serde(default)]
    pub overlay: OverlayConfig,
}

impl_default!(ProfilerConfig {
    enabled: true,
    max_metric_history: 4096,
    log_scope_events: false,
    frame: FrameConfig::default(),
    overlay: OverlayConfig::default(),
});

/// 帧采样配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    /// 样本队列容量
    pub sample_capacity: usize,

    /// 采样间隔（帧数，1 表示每帧采样）
    pub sample_interval: u32,

    /// 慢帧硬阈值（毫秒）
    pub slow_frame_ms: f32,

    /// 异常判定倍数（相对窗口平均帧时间）
    pub anomaly_factor: f32,
}

impl_default!(FrameConfig {
    sample_capacity: 600,
    sample_interval: 1,
    slow_frame_ms: 33.3,
    anomaly_factor: 2.5,
});

/// 编辑器悬浮面板配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// 是否显示
    pub visible: bool,

    /// 热点作用域表格最大行数
    pub max_rows: usize,

    /// 低于该帧率进入警告状态
    pub warn_fps: f32,

    /// 低于该帧率进入严重状态
    pub critical_fps: f32,
}

impl_default!(OverlayConfig {
    visible: true,
    max_rows: 10,
    warn_fps: 60.0,
    critical_fps: 30.0,
});

impl ProfilerConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("PROFILER_ENABLED") {
            self.enabled = matches!(val.as_str(), "1" | "true" | "TRUE");
        }

        if let Ok(val) = env::var("PROFILER_MAX_HISTORY") {
            if let Ok(max) = val.parse() {
                self.max_metric_history = max;
            }
        }

        if let Ok(val) = env::var("PROFILER_SAMPLE_INTERVAL") {
            if let Ok(interval) = val.parse() {
                self.frame.sample_interval = interval;
            }
        }

        if let Ok(val) = env::var("PROFILER_SLOW_FRAME_MS") {
            if let Ok(ms) = val.parse() {
                self.frame.slow_frame_ms = ms;
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_metric_history == 0 {
            return Err(ConfigError::ValidationError(
                "max_metric_history must be greater than zero".to_string(),
            ));
        }
        if self.frame.sample_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "frame.sample_capacity must be greater than zero".to_string(),
            ));
        }
        if self.frame.sample_interval == 0 {
            return Err(ConfigError::ValidationError(
                "frame.sample_interval must be greater than zero".to_string(),
            ));
        }
        if self.frame.slow_frame_ms <= 0.0 {
            return Err(ConfigError::ValidationError(
                "frame.slow_frame_ms must be positive".to_string(),
            ));
        }
        if self.frame.anomaly_factor <= 1.0 {
            return Err(ConfigError::ValidationError(
                "frame.anomaly_factor must be greater than 1.0".to_string(),
            ));
        }
        if self.overlay.max_rows == 0 {
            return Err(ConfigError::ValidationError(
                "overlay.max_rows must be greater than zero".to_string(),
            ));
        }
        if self.overlay.critical_fps >= self.overlay.warn_fps {
            return Err(ConfigError::ValidationError(
                "overlay.critical_fps must be below overlay.warn_fps".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ProfilerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.enabled);
        assert_eq!(config.frame.sample_interval, 1);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ProfilerConfig::default();
        config.max_metric_history = 128;
        config.frame.slow_frame_ms = 20.0;

        let content = toml::to_string_pretty(&config).unwrap();
        let parsed = ProfilerConfig::from_toml_str(&content).unwrap();
        assert_eq!(parsed.max_metric_history, 128);
        assert_eq!(parsed.frame.slow_frame_ms, 20.0);
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiler.json");

        let mut config = ProfilerConfig::default();
        config.overlay.max_rows = 5;
        config.save_json(&path).unwrap();

        let loaded = ProfilerConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded.overlay.max_rows, 5);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        // 缺省的节回退到默认值
        let content = r#"
            enabled = false
            max_metric_history = 64
            log_scope_events = true
        "#;
        let config = ProfilerConfig::from_toml_str(content).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.max_metric_history, 64);
        assert_eq!(config.frame.sample_capacity, 600);
        assert_eq!(config.overlay.warn_fps, 60.0);
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("PROFILER_MAX_HISTORY", "99");
        env::set_var("PROFILER_SLOW_FRAME_MS", "50.5");

        let mut config = ProfilerConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.max_metric_history, 99);
        assert_eq!(config.frame.slow_frame_ms, 50.5);

        env::remove_var("PROFILER_MAX_HISTORY");
        env::remove_var("PROFILER_SLOW_FRAME_MS");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ProfilerConfig::default();
        config.frame.sample_interval = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let mut config = ProfilerConfig::default();
        config.overlay.critical_fps = 90.0;
        assert!(config.validate().is_err());

        let mut config = ProfilerConfig::default();
        config.frame.anomaly_factor = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error_reports() {
        let err = ProfilerConfig::from_toml_str("enabled = \"not a bool\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
