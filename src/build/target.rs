//! 构建目标描述
//!
//! 目标描述一次完整构建的输出形态（游戏或编辑器），
//! 以及参与链接的顶层模块列表和构建设置版本。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 目标类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// 游戏运行时目标
    Game,
    /// 编辑器目标
    Editor,
}

impl TargetKind {
    pub fn name(&self) -> &'static str {
        match self {
            TargetKind::Game => "Game",
            TargetKind::Editor => "Editor",
        }
    }
}

/// 构建设置版本
///
/// 控制默认编译选项的版本号。新目标一律使用 V2，
/// V1 只为迁移旧项目保留。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildSettingsVersion {
    V1,
    #[default]
    V2,
}

impl BuildSettingsVersion {
    pub fn name(&self) -> &'static str {
        match self {
            BuildSettingsVersion::V1 => "V1",
            BuildSettingsVersion::V2 => "V2",
        }
    }
}

/// 头文件包含顺序版本
///
/// 旧版顺序依赖传递包含，解析目标时会发出警告。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IncludeOrderVersion {
    Legacy,
    #[default]
    Current,
}

impl IncludeOrderVersion {
    pub fn name(&self) -> &'static str {
        match self {
            IncludeOrderVersion::Legacy => "Legacy",
            IncludeOrderVersion::Current => "Current",
        }
    }
}

/// 目标错误
#[derive(Error, Debug)]
pub enum TargetError {
    #[error("Target name must not be empty")]
    EmptyName,

    #[error("Target {target} lists module {module} more than once")]
    DuplicateModuleEntry { target: String, module: String },
}

/// 构建目标描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// 目标名
    pub name: String,
    /// 目标类型
    pub kind: TargetKind,
    /// 构建设置版本
    #[serde(default)]
    pub build_settings: BuildSettingsVersion,
    /// 头文件包含顺序版本
    #[serde(default)]
    pub include_order: IncludeOrderVersion,
    /// 注册进该目标构建的模块名
    pub extra_modules: Vec<String>,
}

impl TargetDescriptor {
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            build_settings: BuildSettingsVersion::default(),
            include_order: IncludeOrderVersion::default(),
            extra_modules: Vec::new(),
        }
    }

    /// 创建游戏目标
    pub fn game(name: impl Into<String>) -> Self {
        Self::new(name, TargetKind::Game)
    }

    /// 创建编辑器目标
    pub fn editor(name: impl Into<String>) -> Self {
        Self::new(name, TargetKind::Editor)
    }

    /// 注册一个模块进该目标的构建
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.extra_modules.push(module.into());
        self
    }

    pub fn with_build_settings(mut self, version: BuildSettingsVersion) -> Self {
        self.build_settings = version;
        self
    }

    pub fn with_include_order(mut self, version: IncludeOrderVersion) -> Self {
        self.include_order = version;
        self
    }

    /// 验证目标描述
    pub fn validate(&self) -> Result<(), TargetError> {
        if self.name.trim().is_empty() {
            return Err(TargetError::EmptyName);
        }

        for (i, module) in self.extra_modules.iter().enumerate() {
            if self.extra_modules[..i].contains(module) {
                return Err(TargetError::DuplicateModuleEntry {
                    target: self.name.clone(),
                    module: module.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_current() {
        let target = TargetDescriptor::game("MyGame").with_module("MyModule");
        assert_eq!(target.kind, TargetKind::Game);
        assert_eq!(target.build_settings, BuildSettingsVersion::V2);
        assert_eq!(target.include_order, IncludeOrderVersion::Current);
        assert!(target.validate().is_ok());
    }

    #[test]
    fn test_editor_target() {
        let target = TargetDescriptor::editor("MyGameEditor").with_module("MyModule");
        assert_eq!(target.kind, TargetKind::Editor);
        assert_eq!(target.name, "MyGameEditor");
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = TargetDescriptor::game("").validate().unwrap_err();
        assert!(matches!(err, TargetError::EmptyName));
    }

    #[test]
    fn test_rejects_duplicate_module() {
        let err = TargetDescriptor::game("MyGame")
            .with_module("MyModule")
            .with_module("MyModule")
            .validate()
            .unwrap_err();
        assert!(matches!(err, TargetError::DuplicateModuleEntry { .. }));
    }

    #[test]
    fn test_serde_defaults_fill_in() {
        let json = r#"{"name": "Partial", "kind": "Game", "extra_modules": []}"#;
        let target: TargetDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(target.build_settings, BuildSettingsVersion::V2);
        assert_eq!(target.include_order, IncludeOrderVersion::Current);
    }
}
