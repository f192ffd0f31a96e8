//! 模块清单
//!
//! 声明一个构建单元链接哪些库：公有依赖对依赖方可见，
//! 私有依赖只在实现内部使用。清单由模块图消费（见 [`super::graph`]）。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 引擎子系统
///
/// 引擎自带的链接目标。子系统由引擎提供，在模块图中是叶子节点，
/// 图解析永远不会递归进入子系统内部。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineSubsystem {
    /// 基础运行时（容器、内存、平台抽象）
    Core,
    /// 对象模型与反射层
    ObjectModel,
    /// 高层引擎运行时
    Engine,
    /// 渲染核心
    RenderCore,
    /// 渲染硬件接口
    Rhi,
    /// UI 工具套件
    Ui,
    /// UI 核心
    UiCore,
}

impl EngineSubsystem {
    pub fn name(&self) -> &'static str {
        match self {
            EngineSubsystem::Core => "Core",
            EngineSubsystem::ObjectModel => "ObjectModel",
            EngineSubsystem::Engine => "Engine",
            EngineSubsystem::RenderCore => "RenderCore",
            EngineSubsystem::Rhi => "RHI",
            EngineSubsystem::Ui => "UI",
            EngineSubsystem::UiCore => "UICore",
        }
    }
}

/// 模块依赖
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleDependency {
    /// 引擎子系统
    Subsystem(EngineSubsystem),
    /// 其他模块（按名字链接，解析时必须已注册）
    External(String),
}

impl ModuleDependency {
    pub fn name(&self) -> &str {
        match self {
            ModuleDependency::Subsystem(subsystem) => subsystem.name(),
            ModuleDependency::External(name) => name,
        }
    }

    pub fn is_subsystem(&self) -> bool {
        matches!(self, ModuleDependency::Subsystem(_))
    }
}

impl From<EngineSubsystem> for ModuleDependency {
    fn from(subsystem: EngineSubsystem) -> Self {
        ModuleDependency::Subsystem(subsystem)
    }
}

impl From<&str> for ModuleDependency {
    fn from(name: &str) -> Self {
        ModuleDependency::External(name.to_string())
    }
}

impl From<String> for ModuleDependency {
    fn from(name: String) -> Self {
        ModuleDependency::External(name)
    }
}

/// 依赖可见性分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyVisibility {
    /// 接口可见：传递给依赖本模块的模块
    Public,
    /// 仅实现可见：不会泄漏到接口闭包
    Private,
}

/// 预编译头使用模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PchUsage {
    /// 不使用预编译头
    Disabled,
    /// 使用共享预编译头
    Shared,
    /// 优先使用模块显式指定的预编译头，否则回退到共享的
    #[default]
    ExplicitOrShared,
}

impl PchUsage {
    pub fn name(&self) -> &'static str {
        match self {
            PchUsage::Disabled => "Disabled",
            PchUsage::Shared => "Shared",
            PchUsage::ExplicitOrShared => "ExplicitOrShared",
        }
    }
}

/// 清单错误
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Module name must not be empty")]
    EmptyName,

    #[error("Module {0} depends on itself")]
    SelfDependency(String),

    #[error("Module {module} lists {dependency} as both public and private")]
    ConflictingVisibility { module: String, dependency: String },
}

/// 模块清单
///
/// 一个构建单元的声明式链接元数据：模块名、公有/私有依赖列表
/// 和预编译头使用模式。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// 模块名
    pub name: String,
    /// 公有链接依赖（对依赖方可见）
    pub public_dependencies: Vec<ModuleDependency>,
    /// 私有链接依赖（仅实现内部使用）
    pub private_dependencies: Vec<ModuleDependency>,
    /// 预编译头使用模式
    #[serde(default)]
    pub pch_usage: PchUsage,
}

impl ModuleManifest {
    /// 创建一个没有依赖的清单
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public_dependencies: Vec::new(),
            private_dependencies: Vec::new(),
            pch_usage: PchUsage::default(),
        }
    }

    /// 清单构建器
    pub fn builder(name: impl Into<String>) -> ModuleManifestBuilder {
        ModuleManifestBuilder {
            manifest: Self::new(name),
        }
    }

    /// 全部依赖（先公有后私有）
    pub fn all_dependencies(&self) -> impl Iterator<Item = &ModuleDependency> {
        self.public_dependencies
            .iter()
            .chain(self.private_dependencies.iter())
    }

    /// 按名字查询依赖的可见性
    pub fn dependency_visibility(&self, name: &str) -> Option<DependencyVisibility> {
        if self.public_dependencies.iter().any(|d| d.name() == name) {
            return Some(DependencyVisibility::Public);
        }
        if self.private_dependencies.iter().any(|d| d.name() == name) {
            return Some(DependencyVisibility::Private);
        }
        None
    }

    /// 验证清单
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.name.trim().is_empty() {
            return Err(ManifestError::EmptyName);
        }

        for dep in self.all_dependencies() {
            if dep.name() == self.name {
                return Err(ManifestError::SelfDependency(self.name.clone()));
            }
        }

        for dep in &self.public_dependencies {
            if self.private_dependencies.iter().any(|d| d == dep) {
                return Err(ManifestError::ConflictingVisibility {
                    module: self.name.clone(),
                    dependency: dep.name().to_string(),
                });
            }
        }

        Ok(())
    }
}

/// 模块清单构建器
pub struct ModuleManifestBuilder {
    manifest: ModuleManifest,
}

impl ModuleManifestBuilder {
    /// 添加公有依赖
    pub fn public_dependency(mut self, dep: impl Into<ModuleDependency>) -> Self {
        self.manifest.public_dependencies.push(dep.into());
        self
    }

    /// 添加私有依赖
    pub fn private_dependency(mut self, dep: impl Into<ModuleDependency>) -> Self {
        self.manifest.private_dependencies.push(dep.into());
        self
    }

    /// 设置预编译头使用模式
    pub fn pch_usage(mut self, mode: PchUsage) -> Self {
        self.manifest.pch_usage = mode;
        self
    }

    /// 验证并生成清单
    pub fn build(self) -> Result<ModuleManifest, ManifestError> {
        self.manifest.validate()?;
        Ok(self.manifest)
    }
}
