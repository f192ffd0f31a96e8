//! 构建元数据层
//!
//! 声明式描述插件如何接入宿主构建：模块清单声明链接依赖和
//! 可见性，目标描述声明输出形态，依赖图负责闭包计算和
//! 链接顺序解析。

pub mod graph;
pub mod manifest;
pub mod target;

pub use graph::{BuildGraphError, BuildGraphResult, ModuleGraph, ResolvedTarget};
pub use manifest::{
    DependencyVisibility, EngineSubsystem, ManifestError, ModuleDependency, ModuleManifest,
    ModuleManifestBuilder, PchUsage,
};
pub use target::{
    BuildSettingsVersion, IncludeOrderVersion, TargetDescriptor, TargetError, TargetKind,
};
