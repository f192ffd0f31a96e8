//! 模块依赖图
//!
//! 收集模块清单并解析构建目标：计算接口闭包、链接闭包和
//! 依赖优先的链接顺序。可见性规则在这里生效，私有依赖
//! 不会传递给依赖方。

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::warn;

use super::manifest::{EngineSubsystem, ManifestError, ModuleDependency, ModuleManifest};
use super::target::{
    BuildSettingsVersion, IncludeOrderVersion, TargetDescriptor, TargetError, TargetKind,
};

/// 依赖图错误
#[derive(Error, Debug)]
pub enum BuildGraphError {
    #[error("Duplicate module: {0}")]
    DuplicateModule(String),

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Dependency cycle detected: {0}")]
    DependencyCycle(String),

    #[error("Target {target} references unregistered module {module}")]
    UnregisteredModule { target: String, module: String },

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Target error: {0}")]
    Target(#[from] TargetError),
}

/// 依赖图结果类型
pub type BuildGraphResult<T> = Result<T, BuildGraphError>;

/// 模块依赖图
///
/// 已注册清单的集合。注册时验证清单本身，解析时才检查
/// 跨模块引用，所以注册顺序不受依赖方向约束。
#[derive(Default)]
pub struct ModuleGraph {
    manifests: HashMap<String, ModuleManifest>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个模块清单
    pub fn register(&mut self, manifest: ModuleManifest) -> BuildGraphResult<()> {
        manifest.validate()?;
        if self.manifests.contains_key(&manifest.name) {
            return Err(BuildGraphError::DuplicateModule(manifest.name));
        }
        self.manifests.insert(manifest.name.clone(), manifest);
        Ok(())
    }

    /// 按名字查询已注册的清单
    pub fn manifest(&self, name: &str) -> Option<&ModuleManifest> {
        self.manifests.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.manifests.contains_key(name)
    }

    pub fn module_count(&self) -> usize {
        self.manifests.len()
    }

    fn lookup(&self, name: &str) -> BuildGraphResult<&ModuleManifest> {
        self.manifests
            .get(name)
            .ok_or_else(|| BuildGraphError::UnknownModule(name.to_string()))
    }

    /// 接口闭包
    ///
    /// 沿公有边传递收集的全部公有依赖。依赖方编译本模块的
    /// 公开接口时需要看到这些依赖。私有依赖不参与。
    pub fn interface_closure(&self, name: &str) -> BuildGraphResult<Vec<ModuleDependency>> {
        self.lookup(name)?;

        let mut closure = Vec::new();
        let mut seen = HashSet::new();
        let mut pending = vec![name.to_string()];
        let mut expanded = HashSet::new();

        while let Some(current) = pending.pop() {
            if !expanded.insert(current.clone()) {
                continue;
            }
            let manifest = self.lookup(&current)?;
            for dep in &manifest.public_dependencies {
                if seen.insert(dep.name().to_string()) {
                    closure.push(dep.clone());
                }
                if let ModuleDependency::External(dep_name) = dep {
                    pending.push(dep_name.clone());
                }
            }
        }

        Ok(closure)
    }

    /// 链接闭包
    ///
    /// 本模块链接时需要的全部依赖：直接依赖（公有加私有），
    /// 外加每个直接外部模块的接口闭包。
    pub fn link_closure(&self, name: &str) -> BuildGraphResult<Vec<ModuleDependency>> {
        let manifest = self.lookup(name)?;

        let mut closure = Vec::new();
        let mut seen = HashSet::new();

        for dep in manifest.all_dependencies() {
            if seen.insert(dep.name().to_string()) {
                closure.push(dep.clone());
            }
        }

        for dep in manifest.all_dependencies() {
            if let ModuleDependency::External(dep_name) = dep {
                for transitive in self.interface_closure(dep_name)? {
                    if seen.insert(transitive.name().to_string()) {
                        closure.push(transitive.clone());
                    }
                }
            }
        }

        Ok(closure)
    }

    /// 依赖优先的链接顺序
    ///
    /// 深度优先后序遍历外部模块边，依赖排在依赖方前面，
    /// 根模块排在最后。遇到环返回 [`BuildGraphError::DependencyCycle`]。
    pub fn link_order(&self, root: &str) -> BuildGraphResult<Vec<String>> {
        let mut order = Vec::new();
        let mut done = HashSet::new();
        let mut path = Vec::new();
        self.visit(root, &mut order, &mut done, &mut path)?;
        Ok(order)
    }

    fn visit(
        &self,
        name: &str,
        order: &mut Vec<String>,
        done: &mut HashSet<String>,
        path: &mut Vec<String>,
    ) -> BuildGraphResult<()> {
        if done.contains(name) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|p| p == name) {
            let mut cycle: Vec<&str> = path[start..].iter().map(String::as_str).collect();
            cycle.push(name);
            return Err(BuildGraphError::DependencyCycle(cycle.join(" -> ")));
        }

        let manifest = self.lookup(name)?;
        path.push(name.to_string());
        for dep in manifest.all_dependencies() {
            if let ModuleDependency::External(dep_name) = dep {
                self.visit(dep_name, order, done, path)?;
            }
        }
        path.pop();

        done.insert(name.to_string());
        order.push(name.to_string());
        Ok(())
    }

    /// 解析构建目标
    ///
    /// 验证目标描述，把每个顶层模块的链接顺序合并成一个
    /// 去重后的模块序列，并按首次出现顺序收集引擎子系统。
    pub fn resolve_target(&self, target: &TargetDescriptor) -> BuildGraphResult<ResolvedTarget> {
        target.validate()?;

        if target.include_order == IncludeOrderVersion::Legacy {
            warn!(
                target: "build_graph",
                "Target {} uses the legacy include order; migrate to the current version",
                target.name
            );
        }

        for module in &target.extra_modules {
            if !self.contains(module) {
                return Err(BuildGraphError::UnregisteredModule {
                    target: target.name.clone(),
                    module: module.clone(),
                });
            }
        }

        let mut modules = Vec::new();
        let mut seen_modules = HashSet::new();
        for module in &target.extra_modules {
            for name in self.link_order(module)? {
                if seen_modules.insert(name.clone()) {
                    modules.push(name);
                }
            }
        }

        let mut subsystems = Vec::new();
        let mut seen_subsystems = HashSet::new();
        for module in &modules {
            let manifest = self.lookup(module)?;
            for dep in manifest.all_dependencies() {
                if let ModuleDependency::Subsystem(subsystem) = dep {
                    if seen_subsystems.insert(*subsystem) {
                        subsystems.push(*subsystem);
                    }
                }
            }
        }

        Ok(ResolvedTarget {
            name: target.name.clone(),
            kind: target.kind,
            build_settings: target.build_settings,
            include_order: target.include_order,
            modules,
            subsystems,
        })
    }
}

/// 解析完成的构建目标
///
/// 链接顺序已经确定，依赖排在依赖方前面。
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTarget {
    pub name: String,
    pub kind: TargetKind,
    pub build_settings: BuildSettingsVersion,
    pub include_order: IncludeOrderVersion,
    /// 依赖优先顺序的模块列表
    pub modules: Vec<String>,
    /// 按首次出现顺序去重的引擎子系统
    pub subsystems: Vec<EngineSubsystem>,
}

impl ResolvedTarget {
    /// 生成可读的解析摘要
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Resolved Target: {} ({}) ===\n",
            self.name,
            self.kind.name()
        ));
        out.push_str(&format!("Build settings: {}\n", self.build_settings.name()));
        out.push_str(&format!("Include order: {}\n", self.include_order.name()));
        out.push_str(&format!("Link order: {}\n", self.modules.join(", ")));
        let subsystems: Vec<&str> = self.subsystems.iter().map(|s| s.name()).collect();
        out.push_str(&format!("Subsystems: {}\n", subsystems.join(", ")));
        out
    }
}
