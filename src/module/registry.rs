//! 模块注册表
//!
//! 管理宿主中已注册的引擎模块。构建阶段按清单依赖的拓扑
//! 顺序执行，启动和更新按注册顺序，关闭按注册的反序。

use std::collections::HashSet;

use bevy_ecs::world::World;
use thiserror::Error;

use crate::build::{BuildGraphError, ModuleGraph, ModuleManifest};

use super::{App, EngineModule};

#[derive(Error, Debug)]
pub enum ModuleHostError {
    #[error("Duplicate module: {0}")]
    DuplicateModule(String),

    #[error("Module {module} reports a manifest named {manifest}")]
    ManifestMismatch { module: String, manifest: String },

    #[error("Module {module} failed to build: {reason}")]
    BuildFailed { module: String, reason: String },

    #[error("{0}")]
    Graph(#[from] BuildGraphError),
}

pub type ModuleHostResult<T> = Result<T, ModuleHostError>;

struct RegisteredModule {
    manifest: ModuleManifest,
    module: Box<dyn EngineModule>,
}

/// 模块注册表
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<RegisteredModule>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册模块
    ///
    /// 清单在这里验证，跨模块引用推迟到构建阶段检查，
    /// 所以注册顺序不受依赖方向约束。
    pub fn add<M: EngineModule + 'static>(&mut self, module: M) -> ModuleHostResult<&mut Self> {
        let manifest = module.manifest();
        manifest.validate().map_err(BuildGraphError::from)?;

        if manifest.name != module.name() {
            return Err(ModuleHostError::ManifestMismatch {
                module: module.name().to_string(),
                manifest: manifest.name,
            });
        }
        if self.has_module(&manifest.name) {
            return Err(ModuleHostError::DuplicateModule(manifest.name));
        }

        self.modules.push(RegisteredModule {
            manifest,
            module: Box::new(module),
        });
        Ok(self)
    }

    /// 计算构建顺序（依赖在前）
    fn build_order(&self) -> ModuleHostResult<Vec<String>> {
        let mut graph = ModuleGraph::new();
        for entry in &self.modules {
            graph.register(entry.manifest.clone())?;
        }

        let mut order = Vec::new();
        let mut seen = HashSet::new();
        for entry in &self.modules {
            for name in graph.link_order(&entry.manifest.name)? {
                if seen.insert(name.clone()) {
                    order.push(name);
                }
            }
        }
        Ok(order)
    }

    /// 按依赖顺序构建所有模块
    pub fn build_all(&self, app: &mut App) -> ModuleHostResult<()> {
        let order = self.build_order()?;
        for name in &order {
            if let Some(entry) = self.modules.iter().find(|m| &m.manifest.name == name) {
                entry.module.build(app)?;
            }
        }
        Ok(())
    }

    /// 启动所有模块
    pub fn startup_all(&self, world: &mut World) {
        for entry in &self.modules {
            entry.module.startup(world);
        }
    }

    /// 更新所有模块
    pub fn update_all(&self, world: &mut World) {
        for entry in &self.modules {
            entry.module.update(world);
        }
    }

    /// 关闭所有模块
    pub fn shutdown_all(&self, world: &mut World) {
        for entry in self.modules.iter().rev() {
            entry.module.shutdown(world);
        }
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules.iter().any(|m| m.manifest.name == name)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// 已注册模块的清单列表（注册顺序）
    pub fn manifests(&self) -> Vec<&ModuleManifest> {
        self.modules.iter().map(|m| &m.manifest).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestModule {
        name: &'static str,
        deps: Vec<&'static str>,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl TestModule {
        fn new(name: &'static str, deps: Vec<&'static str>, log: Arc<Mutex<Vec<String>>>) -> Self {
            Self { name, deps, log }
        }
    }

    impl EngineModule for TestModule {
        fn name(&self) -> &str {
            self.name
        }

        fn manifest(&self) -> ModuleManifest {
            let mut builder = ModuleManifest::builder(self.name);
            for dep in &self.deps {
                builder = builder.public_dependency(*dep);
            }
            builder.build().unwrap()
        }

        fn build(&self, _app: &mut App) -> ModuleHostResult<()> {
            self.log.lock().unwrap().push(format!("build:{}", self.name));
            Ok(())
        }

        fn startup(&self, _world: &mut World) {
            self.log
                .lock()
                .unwrap()
                .push(format!("startup:{}", self.name));
        }

        fn shutdown(&self, _world: &mut World) {
            self.log
                .lock()
                .unwrap()
                .push(format!("shutdown:{}", self.name));
        }
    }

    struct MismatchedModule;

    impl EngineModule for MismatchedModule {
        fn name(&self) -> &str {
            "Alpha"
        }

        fn manifest(&self) -> ModuleManifest {
            ModuleManifest::new("Beta")
        }

        fn build(&self, _app: &mut App) -> ModuleHostResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_build_runs_dependencies_first() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry
            .add(TestModule::new("A", vec!["B"], log.clone()))
            .unwrap();
        registry
            .add(TestModule::new("B", vec![], log.clone()))
            .unwrap();

        let mut app = App::new();
        registry.build_all(&mut app).unwrap();

        let events = log.lock().unwrap();
        assert_eq!(*events, vec!["build:B", "build:A"]);
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry
            .add(TestModule::new("A", vec![], log.clone()))
            .unwrap();
        let err = registry
            .add(TestModule::new("A", vec![], log.clone()))
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, ModuleHostError::DuplicateModule(name) if name == "A"));
    }

    #[test]
    fn test_manifest_mismatch_rejected() {
        let mut registry = ModuleRegistry::new();
        let err = registry.add(MismatchedModule).map(|_| ()).unwrap_err();
        assert!(matches!(
            err,
            ModuleHostError::ManifestMismatch { module, manifest }
                if module == "Alpha" && manifest == "Beta"
        ));
    }

    #[test]
    fn test_unknown_dependency_fails_build() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry
            .add(TestModule::new("A", vec!["Ghost"], log.clone()))
            .unwrap();

        let mut app = App::new();
        let err = registry.build_all(&mut app).unwrap_err();
        assert!(matches!(
            err,
            ModuleHostError::Graph(BuildGraphError::UnknownModule(name)) if name == "Ghost"
        ));
    }

    #[test]
    fn test_shutdown_reverses_registration() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry
            .add(TestModule::new("A", vec![], log.clone()))
            .unwrap();
        registry
            .add(TestModule::new("B", vec![], log.clone()))
            .unwrap();

        let mut world = World::new();
        registry.startup_all(&mut world);
        registry.shutdown_all(&mut world);

        let events = log.lock().unwrap();
        assert_eq!(
            *events,
            vec!["startup:A", "startup:B", "shutdown:B", "shutdown:A"]
        );
    }
}
