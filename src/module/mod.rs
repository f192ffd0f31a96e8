//! 模块宿主
//!
//! 提供模块化的宿主架构：模块通过 [`EngineModule`] 接入
//! [`App`]，由注册表统一调度构建、启动、更新和关闭。

use bevy_ecs::prelude::*;

use crate::build::ModuleManifest;

pub mod registry;
pub use registry::{ModuleHostError, ModuleHostResult, ModuleRegistry};

/// 引擎模块 Trait
///
/// 运行时行为和构建清单绑定在同一个实现上，宿主据此
/// 对两者做一致性检查。
pub trait EngineModule: Send + Sync {
    /// 模块名，必须与清单中的名字一致
    fn name(&self) -> &str;

    /// 模块的构建清单
    fn manifest(&self) -> ModuleManifest;

    /// 构建阶段 - 注册资源和系统
    fn build(&self, app: &mut App) -> ModuleHostResult<()>;

    /// 启动阶段 - 初始化运行时状态
    fn startup(&self, _world: &mut World) {}

    /// 更新阶段 - 每帧调用
    fn update(&self, _world: &mut World) {}

    /// 关闭阶段 - 清理资源
    fn shutdown(&self, _world: &mut World) {}
}

/// 模块宿主应用
pub struct App {
    pub world: World,
    pub schedule: Schedule,
    pub startup_schedule: Schedule,
    pub registry: ModuleRegistry,
}

impl App {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            schedule: Schedule::default(),
            startup_schedule: Schedule::default(),
            registry: ModuleRegistry::new(),
        }
    }

    /// 初始化日志
    ///
    /// 配置 tracing 日志框架，日志级别通过 `RUST_LOG`
    /// 环境变量控制。重复调用是无害的。
    pub fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
        tracing::info!(target: "module_host", "Module host starting");
    }

    pub fn insert_resource<R: Resource>(&mut self, resource: R) -> &mut Self {
        self.world.insert_resource(resource);
        self
    }

    pub fn add_system<M>(&mut self, system: impl IntoSystemConfigs<M>) -> &mut Self {
        self.schedule.add_systems(system);
        self
    }

    pub fn add_startup_system<M>(&mut self, system: impl IntoSystemConfigs<M>) -> &mut Self {
        self.startup_schedule.add_systems(system);
        self
    }

    /// 注册模块
    pub fn add_module<M: EngineModule + 'static>(
        &mut self,
        module: M,
    ) -> ModuleHostResult<&mut Self> {
        self.registry.add(module)?;
        Ok(self)
    }

    /// 按依赖顺序构建全部模块
    ///
    /// 构建期间注册表被临时取出，模块不能在 build 里注册新模块。
    /// 这样的注册会让本方法返回 [`ModuleHostError::BuildFailed`]。
    pub fn build_modules(&mut self) -> ModuleHostResult<&mut Self> {
        let registry = std::mem::take(&mut self.registry);
        let result = registry.build_all(self);
        let nested = std::mem::replace(&mut self.registry, registry);
        result?;
        if let Some(manifest) = nested.manifests().first() {
            return Err(ModuleHostError::BuildFailed {
                module: manifest.name.clone(),
                reason: "cannot be added from another module's build".to_string(),
            });
        }
        Ok(self)
    }

    /// 运行启动系统和模块启动钩子
    pub fn run_startup(&mut self) {
        self.startup_schedule.run(&mut self.world);
        self.registry.startup_all(&mut self.world);
    }

    /// 运行一帧
    pub fn update(&mut self) {
        self.schedule.run(&mut self.world);
        self.registry.update_all(&mut self.world);
    }

    /// 关闭应用
    pub fn shutdown(&mut self) {
        self.registry.shutdown_all(&mut self.world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource)]
    struct Marker(u32);

    struct NullModule;

    impl EngineModule for NullModule {
        fn name(&self) -> &str {
            "NullModule"
        }

        fn manifest(&self) -> ModuleManifest {
            ModuleManifest::new("NullModule")
        }

        fn build(&self, app: &mut App) -> ModuleHostResult<()> {
            app.insert_resource(Marker(7));
            Ok(())
        }
    }

    struct NestingModule;

    impl EngineModule for NestingModule {
        fn name(&self) -> &str {
            "NestingModule"
        }

        fn manifest(&self) -> ModuleManifest {
            ModuleManifest::new("NestingModule")
        }

        fn build(&self, app: &mut App) -> ModuleHostResult<()> {
            app.add_module(NullModule)?;
            Ok(())
        }
    }

    #[test]
    fn test_app_builds_modules() {
        let mut app = App::new();
        app.add_module(NullModule).unwrap();
        app.build_modules().unwrap();

        assert_eq!(app.registry.module_count(), 1);
        assert_eq!(app.world.resource::<Marker>().0, 7);
    }

    #[test]
    fn test_module_added_during_build_is_rejected() {
        let mut app = App::new();
        app.add_module(NestingModule).unwrap();

        let err = app.build_modules().map(|_| ()).unwrap_err();
        assert!(matches!(
            err,
            ModuleHostError::BuildFailed { module, .. } if module == "NullModule"
        ));

        // 构建期间的注册不会留在注册表里
        assert!(!app.registry.has_module("NullModule"));
        assert_eq!(app.registry.module_count(), 1);
    }

    #[test]
    fn test_app_runs_schedules() {
        fn bump(mut marker: ResMut<Marker>) {
            marker.0 += 1;
        }

        let mut app = App::new();
        app.insert_resource(Marker(0));
        app.add_system(bump);
        app.update();
        app.update();

        assert_eq!(app.world.resource::<Marker>().0, 2);
    }

    #[test]
    fn test_startup_runs_once_pattern() {
        fn seed(mut marker: ResMut<Marker>) {
            marker.0 = 100;
        }

        let mut app = App::new();
        app.insert_resource(Marker(0));
        app.add_startup_system(seed);
        app.run_startup();

        assert_eq!(app.world.resource::<Marker>().0, 100);
    }
}
