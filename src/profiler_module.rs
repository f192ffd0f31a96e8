//! 性能分析器插件模块
//!
//! 把构建清单、目标描述和运行时采集绑定成一个可注册的引擎
//! 模块：清单声明链接依赖（渲染层公开，UI 工具层仅私有），
//! 构建阶段插入采集资源并挂上每帧采样系统。

use bevy_ecs::prelude::*;
use tracing::info;

use crate::build::{EngineSubsystem, ModuleManifest, PchUsage, TargetDescriptor};
use crate::config::ProfilerConfig;
use crate::module::{App, EngineModule, ModuleHostResult};
use crate::profiler::{CustomProfiler, FrameProfiler};

/// 模块名
pub const MODULE_NAME: &str = "CustomPerformanceProfiler";

/// CustomPerformanceProfiler 模块的构建清单
///
/// 渲染相关子系统是公开依赖，UI 工具层只在实现里使用，
/// 保持私有避免泄漏给依赖方。
pub fn module_manifest() -> ModuleManifest {
    ModuleManifest {
        name: MODULE_NAME.to_string(),
        public_dependencies: vec![
            EngineSubsystem::Core.into(),
            EngineSubsystem::ObjectModel.into(),
            EngineSubsystem::Engine.into(),
            EngineSubsystem::RenderCore.into(),
            EngineSubsystem::Rhi.into(),
        ],
        private_dependencies: vec![
            EngineSubsystem::Ui.into(),
            EngineSubsystem::UiCore.into(),
        ],
        pch_usage: PchUsage::ExplicitOrShared,
    }
}

/// 游戏构建目标
pub fn game_target() -> TargetDescriptor {
    TargetDescriptor::game(MODULE_NAME).with_module(MODULE_NAME)
}

/// 编辑器构建目标
pub fn editor_target() -> TargetDescriptor {
    TargetDescriptor::editor("CustomPerformanceProfilerEditor").with_module(MODULE_NAME)
}

/// 采集状态资源
///
/// 模块构建时插入 World，持有作用域分析器和帧采样器。
#[derive(Resource)]
pub struct ProfilerState {
    pub profiler: CustomProfiler,
    pub frames: FrameProfiler,
}

impl ProfilerState {
    pub fn from_config(config: &ProfilerConfig) -> Self {
        let mut profiler = CustomProfiler::with_max_history(config.max_metric_history);
        profiler.set_log_events(config.log_scope_events);

        let mut frames = FrameProfiler::from_config(&config.frame);
        if !config.enabled {
            frames.set_enabled(false);
        }

        Self { profiler, frames }
    }
}

/// 每帧推进帧采样器
pub fn sample_frame(mut state: ResMut<ProfilerState>) {
    state.frames.begin_frame();
}

/// 性能分析器模块
pub struct ProfilerModule {
    config: ProfilerConfig,
}

impl ProfilerModule {
    /// 使用默认配置创建模块
    pub fn new() -> Self {
        Self {
            config: ProfilerConfig::default(),
        }
    }

    /// 使用自定义配置创建模块
    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }
}

impl Default for ProfilerModule {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineModule for ProfilerModule {
    fn name(&self) -> &str {
        MODULE_NAME
    }

    fn manifest(&self) -> ModuleManifest {
        module_manifest()
    }

    fn build(&self, app: &mut App) -> ModuleHostResult<()> {
        app.insert_resource(self.config.clone());
        app.insert_resource(ProfilerState::from_config(&self.config));
        app.add_system(sample_frame);
        Ok(())
    }

    fn startup(&self, _world: &mut World) {
        info!(target: "profiler", "Custom performance profiler module started");
    }

    fn shutdown(&self, world: &mut World) {
        if let Some(mut state) = world.get_resource_mut::<ProfilerState>() {
            state.profiler.clear_metrics();
            state.frames.clear();
        }
        info!(target: "profiler", "Custom performance profiler module shut down");
    }
}
