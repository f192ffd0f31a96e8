//! 编辑器目标示例
//!
//! 以编辑器目标的形态装配插件，逐帧评估悬浮面板的告警分级，
//! 并做一次无头渲染（实际绘制需要宿主提供的窗口）。

use custom_performance_profiler::editor::ProfilerOverlay;
use custom_performance_profiler::{
    editor_target, module_manifest, App, ModuleGraph, ProfilerModule, ProfilerState,
};

fn main() {
    App::init_logging();

    println!("=== Custom Performance Profiler: Editor Target ===");

    // 解析编辑器构建目标
    let mut graph = ModuleGraph::new();
    if let Err(e) = graph.register(module_manifest()) {
        eprintln!("Failed to register module manifest: {}", e);
        return;
    }
    let resolved = match graph.resolve_target(&editor_target()) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Failed to resolve editor target: {}", e);
            return;
        }
    };
    println!("{}", resolved.summary());

    // 构建模块宿主
    let mut app = App::new();
    if let Err(e) = app.add_module(ProfilerModule::new()) {
        eprintln!("Failed to register profiler module: {}", e);
        return;
    }
    if let Err(e) = app.build_modules() {
        eprintln!("Failed to build modules: {}", e);
        return;
    }
    app.run_startup();

    let overlay = ProfilerOverlay::new();

    // 模拟帧循环：帧时间逐帧抬升，观察告警分级变化
    for i in 0..8u64 {
        {
            let mut state = app.world.resource_mut::<ProfilerState>();
            state.profiler.start_profiling("editor_tick");
        }
        std::thread::sleep(std::time::Duration::from_millis(4 * i));
        {
            let mut state = app.world.resource_mut::<ProfilerState>();
            state.profiler.end_profiling("editor_tick");
        }
        app.update();

        let state = app.world.resource::<ProfilerState>();
        if let (Some(sample), Some(level)) = (state.frames.latest(), overlay.alert_level(state)) {
            println!(
                "Frame {}: {:.2} ms ({:.1} FPS) -> {}",
                sample.frame_number, sample.frame_time_ms, sample.fps,
                level.label()
            );
        }
    }

    // 无头渲染一次面板，验证编辑器路径可用
    let ctx = egui::Context::default();
    let state = app.world.resource::<ProfilerState>();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            overlay.render(ui, state);
        });
    });
    println!("Overlay rendered headlessly");

    println!("{}", app.world.resource::<ProfilerState>().profiler.report());

    app.shutdown();
    println!("Example completed successfully!");
}
