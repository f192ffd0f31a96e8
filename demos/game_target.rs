//! 游戏目标示例
//!
//! 以游戏目标的形态装配插件：解析构建目标、构建模块宿主、
//! 跑若干帧并打印性能报告。

use custom_performance_profiler::profiler::library;
use custom_performance_profiler::{
    game_target, module_manifest, App, ModuleGraph, ProfilerModule, ProfilerState,
};

fn main() {
    // 初始化日志
    App::init_logging();

    println!("=== Custom Performance Profiler: Game Target ===");

    // 解析游戏构建目标
    let mut graph = ModuleGraph::new();
    if let Err(e) = graph.register(module_manifest()) {
        eprintln!("Failed to register module manifest: {}", e);
        return;
    }
    let resolved = match graph.resolve_target(&game_target()) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Failed to resolve game target: {}", e);
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

    // 跑几帧，顺便用全局函数库测量一段模拟工作
    println!("Running 60 frames...");
    for _ in 0..60 {
        library::profile_function("demo_work");
        std::thread::sleep(std::time::Duration::from_millis(4));
        library::end_profile_function("demo_work");
        app.update();
    }

    let state = app.world.resource::<ProfilerState>();
    println!(
        "Sampled {} frames, average {:.1} FPS",
        state.frames.samples().len(),
        state.frames.average_fps()
    );
    for anomaly in state.frames.detect_anomalies() {
        println!("Anomaly: {}", anomaly);
    }

    // 全局函数库收集的作用域报告
    println!("{}", library::with_profiler(|profiler| profiler.report()));

    app.shutdown();
    println!("Example completed successfully!");
}
