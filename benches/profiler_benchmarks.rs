use std::hint::black_box;
use criterion::{criterion_group, criterion_main, Criterion};
use custom_performance_profiler::build::ModuleGraph;
use custom_performance_profiler::profiler::{CustomProfiler, FrameProfiler};
use custom_performance_profiler::profiler_module::{game_target, module_manifest};

fn bench_scope_profiling(c: &mut Criterion) {
    c.bench_function("profiler_start_end_scope", |b| {
        let mut profiler = CustomProfiler::new();

        b.iter(|| {
            profiler.start_profiling("bench_scope");
            // 模拟一些工作
            for _ in 0..100 {
                black_box(1 + 1);
            }
            profiler.end_profiling("bench_scope");
        });
    });
}

fn bench_frame_sampling(c: &mut Criterion) {
    c.bench_function("frame_profiler_record_1000_frames", |b| {
        let mut frames = FrameProfiler::new(600);

        b.iter(|| {
            for i in 0..1000u32 {
                frames.record_frame_time(16.0 + (i % 4) as f32);
            }
            black_box(frames.average_fps());
        });
    });
}

fn bench_target_resolution(c: &mut Criterion) {
    c.bench_function("graph_resolve_game_target", |b| {
        let mut graph = ModuleGraph::new();
        graph.register(module_manifest()).unwrap();
        let target = game_target();

        b.iter(|| {
            black_box(graph.resolve_target(&target).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_scope_profiling,
    bench_frame_sampling,
    bench_target_resolution
);
criterion_main!(benches);
