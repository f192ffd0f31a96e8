//! 全局分析器函数库
//!
//! 提供进程级共享的分析器实例和一组自由函数包装，
//! 方便在拿不到 `App` 或 `World` 的代码里做即时测量。
//!
//! ```rust
//! use custom_performance_profiler::profiler::library;
//!
//! library::profile_function("load_assets");
//! // ... do work ...
//! library::end_profile_function("load_assets");
//!
//! assert!(!library::global_snapshot().is_empty());
//! library::clear_global();
//! ```

use std::sync::{Mutex, OnceLock};

use super::metric::PerformanceMetric;
use super::profiler::CustomProfiler;

/// 全局分析器实例
static GLOBAL_PROFILER: OnceLock<Mutex<CustomProfiler>> = OnceLock::new();

fn global() -> &'static Mutex<CustomProfiler> {
    GLOBAL_PROFILER.get_or_init(|| Mutex::new(CustomProfiler::new()))
}

/// 对全局分析器执行一个操作
///
/// 锁中毒时接管内部值继续执行，不会传播 panic。
pub fn with_profiler<T>(f: impl FnOnce(&mut CustomProfiler) -> T) -> T {
    let mut guard = match global().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    f(&mut guard)
}

/// 在全局分析器上开始一个命名作用域
pub fn profile_function(name: impl Into<String>) {
    let name = name.into();
    with_profiler(|profiler| profiler.start_profiling(name));
}

/// 在全局分析器上结束一个命名作用域
pub fn end_profile_function(name: &str) {
    with_profiler(|profiler| profiler.end_profiling(name));
}

/// 全局指标记录的拷贝
pub fn global_snapshot() -> Vec<PerformanceMetric> {
    with_profiler(|profiler| profiler.snapshot())
}

/// 清空全局分析器
pub fn clear_global() {
    with_profiler(|profiler| profiler.clear_metrics());
}
