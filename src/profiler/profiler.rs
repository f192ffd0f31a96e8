//! 作用域性能分析器
//!
//! 按名字计时：`start_profiling` 记录起点，`end_profiling`
//! 计算耗时、追加一条指标记录并更新该作用域的统计。

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use tracing::{debug, info, trace};

use super::metric::{PerformanceMetric, ScopeStats};

/// 默认指标历史上限
pub const DEFAULT_MAX_HISTORY: usize = 4096;

/// 性能分析器 - 测量和记录命名作用域的耗时
pub struct CustomProfiler {
    start_times: HashMap<String, Instant>,
    metrics: VecDeque<PerformanceMetric>,
    scopes: HashMap<String, ScopeStats>,
    max_history: usize,
    log_events: bool,
}

impl CustomProfiler {
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    /// 指定指标历史上限
    ///
    /// 上限为 0 时不保留单条记录，只维护聚合统计。
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            start_times: HashMap::new(),
            metrics: VecDeque::new(),
            scopes: HashMap::new(),
            max_history,
            log_events: false,
        }
    }

    /// 是否把作用域开始/结束写入日志
    pub fn set_log_events(&mut self, log_events: bool) {
        self.log_events = log_events;
    }

    /// 开始一个命名作用域的测量
    ///
    /// 同名作用域尚未结束时再次调用会覆盖起点，旧的起点被丢弃。
    pub fn start_profiling(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.log_events {
            trace!(target: "profiler", "Started profiling scope: {}", name);
        }
        self.start_times.insert(name, Instant::now());
    }

    /// 结束一个命名作用域的测量
    ///
    /// 没有对应起点时什么都不做。
    pub fn end_profiling(&mut self, name: &str) {
        let Some(start) = self.start_times.remove(name) else {
            trace!(
                target: "profiler",
                "Ignoring end_profiling for scope with no active start: {}",
                name
            );
            return;
        };

        let duration = start.elapsed();
        let metric = PerformanceMetric::new(name, duration);
        if self.log_events {
            debug!(
                target: "profiler",
                "Scope {} finished in {:.3}ms",
                name,
                metric.value_ms
            );
        }

        if self.max_history > 0 {
            if self.metrics.len() >= self.max_history {
                self.metrics.pop_front();
            }
            self.metrics.push_back(metric);
        }

        self.scopes
            .entry(name.to_string())
            .or_insert_with(|| ScopeStats::new(name.to_string()))
            .record(duration);
    }

    /// 作用域是否正在测量中
    pub fn is_profiling(&self, name: &str) -> bool {
        self.start_times.contains_key(name)
    }

    /// 指标记录（最旧的在前面）
    pub fn metrics(&self) -> &VecDeque<PerformanceMetric> {
        &self.metrics
    }

    /// 指标记录的拷贝
    pub fn snapshot(&self) -> Vec<PerformanceMetric> {
        self.metrics.iter().cloned().collect()
    }

    pub fn metric_count(&self) -> usize {
        self.metrics.len()
    }

    /// 获取作用域统计信息
    pub fn stats(&self, name: &str) -> Option<&ScopeStats> {
        self.scopes.get(name)
    }

    /// 获取所有统计信息
    pub fn all_stats(&self) -> Vec<&ScopeStats> {
        self.scopes.values().collect()
    }

    /// 清空所有指标、统计和未结束的起点
    pub fn clear_metrics(&mut self) {
        self.metrics.clear();
        self.scopes.clear();
        self.start_times.clear();
        info!(target: "profiler", "Cleared all performance metrics");
    }

    /// 生成性能报告（按总耗时降序）
    pub fn report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Performance Report ===\n");

        let mut stats: Vec<_> = self.scopes.values().collect();
        stats.sort_by(|a, b| b.total.cmp(&a.total));

        for stat in stats {
            report.push_str(&format!(
                "{}: {} calls, total: {:?}, avg: {:?}, min: {:?}, max: {:?}\n",
                stat.name,
                stat.call_count,
                stat.total,
                stat.average(),
                stat.min,
                stat.max
            ));
        }
        report.push_str(&format!("Recorded metrics: {}\n", self.metrics.len()));
        report.push_str("==========================\n");
        report
    }
}

impl Default for CustomProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// 性能测量作用域守卫 - 使用RAII自动结束测量
pub struct ProfileScope<'a> {
    profiler: &'a mut CustomProfiler,
    name: String,
}

impl<'a> ProfileScope<'a> {
    pub fn new(profiler: &'a mut CustomProfiler, name: impl Into<String>) -> Self {
        let name = name.into();
        profiler.start_profiling(name.clone());
        Self { profiler, name }
    }
}

impl Drop for ProfileScope<'_> {
    fn drop(&mut self) {
        self.profiler.end_profiling(&self.name);
    }
}
