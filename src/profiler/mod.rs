//! 性能分析引擎
//!
//! - [`profiler`] - 命名作用域计时和聚合统计
//! - [`frame`] - 帧时间采样和异常检测
//! - [`library`] - 进程级共享分析器的函数库
//! - [`metric`] - 指标数据类型

pub mod frame;
pub mod library;
pub mod metric;
pub mod profiler;

pub use frame::{FrameProfiler, FrameSample};
pub use metric::{PerformanceMetric, ScopeStats};
pub use profiler::{CustomProfiler, ProfileScope, DEFAULT_MAX_HISTORY};
