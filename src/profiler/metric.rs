//! 指标数据类型

use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

/// 单次完成的测量记录
///
/// 时间戳在作用域结束时取墙上时钟，耗时以毫秒保存。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    /// 作用域名
    pub name: String,
    /// 耗时（毫秒）
    pub value_ms: f64,
    /// 测量结束时刻
    pub timestamp: SystemTime,
}

impl PerformanceMetric {
    pub fn new(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            value_ms: duration.as_secs_f64() * 1000.0,
            timestamp: SystemTime::now(),
        }
    }
}

/// 作用域统计信息
#[derive(Debug, Clone)]
pub struct ScopeStats {
    pub name: String,
    pub total: Duration,
    pub call_count: u64,
    pub min: Duration,
    pub max: Duration,
}

impl ScopeStats {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            total: Duration::ZERO,
            call_count: 0,
            min: Duration::MAX,
            max: Duration::ZERO,
        }
    }

    pub(crate) fn record(&mut self, duration: Duration) {
        self.total += duration;
        self.call_count += 1;
        self.min = self.min.min(duration);
        self.max = self.max.max(duration);
    }

    /// 平均耗时
    pub fn average(&self) -> Duration {
        if self.call_count > 0 {
            self.total.div_f64(self.call_count as f64)
        } else {
            Duration::ZERO
        }
    }
}
