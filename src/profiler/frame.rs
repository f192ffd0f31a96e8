//! 帧采样分析器
//!
//! 持续收集帧时间样本，用于跟踪运行时的帧率表现。
//!
//! ## 功能特性
//!
//! - 持续收集帧时间和帧率样本
//! - 固定大小的样本队列，内存不会无限增长
//! - 可配置的采样间隔，降低采集开销
//! - 慢帧和帧时间尖峰检测
//!
//! ## 使用示例
//!
//! ```rust
//! use custom_performance_profiler::FrameProfiler;
//!
//! let mut profiler = FrameProfiler::new(600);
//! profiler.record_frame_time(16.7);
//! profiler.record_frame_time(16.9);
//!
//! assert_eq!(profiler.samples().len(), 2);
//! assert!(profiler.average_fps() > 59.0);
//! ```

use std::collections::VecDeque;
use std::time::{Instant, SystemTime};

use crate::config::FrameConfig;

/// 帧样本
///
/// 单帧的性能指标快照。
#[derive(Debug, Clone)]
pub struct FrameSample {
    /// 帧序号（从 1 开始计数）
    pub frame_number: u64,
    /// 采样时刻
    pub timestamp: SystemTime,
    /// 帧时间（毫秒）
    pub frame_time_ms: f32,
    /// 帧率（FPS）
    pub fps: f32,
}

/// 帧采样分析器
///
/// 每次 [`begin_frame`](Self::begin_frame) 测量与上一次调用的
/// 间隔。第一次调用只建立基准，不产生样本。
pub struct FrameProfiler {
    /// 帧样本队列
    samples: VecDeque<FrameSample>,
    /// 最大样本数量
    max_samples: usize,
    /// 上一帧的时刻
    last_frame_time: Option<Instant>,
    /// 是否启用
    enabled: bool,
    /// 采样间隔（帧数）
    sample_interval: u32,
    /// 帧计数
    frame_count: u64,
    /// 慢帧硬阈值（毫秒）
    slow_frame_ms: f32,
    /// 尖峰判定倍数
    anomaly_factor: f32,
}

impl FrameProfiler {
    /// 创建帧采样分析器
    ///
    /// `max_samples` 是样本队列容量，达到容量后最旧的样本被移除。
    pub fn new(max_samples: usize) -> Self {
        Self::from_config(&FrameConfig {
            sample_capacity: max_samples,
            ..FrameConfig::default()
        })
    }

    /// 按配置创建
    pub fn from_config(config: &FrameConfig) -> Self {
        Self {
            samples: VecDeque::with_capacity(config.sample_capacity),
            max_samples: config.sample_capacity,
            last_frame_time: None,
            enabled: true,
            sample_interval: config.sample_interval.max(1),
            frame_count: 0,
            slow_frame_ms: config.slow_frame_ms,
            anomaly_factor: config.anomaly_factor,
        }
    }

    /// 开始新的一帧
    ///
    /// 测量与上一次调用的间隔并记录样本。第一次调用只建立
    /// 时间基准。未启用时直接返回。
    pub fn begin_frame(&mut self) {
        if !self.enabled {
            return;
        }

        let now = Instant::now();
        let Some(last) = self.last_frame_time.replace(now) else {
            return;
        };

        let frame_time_ms = now.duration_since(last).as_secs_f32() * 1000.0;
        self.push_frame(frame_time_ms);
    }

    /// 直接记录一个帧时间（毫秒）
    ///
    /// 跳过时钟测量，帧时间由调用方提供。采样间隔照常生效。
    pub fn record_frame_time(&mut self, frame_time_ms: f32) {
        if !self.enabled {
            return;
        }
        self.push_frame(frame_time_ms);
    }

    fn push_frame(&mut self, frame_time_ms: f32) {
        self.frame_count += 1;

        // 只在采样间隔时记录
        if self.frame_count % u64::from(self.sample_interval) != 0 {
            return;
        }
        if self.max_samples == 0 {
            return;
        }

        let fps = if frame_time_ms > 0.0 {
            1000.0 / frame_time_ms
        } else {
            0.0
        };

        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(FrameSample {
            frame_number: self.frame_count,
            timestamp: SystemTime::now(),
            frame_time_ms,
            fps,
        });
    }

    /// 所有帧样本（最早的在前面）
    pub fn samples(&self) -> &VecDeque<FrameSample> {
        &self.samples
    }

    /// 最近一个样本
    pub fn latest(&self) -> Option<&FrameSample> {
        self.samples.back()
    }

    /// 平均帧时间（毫秒），没有样本时返回 0.0
    pub fn average_frame_time_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.samples.iter().map(|s| s.frame_time_ms).sum();
        sum / self.samples.len() as f32
    }

    /// 平均帧率，没有样本时返回 0.0
    pub fn average_fps(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.samples.iter().map(|s| s.fps).sum();
        sum / self.samples.len() as f32
    }

    /// 最低帧率，没有样本时返回 0.0
    pub fn min_fps(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s.fps).fold(f32::MAX, f32::min)
    }

    /// 最高帧率，没有样本时返回 0.0
    pub fn max_fps(&self) -> f32 {
        self.samples.iter().map(|s| s.fps).fold(0.0, f32::max)
    }

    /// 检测性能异常
    ///
    /// 检测规则：
    /// - 窗口平均帧时间超过慢帧阈值时报告慢帧警告
    /// - 最近 10 个样本中出现超过平均帧时间指定倍数的尖峰时报告
    ///
    /// 返回检测到的异常描述列表，没有异常时为空。
    pub fn detect_anomalies(&self) -> Vec<String> {
        let mut anomalies = Vec::new();
        if self.samples.is_empty() {
            return anomalies;
        }

        let average = self.average_frame_time_ms();
        if average > self.slow_frame_ms {
            anomalies.push(format!(
                "Slow average frame time: {:.2}ms (budget: {:.2}ms)",
                average, self.slow_frame_ms
            ));
        }

        for sample in self.samples.iter().rev().take(10) {
            if sample.frame_time_ms > average * self.anomaly_factor {
                anomalies.push(format!(
                    "Frame time spike detected: {:.2}ms (avg: {:.2}ms)",
                    sample.frame_time_ms, average
                ));
                break;
            }
        }

        anomalies
    }

    /// 清空样本并重置基准
    pub fn clear(&mut self) {
        self.samples.clear();
        self.frame_count = 0;
        self.last_frame_time = None;
    }

    /// 设置是否启用
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// 设置采样间隔（帧数），最小值为 1
    pub fn set_sample_interval(&mut self, interval: u32) {
        self.sample_interval = interval.max(1);
    }
}

impl Default for FrameProfiler {
    fn default() -> Self {
        Self::from_config(&FrameConfig::default())
    }
}
