//! 编辑器性能悬浮面板
//!
//! 编辑器目标专用：展示当前帧率、聚合统计和热点作用域，
//! 按帧率阈值分级着色。仅在启用 `editor` feature 时编译。

use egui::Color32;

use crate::config::OverlayConfig;
use crate::profiler_module::ProfilerState;

/// 告警级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertLevel {
    /// 信息
    Info = 0,
    /// 警告
    Warning = 1,
    /// 严重
    Critical = 2,
}

impl AlertLevel {
    /// 按帧率和配置阈值分级
    pub fn for_fps(fps: f32, config: &OverlayConfig) -> Self {
        if fps < config.critical_fps {
            AlertLevel::Critical
        } else if fps < config.warn_fps {
            AlertLevel::Warning
        } else {
            AlertLevel::Info
        }
    }

    /// 面板显示颜色
    pub fn color(&self) -> Color32 {
        match self {
            AlertLevel::Info => Color32::GREEN,
            AlertLevel::Warning => Color32::YELLOW,
            AlertLevel::Critical => Color32::RED,
        }
    }

    /// 面板显示文字
    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::Info => "Excellent",
            AlertLevel::Warning => "Good",
            AlertLevel::Critical => "Poor",
        }
    }
}

/// 性能悬浮面板
pub struct ProfilerOverlay {
    config: OverlayConfig,
}

impl ProfilerOverlay {
    pub fn new() -> Self {
        Self {
            config: OverlayConfig::default(),
        }
    }

    pub fn with_config(config: OverlayConfig) -> Self {
        Self { config }
    }

    /// 最近采样帧对应的告警级别，还没有样本时返回 None
    pub fn alert_level(&self, state: &ProfilerState) -> Option<AlertLevel> {
        state
            .frames
            .latest()
            .map(|sample| AlertLevel::for_fps(sample.fps, &self.config))
    }

    /// 渲染悬浮面板
    pub fn render(&self, ui: &mut egui::Ui, state: &ProfilerState) {
        if !self.config.visible {
            return;
        }

        ui.heading("Performance Profiler");
        ui.separator();

        // 当前帧率和帧时间
        if let Some(sample) = state.frames.latest() {
            let level = AlertLevel::for_fps(sample.fps, &self.config);
            ui.label(format!("FPS: {:.1}", sample.fps));
            ui.label(format!("Frame Time: {:.2} ms", sample.frame_time_ms));
            ui.colored_label(level.color(), format!("Status: {}", level.label()));
        } else {
            ui.label("No frame samples yet");
        }

        ui.separator();

        // FPS统计
        if !state.frames.samples().is_empty() {
            ui.label(format!("Average FPS: {:.1}", state.frames.average_fps()));
            ui.label(format!("Min FPS: {:.1}", state.frames.min_fps()));
            ui.label(format!("Max FPS: {:.1}", state.frames.max_fps()));
            ui.label(format!(
                "Average Frame Time: {:.2} ms",
                state.frames.average_frame_time_ms()
            ));
        }

        ui.separator();

        // 热点作用域（按总耗时降序）
        let mut stats = state.profiler.all_stats();
        stats.sort_by(|a, b| b.total.cmp(&a.total));

        if stats.is_empty() {
            ui.label("No profiler data available");
        } else {
            ui.label("Hot Scopes:");
            for stat in stats.iter().take(self.config.max_rows) {
                ui.horizontal(|ui| {
                    ui.label(&stat.name);
                    ui.label(format!("{:.2} ms", stat.average().as_secs_f64() * 1000.0));
                    ui.label(format!("({} calls)", stat.call_count));
                });
            }
        }
    }
}

impl Default for ProfilerOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfilerConfig;

    fn sample_state() -> ProfilerState {
        let mut state = ProfilerState::from_config(&ProfilerConfig::default());
        state.profiler.start_profiling("update");
        state.profiler.end_profiling("update");
        state.frames.record_frame_time(16.0);
        state
    }

    #[test]
    fn test_alert_level_thresholds() {
        let config = OverlayConfig::default();
        assert_eq!(AlertLevel::for_fps(120.0, &config), AlertLevel::Info);
        assert_eq!(AlertLevel::for_fps(45.0, &config), AlertLevel::Warning);
        assert_eq!(AlertLevel::for_fps(15.0, &config), AlertLevel::Critical);
        assert!(AlertLevel::Critical > AlertLevel::Warning);
    }

    #[test]
    fn test_alert_level_presentation() {
        assert_eq!(AlertLevel::Info.label(), "Excellent");
        assert_eq!(AlertLevel::Warning.label(), "Good");
        assert_eq!(AlertLevel::Critical.label(), "Poor");
        assert_eq!(AlertLevel::Info.color(), Color32::GREEN);
    }

    #[test]
    fn test_overlay_alert_from_state() {
        let overlay = ProfilerOverlay::new();

        // 16ms 帧时间对应 62.5 FPS，高于警告阈值
        let state = sample_state();
        assert_eq!(overlay.alert_level(&state), Some(AlertLevel::Info));

        let empty = ProfilerState::from_config(&ProfilerConfig::default());
        assert_eq!(overlay.alert_level(&empty), None);
    }

    #[test]
    fn test_render_headless() {
        let ctx = egui::Context::default();
        let state = sample_state();
        let overlay = ProfilerOverlay::new();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                overlay.render(ui, &state);
            });
        });
    }
}
