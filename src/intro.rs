//! Preload-gated reveal that unlocks the page.
//!
//! The sequencer is driven entirely by [`IntroEvent`]s and answers with
//! [`IntroEffect`]s for the host to carry out (timers, the reveal tween,
//! mounting and unmounting). Two fallback timers bound the whole sequence:
//! one forces `assets_loaded`, the other forces `content_visible`.

use serde_json::json;

use crate::config::MotionConfig;
use crate::motion::{Easing, Style, Timeline, Tween};
use crate::state::UiState;
use crate::targets::TargetGroup;
use crate::telemetry::{LogLevel, Logger};

/// Index of the scale-and-fade stage in [`reveal_timeline`].
pub const REVEAL_STAGE: usize = 1;

const ROTATE_DEGREES: f64 = 10.0;
const ROTATE_SECONDS: f64 = 1.5;
const SCALE_TO: f64 = 8.0;
const SCALE_SECONDS: f64 = 1.5;
const SCALE_OVERLAP_SECONDS: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetOutcome {
    Loaded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IntroEvent {
    AssetSettled(AssetOutcome),
    SettleDelayElapsed,
    LoadFallbackElapsed,
    RevealProgress(f64),
    RevealCompleted,
    VisibilityFallbackElapsed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroEffect {
    ScheduleLoadFallback(u32),
    ScheduleVisibilityFallback(u32),
    ScheduleSettleDelay(u32),
    StartReveal,
    ShowContent,
    RemoveIntroVisual,
}

/// Rotate the mask, then scale it up and fade it out, the second stage
/// overlapping the end of the first.
pub fn reveal_timeline() -> Timeline<TargetGroup> {
    Timeline::new()
        .then(
            TargetGroup::IntroMask,
            Tween::to(Style::new().rotate(ROTATE_DEGREES), ROTATE_SECONDS).ease(Easing::Power4InOut),
        )
        .then(
            TargetGroup::IntroMask,
            Tween::to(Style::new().scale(SCALE_TO).opacity(0.0), SCALE_SECONDS)
                .ease(Easing::ExpoInOut)
                .delay(-SCALE_OVERLAP_SECONDS),
        )
}

#[derive(Debug)]
pub struct IntroSequencer {
    asset_count: usize,
    settled: usize,
    failed: usize,
    settle_delay_ms: u32,
    load_fallback_ms: u32,
    visibility_fallback_ms: u32,
    reveal_threshold: f64,
    started: bool,
    settle_scheduled: bool,
    reveal_started: bool,
    visual_mounted: bool,
    logger: Logger,
}

impl IntroSequencer {
    pub fn new(asset_count: usize, config: &MotionConfig, logger: Logger) -> Self {
        Self {
            asset_count,
            settled: 0,
            failed: 0,
            settle_delay_ms: config.settle_delay_ms,
            load_fallback_ms: config.load_fallback_ms,
            visibility_fallback_ms: config.visibility_fallback_ms,
            reveal_threshold: config.reveal_threshold,
            started: false,
            settle_scheduled: false,
            reveal_started: false,
            visual_mounted: true,
            logger,
        }
    }

    pub fn settled(&self) -> usize {
        self.settled
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn intro_visual_mounted(&self) -> bool {
        self.visual_mounted
    }

    /// Arm both fallbacks. Calling it again does nothing.
    pub fn start(&mut self) -> Vec<IntroEffect> {
        if std::mem::replace(&mut self.started, true) {
            return Vec::new();
        }

        self.logger.info(
            "intro.start",
            json!({
                "assets": self.asset_count,
                "loadFallbackMs": self.load_fallback_ms,
                "visibilityFallbackMs": self.visibility_fallback_ms,
            }),
        );

        let mut effects = vec![
            IntroEffect::ScheduleLoadFallback(self.load_fallback_ms),
            IntroEffect::ScheduleVisibilityFallback(self.visibility_fallback_ms),
        ];
        if self.asset_count == 0 {
            effects.extend(self.schedule_settle());
        }
        effects
    }

    pub fn handle(&mut self, ui: &mut UiState, event: IntroEvent) -> Vec<IntroEffect> {
        match event {
            IntroEvent::AssetSettled(outcome) => self.on_asset_settled(outcome),
            IntroEvent::SettleDelayElapsed => self.mark_loaded(ui, "settled"),
            IntroEvent::LoadFallbackElapsed => self.mark_loaded(ui, "fallback"),
            IntroEvent::RevealProgress(progress) => {
                if !self.reveal_started || progress < self.reveal_threshold {
                    return Vec::new();
                }
                self.show_content(ui, "threshold")
            }
            IntroEvent::RevealCompleted => {
                if !self.reveal_started {
                    return Vec::new();
                }
                let mut effects = self.show_content(ui, "completed");
                effects.extend(self.remove_visual());
                effects
            }
            IntroEvent::VisibilityFallbackElapsed => {
                let mut effects = self.show_content(ui, "fallback");
                effects.extend(self.remove_visual());
                effects
            }
        }
    }

    fn on_asset_settled(&mut self, outcome: AssetOutcome) -> Vec<IntroEffect> {
        if self.settled >= self.asset_count {
            self.logger.debug(
                "intro.asset_ignored",
                json!({ "settled": self.settled, "assets": self.asset_count }),
            );
            return Vec::new();
        }

        self.settled += 1;
        if outcome == AssetOutcome::Failed {
            self.failed += 1;
            self.logger.warn(
                "intro.asset_failed",
                json!({ "settled": self.settled, "assets": self.asset_count }),
            );
        }

        if self.settled == self.asset_count {
            self.schedule_settle()
        } else {
            Vec::new()
        }
    }

    fn schedule_settle(&mut self) -> Vec<IntroEffect> {
        if std::mem::replace(&mut self.settle_scheduled, true) {
            return Vec::new();
        }
        vec![IntroEffect::ScheduleSettleDelay(self.settle_delay_ms)]
    }

    fn mark_loaded(&mut self, ui: &mut UiState, path: &str) -> Vec<IntroEffect> {
        if !ui.mark_assets_loaded() {
            self.logger.debug(
                "intro.assets_loaded_ignored",
                json!({ "path": path, "phase": ui.phase().as_str() }),
            );
            return Vec::new();
        }

        self.reveal_started = true;
        self.logger.info(
            "intro.assets_loaded",
            json!({ "path": path, "settled": self.settled, "failed": self.failed }),
        );
        vec![IntroEffect::StartReveal]
    }

    fn show_content(&mut self, ui: &mut UiState, path: &str) -> Vec<IntroEffect> {
        if !ui.reveal_content() {
            self.logger
                .debug("intro.content_visible_ignored", json!({ "path": path }));
            return Vec::new();
        }

        let level = if path == "fallback" {
            LogLevel::Warn
        } else {
            LogLevel::Info
        };
        self.logger
            .event(level, "intro.content_visible", json!({ "path": path }));
        vec![IntroEffect::ShowContent]
    }

    fn remove_visual(&mut self) -> Vec<IntroEffect> {
        if !std::mem::replace(&mut self.visual_mounted, false) {
            return Vec::new();
        }
        vec![IntroEffect::RemoveIntroVisual]
    }
}
