//! Time-based progress animator shared by every progress widget.
//!
//! The animator owns the displayed (`current`) and requested (`target`) progress
//! and walks `current` toward `target` linearly over the configured duration.
//! Each tick re-derives the position from elapsed clock time, so a late tick
//! never makes the animation run long.
//!
//! All calls happen on one thread. Ticks arrive through [`ProgressAnimator::tick`]
//! with the token the animator handed to its [`Scheduler`]; tokens from an
//! earlier generation are ignored.

use super::scheduler::{AnimatorId, Scheduler, TickToken, TICK_INTERVAL};
use crate::data::{Color, ProgressConfig, ProgressError, ProgressValue};
use std::rc::Rc;
use std::time::{Duration, Instant};

type ChangedCallback = Box<dyn FnMut(f32)>;
type CompleteCallback = Box<dyn FnMut()>;

/// One run from `from` to the target.
#[derive(Debug, Clone, Copy)]
struct AnimationLeg {
    from: f32,
    started_at: Instant,
    duration: Duration,
    /// Start value of the animation this leg belongs to. Survives pause/resume
    /// so a resumed leg only gets the remaining share of the duration.
    origin: f32,
}

pub struct ProgressAnimator {
    id: AnimatorId,
    scheduler: Rc<dyn Scheduler>,
    config: ProgressConfig,
    value: Option<ProgressValue>,
    current: f32,
    target: f32,
    animating: bool,
    generation: u64,
    leg: Option<AnimationLeg>,
    needs_redraw: bool,
    on_progress_changed: Option<ChangedCallback>,
    on_progress_complete: Option<CompleteCallback>,
}

impl ProgressAnimator {
    pub fn new(scheduler: Rc<dyn Scheduler>, config: ProgressConfig) -> Self {
        Self {
            id: scheduler.register(),
            scheduler,
            config,
            value: None,
            current: 0.0,
            target: 0.0,
            animating: false,
            generation: 0,
            leg: None,
            needs_redraw: true,
            on_progress_changed: None,
            on_progress_complete: None,
        }
    }

    pub fn id(&self) -> AnimatorId {
        self.id
    }

    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    pub fn value(&self) -> Option<&ProgressValue> {
        self.value.as_ref()
    }

    pub fn current_progress(&self) -> f32 {
        self.current
    }

    pub fn target_progress(&self) -> f32 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Override color of the last value, else the config's progress color.
    pub fn fill_color(&self) -> Color {
        self.value
            .and_then(|v| v.override_color())
            .unwrap_or(self.config.progress_color)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Consume the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Called on every step, including the final snap to the target.
    pub fn set_on_progress_changed(&mut self, callback: impl FnMut(f32) + 'static) {
        self.on_progress_changed = Some(Box::new(callback));
    }

    /// Called once per animation that runs to completion (or immediate set).
    pub fn set_on_progress_complete(&mut self, callback: impl FnMut() + 'static) {
        self.on_progress_complete = Some(Box::new(callback));
    }

    pub fn set_target(&mut self, value: ProgressValue) {
        self.value = Some(value);
        self.target = value.magnitude();

        if !self.scheduler.is_live() {
            self.jump_to_target();
            return;
        }

        if self.config.animation_enabled {
            let from = self.start_progress();
            self.start_animation(from, self.config.animation_duration(), from);
        } else {
            self.complete_immediately();
        }
    }

    /// Validate and apply a raw magnitude. Nothing changes on error.
    pub fn set_progress(&mut self, magnitude: f32) -> Result<(), ProgressError> {
        let value = ProgressValue::new(magnitude)?;
        self.set_target(value);
        Ok(())
    }

    /// Advance the animation. Returns false when the token is stale (cancelled,
    /// superseded, or addressed to another animator) and nothing changed.
    pub fn tick(&mut self, token: TickToken) -> bool {
        if token.owner() != self.id || token.generation() != self.generation || !self.animating
        {
            tracing::trace!(
                "Animator {} dropped stale tick (generation {} vs {})",
                self.id,
                token.generation(),
                self.generation
            );
            return false;
        }
        let Some(leg) = self.leg else {
            return false;
        };

        let elapsed = self.scheduler.now().saturating_duration_since(leg.started_at);
        if elapsed >= leg.duration {
            tracing::debug!(
                "Animator {} finished - configured: {}ms, actual: {}ms, error: {}ms",
                self.id,
                leg.duration.as_millis(),
                elapsed.as_millis(),
                elapsed.as_millis() as i128 - leg.duration.as_millis() as i128
            );
            self.leg = None;
            self.complete_immediately();
            return true;
        }

        let ratio = (elapsed.as_secs_f64() / leg.duration.as_secs_f64()).clamp(0.0, 1.0);
        let (low, high) = if leg.from <= self.target {
            (leg.from, self.target)
        } else {
            (self.target, leg.from)
        };
        self.current = (leg.from + (self.target - leg.from) * ratio as f32).clamp(low, high);
        tracing::trace!("Animator {} at {:.2}%", self.id, self.current);

        self.needs_redraw = true;
        self.emit_changed();
        // Never sleep past the end of the leg.
        self.scheduler
            .schedule(token, TICK_INTERVAL.min(leg.duration - elapsed));
        true
    }

    /// Replace the config. A running animation restarts only when a timing
    /// field changed; colors and corner radius just trigger a redraw.
    pub fn reconfigure(&mut self, config: ProgressConfig) {
        let previous = std::mem::replace(&mut self.config, config);
        self.needs_redraw = true;

        if previous.timing_matches(&self.config) {
            return;
        }

        if !self.config.animation_enabled {
            if self.animating || self.current != self.target {
                self.complete_immediately();
            }
            return;
        }

        if self.animating {
            let from = self.start_progress();
            tracing::debug!(
                "Animator {} restarting for new config ({}ms, from zero: {})",
                self.id,
                self.config.animation_duration_ms,
                self.config.animate_from_zero
            );
            self.start_animation(from, self.config.animation_duration(), from);
        }
    }

    pub fn pause(&mut self) {
        if !self.animating {
            return;
        }
        self.cancel_ticks();
        self.animating = false;
        tracing::debug!("Animator {} paused at {:.2}%", self.id, self.current);
    }

    /// Continue a paused animation from the displayed value. The leg gets the
    /// share of the configured duration that was left when it was paused.
    pub fn resume(&mut self) {
        if self.animating || !self.config.animation_enabled || self.current == self.target {
            return;
        }

        let origin = self.leg.map(|leg| leg.origin).unwrap_or(self.current);
        let span = self.target - origin;
        let remaining = if span.abs() > f32::EPSILON {
            ((self.target - self.current) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let duration = self.config.animation_duration().mul_f32(remaining);
        tracing::debug!(
            "Animator {} resuming from {:.2}% over {}ms",
            self.id,
            self.current,
            duration.as_millis()
        );
        self.start_animation(self.current, duration, origin);
    }

    pub fn reset(&mut self) {
        self.cancel_ticks();
        self.current = 0.0;
        self.target = 0.0;
        self.value = None;
        self.animating = false;
        self.leg = None;
        self.needs_redraw = true;
    }

    /// Teardown: cancel queued ticks and drop the callbacks so nothing can reach
    /// a disposed owner.
    pub fn detach(&mut self) {
        self.cancel_ticks();
        self.animating = false;
        self.leg = None;
        self.on_progress_changed = None;
        self.on_progress_complete = None;
    }

    fn start_progress(&self) -> f32 {
        if self.config.animate_from_zero {
            0.0
        } else {
            self.current
        }
    }

    fn start_animation(&mut self, from: f32, duration: Duration, origin: f32) {
        if !self.scheduler.is_live() {
            self.jump_to_target();
            return;
        }

        self.cancel_ticks();
        self.current = from;
        self.animating = true;
        self.leg = Some(AnimationLeg {
            from,
            started_at: self.scheduler.now(),
            duration,
            origin,
        });
        self.needs_redraw = true;

        tracing::debug!(
            "Animator {} started - duration: {}ms, from: {:.2}%, target: {:.2}%",
            self.id,
            duration.as_millis(),
            from,
            self.target
        );
        self.scheduler
            .schedule(TickToken::new(self.id, self.generation), Duration::ZERO);
    }

    fn complete_immediately(&mut self) {
        self.cancel_ticks();
        self.current = self.target;
        self.animating = false;
        self.leg = None;
        self.needs_redraw = true;
        self.emit_changed();
        if let Some(callback) = self.on_progress_complete.as_mut() {
            callback();
        }
    }

    /// Preview bypass: no callbacks.
    fn jump_to_target(&mut self) {
        self.cancel_ticks();
        self.current = self.target;
        self.animating = false;
        self.leg = None;
        self.needs_redraw = true;
    }

    fn cancel_ticks(&mut self) {
        self.generation += 1;
        self.scheduler.cancel(self.id);
    }

    fn emit_changed(&mut self) {
        let current = self.current;
        if let Some(callback) = self.on_progress_changed.as_mut() {
            callback(current);
        }
    }
}

impl Drop for ProgressAnimator {
    fn drop(&mut self) {
        self.scheduler.cancel(self.id);
    }
}

impl std::fmt::Debug for ProgressAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressAnimator")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("current", &self.current)
            .field("target", &self.target)
            .field("animating", &self.animating)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
