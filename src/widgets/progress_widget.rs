//! Progress widget state (rendering-agnostic)
//!
//! One animator plus one shape. The bar and the ring are the same type with a
//! different [`Shape`], so both get identical animation and restart behavior.
//! Frontends read [`ProgressWidget::geometry`] to draw.

use super::circular_ring::RingShape;
use super::horizontal_bar::BarShape;
use super::shape::{Bounds, ProgressView, Shape};
use crate::core::{AnimatorId, ProgressAnimator, Scheduler, TickToken};
use crate::data::{Color, ProgressConfig, ProgressError, ProgressValue, ResolvedAttributes};
use std::rc::Rc;

pub type HorizontalProgressBar = ProgressWidget<BarShape>;
pub type CircularProgressBar = ProgressWidget<RingShape>;

pub struct ProgressWidget<S> {
    name: String,
    animator: ProgressAnimator,
    shape: S,
}

impl<S: Shape> ProgressWidget<S> {
    pub fn new(name: &str, scheduler: Rc<dyn Scheduler>, config: ProgressConfig, shape: S) -> Self {
        Self {
            name: name.to_string(),
            animator: ProgressAnimator::new(scheduler, config),
            shape,
        }
    }

    /// Build from styled attributes; a non-zero initial progress is applied
    /// right away (and animates if the attributes allow it).
    pub fn from_attributes(
        name: &str,
        scheduler: Rc<dyn Scheduler>,
        attributes: &ResolvedAttributes,
    ) -> Self {
        let mut widget = Self::new(
            name,
            scheduler,
            attributes.config,
            S::from_attributes(attributes),
        );
        if let Some(value) = attributes.initial_progress {
            widget.set_progress(value);
        }
        widget
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> AnimatorId {
        self.animator.id()
    }

    pub fn animator(&self) -> &ProgressAnimator {
        &self.animator
    }

    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn set_progress(&mut self, value: ProgressValue) {
        self.animator.set_target(value);
    }

    pub fn set_progress_value(&mut self, magnitude: f32) -> Result<(), ProgressError> {
        self.animator.set_progress(magnitude)
    }

    pub fn current_progress(&self) -> f32 {
        self.animator.current_progress()
    }

    pub fn target_progress(&self) -> f32 {
        self.animator.target_progress()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn pause(&mut self) {
        self.animator.pause();
    }

    pub fn resume(&mut self) {
        self.animator.resume();
    }

    pub fn reset(&mut self) {
        self.animator.reset();
    }

    /// Deliver a tick addressed to this widget. Returns false for foreign or
    /// stale tokens.
    pub fn handle_tick(&mut self, token: TickToken) -> bool {
        token.owner() == self.animator.id() && self.animator.tick(token)
    }

    pub fn take_redraw(&mut self) -> bool {
        self.animator.take_redraw()
    }

    pub fn on_progress_changed(&mut self, callback: impl FnMut(f32) + 'static) {
        self.animator.set_on_progress_changed(callback);
    }

    pub fn on_progress_complete(&mut self, callback: impl FnMut() + 'static) {
        self.animator.set_on_progress_complete(callback);
    }

    pub fn progress_config(&self) -> &ProgressConfig {
        self.animator.config()
    }

    pub fn set_progress_config(&mut self, config: ProgressConfig) {
        self.animator.reconfigure(config);
    }

    pub fn background_color(&self) -> Color {
        self.progress_config().background_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        let config = self.progress_config().background_color(color);
        self.set_progress_config(config);
    }

    pub fn progress_color(&self) -> Color {
        self.progress_config().progress_color
    }

    pub fn set_progress_color(&mut self, color: Color) {
        let config = self.progress_config().progress_color(color);
        self.set_progress_config(config);
    }

    pub fn is_animation_enabled(&self) -> bool {
        self.progress_config().animation_enabled
    }

    pub fn set_animation_enabled(&mut self, enabled: bool) {
        let config = self.progress_config().animation_enabled(enabled);
        self.set_progress_config(config);
    }

    pub fn is_animate_from_zero(&self) -> bool {
        self.progress_config().animate_from_zero
    }

    pub fn set_animate_from_zero(&mut self, from_zero: bool) {
        let config = self.progress_config().animate_from_zero(from_zero);
        self.set_progress_config(config);
    }

    pub fn animation_duration_ms(&self) -> u64 {
        self.progress_config().animation_duration_ms
    }

    pub fn set_animation_duration_ms(&mut self, duration_ms: u64) {
        let config = self.progress_config().animation_duration_ms(duration_ms);
        self.set_progress_config(config);
    }

    pub fn corner_radius(&self) -> f32 {
        self.progress_config().corner_radius
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        let config = self.progress_config().corner_radius(radius);
        self.set_progress_config(config);
    }

    pub fn view(&self) -> ProgressView {
        ProgressView::of(&self.animator)
    }

    pub fn geometry(&self, bounds: Bounds) -> S::Geometry {
        self.shape.layout(&self.view(), bounds)
    }

    /// Teardown hook for when the owning view goes away.
    pub fn detach(&mut self) {
        self.animator.detach();
    }
}
