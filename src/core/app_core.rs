use super::clock::{Clock, SystemClock};
use super::demo_actions::DemoAction;
use super::scheduler::TickQueue;
use crate::config::{Config, WidgetKind};
use crate::data::ProgressValue;
use crate::widgets::{BarShape, CircularProgressBar, HorizontalProgressBar, ProgressWidget, RingShape, Shape};
use anyhow::{bail, Result};
use crossterm::event::KeyEvent;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A widget plus the title the dashboard shows for it
pub struct Gauge<S> {
    pub title: String,
    pub widget: ProgressWidget<S>,
}

/// Percent counter that runs beside the showcase bar.
///
/// Derived from clock time so it lands on 100 together with the bar.
#[derive(Debug, Clone, Copy)]
pub struct ShowcaseTimer {
    started: Instant,
    duration: Duration,
    paused_at: Option<Instant>,
}

impl ShowcaseTimer {
    pub fn start(now: Instant, duration: Duration) -> Self {
        Self {
            started: now,
            duration,
            paused_at: None,
        }
    }

    pub fn percent(&self, now: Instant) -> u8 {
        if self.duration.is_zero() {
            return 100;
        }
        let now = self.paused_at.unwrap_or(now);
        let elapsed = now.saturating_duration_since(self.started);
        let share = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (share * 100.0).min(100.0) as u8
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.percent(now) >= 100
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.started += now.saturating_duration_since(paused_at);
        }
    }
}

/// Core application state (frontend-agnostic)
///
/// Owns the tick queue and every widget on the dashboard. The frontend feeds it
/// key events and calls [`AppCore::pump_ticks`] once per frame, then renders
/// when `needs_render` is set.
pub struct AppCore<C: Clock = SystemClock> {
    /// Application configuration
    pub config: Config,

    pub rings: Vec<Gauge<RingShape>>,
    pub bars: Vec<Gauge<BarShape>>,

    /// Index into `bars` of the showcase bar
    pub showcase: Option<usize>,
    pub showcase_timer: Option<ShowcaseTimer>,

    /// Animations that ran to completion since startup
    completed: Rc<Cell<u32>>,

    /// Set when any widget asked for a redraw
    pub needs_render: bool,

    /// Application running flag
    pub running: bool,

    queue: Rc<TickQueue<C>>,
    rng: StdRng,
}

impl AppCore<SystemClock> {
    pub fn new(config: Config) -> Result<Self> {
        Self::build(config, TickQueue::new(), StdRng::from_entropy())
    }
}

impl<C: Clock + 'static> AppCore<C> {
    /// Build against a caller-supplied clock with a fixed random seed
    pub fn with_clock(config: Config, clock: C, seed: u64) -> Result<Self> {
        Self::build(config, TickQueue::with_clock(clock), StdRng::seed_from_u64(seed))
    }

    fn build(config: Config, queue: Rc<TickQueue<C>>, rng: StdRng) -> Result<Self> {
        let report = config.validate();
        if let Some(error) = report.errors.first() {
            bail!("Invalid config: {}", error);
        }

        let completed = Rc::new(Cell::new(0));
        let mut rings = Vec::new();
        let mut bars = Vec::new();

        for def in &config.widgets {
            let attributes = def.resolve()?;
            match def.kind {
                WidgetKind::Ring => {
                    let mut widget =
                        CircularProgressBar::from_attributes(&def.name, queue.clone(), &attributes);
                    Self::count_completions(&mut widget, &completed);
                    rings.push(Gauge {
                        title: def.title().to_string(),
                        widget,
                    });
                }
                WidgetKind::Bar => {
                    let mut widget =
                        HorizontalProgressBar::from_attributes(&def.name, queue.clone(), &attributes);
                    Self::count_completions(&mut widget, &completed);
                    bars.push(Gauge {
                        title: def.title().to_string(),
                        widget,
                    });
                }
            }
        }

        let showcase = config
            .demo
            .showcase
            .as_ref()
            .and_then(|name| bars.iter().position(|g| g.widget.name() == name));

        tracing::info!(
            "Dashboard ready: {} rings, {} bars, showcase={:?}",
            rings.len(),
            bars.len(),
            config.demo.showcase
        );

        Ok(Self {
            config,
            rings,
            bars,
            showcase,
            showcase_timer: None,
            completed,
            needs_render: true,
            running: true,
            queue,
            rng,
        })
    }

    fn count_completions<S: Shape>(widget: &mut ProgressWidget<S>, counter: &Rc<Cell<u32>>) {
        let counter = counter.clone();
        widget.on_progress_complete(move || counter.set(counter.get() + 1));
    }

    pub fn clock(&self) -> &C {
        self.queue.clock()
    }

    pub fn completed_animations(&self) -> u32 {
        self.completed.get()
    }

    /// True while any widget still has ticks queued
    pub fn is_busy(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Percent shown by the showcase counter, if a showcase is running
    pub fn showcase_percent(&self) -> Option<u8> {
        self.showcase_timer
            .map(|timer| timer.percent(self.queue.clock().now()))
    }

    /// Deliver every due tick, then collect redraw requests.
    /// Returns the number of ticks delivered.
    pub fn pump_ticks(&mut self) -> usize {
        let tokens = self.queue.drain_due();
        let mut delivered = 0;

        for token in tokens {
            let handled = self.rings.iter_mut().any(|g| g.widget.handle_tick(token))
                || self.bars.iter_mut().any(|g| g.widget.handle_tick(token));
            if handled {
                delivered += 1;
            } else {
                tracing::trace!("Dropped stale tick for {}", token.owner());
            }
        }

        for gauge in &mut self.rings {
            self.needs_render |= gauge.widget.take_redraw();
        }
        for gauge in &mut self.bars {
            self.needs_render |= gauge.widget.take_redraw();
        }

        if let Some(timer) = self.showcase_timer {
            // Counter moves on its own clock, so redraw while it runs
            if !timer.is_finished(self.queue.clock().now()) || self.showcase_animating() {
                self.needs_render = true;
            }
        }

        delivered
    }

    fn showcase_animating(&self) -> bool {
        self.showcase
            .and_then(|idx| self.bars.get(idx))
            .map(|g| g.widget.is_animating())
            .unwrap_or(false)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = self.config.keybinds.resolve(key);
        self.apply(action);
    }

    pub fn apply(&mut self, action: DemoAction) {
        match action {
            DemoAction::Randomize => self.randomize(),
            DemoAction::Showcase => self.start_showcase(),
            DemoAction::PauseAll => self.pause_all(),
            DemoAction::ResumeAll => self.resume_all(),
            DemoAction::ResetAll => self.reset_all(),
            DemoAction::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            DemoAction::None => return,
        }
        self.needs_render = true;
    }

    fn random_value(&mut self) -> Option<ProgressValue> {
        let choice = *self.config.demo.random_choices.choose(&mut self.rng)?;
        match ProgressValue::try_from(choice) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Skipping random choice: {}", e);
                None
            }
        }
    }

    /// New random targets everywhere except the showcase bar; the first bar
    /// also gets the restyle config and the first ring a slower fixed run.
    fn randomize(&mut self) {
        let restyle = self.config.demo.restyle;
        let ring_duration_ms = self.config.demo.ring_duration_ms;
        let ring_target = self.config.demo.ring_target;
        let showcase = self.showcase;

        for idx in 0..self.rings.len() {
            if idx == 0 {
                let ring = &mut self.rings[0].widget;
                ring.set_animation_duration_ms(ring_duration_ms);
                if let Err(e) = ring.set_progress_value(ring_target) {
                    tracing::warn!("Ring target rejected: {}", e);
                }
            } else if let Some(value) = self.random_value() {
                self.rings[idx].widget.set_progress(value);
            }
        }

        for idx in 0..self.bars.len() {
            if Some(idx) == showcase {
                continue;
            }
            if idx == 0 {
                self.bars[0].widget.set_progress_config(restyle);
            }
            if let Some(value) = self.random_value() {
                self.bars[idx].widget.set_progress(value);
            }
        }

        tracing::debug!("Randomized dashboard");
    }

    fn start_showcase(&mut self) {
        let Some(idx) = self.showcase else {
            tracing::debug!("No showcase bar configured");
            return;
        };
        let duration_ms = self.config.demo.showcase_duration_ms;
        let bar = &mut self.bars[idx].widget;
        bar.reset();
        bar.set_animation_duration_ms(duration_ms);
        if let Err(e) = bar.set_progress_value(100.0) {
            tracing::warn!("Showcase rejected: {}", e);
            return;
        }
        self.showcase_timer = Some(ShowcaseTimer::start(
            self.queue.clock().now(),
            Duration::from_millis(duration_ms),
        ));
        tracing::debug!("Showcase started over {}ms", duration_ms);
    }

    fn pause_all(&mut self) {
        for gauge in &mut self.rings {
            gauge.widget.pause();
        }
        for gauge in &mut self.bars {
            gauge.widget.pause();
        }
        let now = self.queue.clock().now();
        if let Some(timer) = &mut self.showcase_timer {
            timer.pause(now);
        }
    }

    fn resume_all(&mut self) {
        for gauge in &mut self.rings {
            gauge.widget.resume();
        }
        for gauge in &mut self.bars {
            gauge.widget.resume();
        }
        let now = self.queue.clock().now();
        if let Some(timer) = &mut self.showcase_timer {
            timer.resume(now);
        }
    }

    fn reset_all(&mut self) {
        for gauge in &mut self.rings {
            gauge.widget.reset();
        }
        for gauge in &mut self.bars {
            gauge.widget.reset();
        }
        self.showcase_timer = None;
    }

    /// Detach every widget so nothing stays queued after shutdown
    pub fn shutdown(&mut self) {
        for gauge in &mut self.rings {
            gauge.widget.detach();
        }
        for gauge in &mut self.bars {
            gauge.widget.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::scheduler::TICK_INTERVAL;
    use approx::assert_abs_diff_eq;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn core() -> AppCore<ManualClock> {
        AppCore::with_clock(Config::embedded().unwrap(), ManualClock::new(), 7).unwrap()
    }

    fn run_for(core: &mut AppCore<ManualClock>, duration: Duration) {
        let end = core.clock().elapsed() + duration;
        core.pump_ticks();
        while core.clock().elapsed() < end {
            core.clock().advance(TICK_INTERVAL);
            core.pump_ticks();
        }
    }

    fn ring_values(core: &AppCore<ManualClock>) -> Vec<f32> {
        core.rings.iter().map(|g| g.widget.current_progress()).collect()
    }

    fn bar_values(core: &AppCore<ManualClock>) -> Vec<f32> {
        core.bars.iter().map(|g| g.widget.current_progress()).collect()
    }

    #[test]
    fn test_initial_values_animate_in() {
        let mut core = core();
        assert!(core.is_busy());
        assert_eq!(ring_values(&core), vec![0.0, 0.0, 0.0]);

        run_for(&mut core, Duration::from_secs(3));

        assert_eq!(ring_values(&core), vec![72.0, 45.0, 88.0]);
        assert_eq!(bar_values(&core), vec![80.0, 55.0, 30.0, 95.0, 0.0]);
        assert!(!core.is_busy());
        assert_eq!(core.completed_animations(), 7);
    }

    #[test]
    fn test_pump_requests_render() {
        let mut core = core();
        core.needs_render = false;
        core.clock().advance(TICK_INTERVAL);
        assert!(core.pump_ticks() > 0);
        assert!(core.needs_render);
    }

    #[test]
    fn test_randomize_applies_showcase_configs() {
        let mut core = core();
        run_for(&mut core, Duration::from_secs(3));
        let showcase_before = core.bars[4].widget.current_progress();

        core.apply(DemoAction::Randomize);

        assert_eq!(core.bars[0].widget.progress_config(), &core.config.demo.restyle);
        assert_eq!(core.rings[0].widget.animation_duration_ms(), 3000);
        assert_eq!(core.rings[0].widget.target_progress(), 80.0);

        let choices: Vec<f32> = core
            .config
            .demo
            .random_choices
            .iter()
            .map(|c| f32::from(*c))
            .collect();
        for gauge in &core.rings[1..] {
            assert!(choices.contains(&gauge.widget.target_progress()));
        }
        for gauge in &core.bars[..4] {
            assert!(choices.contains(&gauge.widget.target_progress()));
        }

        run_for(&mut core, Duration::from_millis(3100));
        assert_eq!(core.rings[0].widget.current_progress(), 80.0);
        assert_eq!(core.bars[4].widget.current_progress(), showcase_before);
        assert!(!core.is_busy());
    }

    #[test]
    fn test_showcase_counter_tracks_bar() {
        let mut core = core();
        run_for(&mut core, Duration::from_secs(3));

        core.apply(DemoAction::Showcase);
        assert_eq!(core.showcase_percent(), Some(0));

        run_for(&mut core, Duration::from_millis(3504));
        let bar = core.bars[4].widget.current_progress();
        let counter = core.showcase_percent().unwrap();
        assert_abs_diff_eq!(bar, 50.0, epsilon = 1.0);
        assert!((49..=51).contains(&counter), "counter at {}", counter);

        run_for(&mut core, Duration::from_millis(3600));
        assert_eq!(core.bars[4].widget.current_progress(), 100.0);
        assert_eq!(core.showcase_percent(), Some(100));
    }

    #[test]
    fn test_pause_and_resume_all() {
        let mut core = core();
        run_for(&mut core, Duration::from_millis(400));
        core.apply(DemoAction::PauseAll);
        let frozen = ring_values(&core);
        assert!(core.rings.iter().all(|g| !g.widget.is_animating()));

        run_for(&mut core, Duration::from_secs(2));
        assert_eq!(ring_values(&core), frozen);

        core.apply(DemoAction::ResumeAll);
        run_for(&mut core, Duration::from_secs(3));
        assert_eq!(ring_values(&core), vec![72.0, 45.0, 88.0]);
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut core = core();
        run_for(&mut core, Duration::from_millis(500));
        core.apply(DemoAction::Showcase);
        core.apply(DemoAction::ResetAll);

        assert!(ring_values(&core).iter().all(|v| *v == 0.0));
        assert!(bar_values(&core).iter().all(|v| *v == 0.0));
        assert!(core.showcase_timer.is_none());
        assert!(!core.is_busy());
    }

    #[test]
    fn test_quit_key_stops_running() {
        let mut core = core();
        core.handle_key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE));
        assert!(core.running);
        core.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!core.running);
    }

    #[test]
    fn test_shutdown_drains_queue() {
        let mut core = core();
        assert!(core.is_busy());
        core.shutdown();
        assert!(!core.is_busy());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config: Config = toml::from_str(
            r#"
            [[widgets]]
            name = "bad"
            kind = "bar"
            attrs = { progress = -5 }
            "#,
        )
        .unwrap();
        assert!(AppCore::with_clock(config, ManualClock::new(), 1).is_err());
    }

    #[test]
    fn test_showcase_timer_pauses() {
        let start = Instant::now();
        let mut timer = ShowcaseTimer::start(start, Duration::from_secs(10));
        assert_eq!(timer.percent(start + Duration::from_secs(2)), 20);

        timer.pause(start + Duration::from_secs(2));
        assert_eq!(timer.percent(start + Duration::from_secs(6)), 20);

        timer.resume(start + Duration::from_secs(6));
        assert_eq!(timer.percent(start + Duration::from_secs(7)), 30);
        assert!(timer.is_finished(start + Duration::from_secs(20)));
    }
}
