//! Headless animation run against a manual clock.
//!
//! Drives one animator through the same tick queue the dashboard uses and
//! records every step, so timing can be inspected without a terminal.

use super::animator::ProgressAnimator;
use super::clock::{Clock, ManualClock};
use super::scheduler::{TickQueue, TICK_INTERVAL};
use crate::data::{ProgressConfig, ProgressError};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationStep {
    pub elapsed: Duration,
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub steps: Vec<SimulationStep>,
    /// Clock time when the completion callback fired
    pub completed_at: Option<Duration>,
}

impl SimulationReport {
    pub fn final_progress(&self) -> Option<f32> {
        self.steps.last().map(|s| s.progress)
    }
}

/// Animate from `start` to `target` and record each change. Gives up after
/// twice the configured duration plus one tick.
pub fn simulate(
    config: ProgressConfig,
    start: Option<f32>,
    target: f32,
) -> Result<SimulationReport, ProgressError> {
    let queue = TickQueue::with_clock(ManualClock::new());
    let mut animator = ProgressAnimator::new(queue.clone(), config);

    if let Some(start) = start {
        // Settle on the start value without animating
        animator.reconfigure(config.animation_enabled(false));
        animator.set_progress(start)?;
        animator.reconfigure(config);
    }

    let steps = Rc::new(RefCell::new(Vec::new()));
    let completed_at = Rc::new(RefCell::new(None));
    {
        let steps = steps.clone();
        let queue = queue.clone();
        animator.set_on_progress_changed(move |progress| {
            steps.borrow_mut().push(SimulationStep {
                elapsed: queue.clock().elapsed(),
                progress,
            });
        });
    }
    {
        let completed_at = completed_at.clone();
        let queue = queue.clone();
        animator.set_on_progress_complete(move || {
            *completed_at.borrow_mut() = Some(queue.clock().elapsed());
        });
    }

    animator.set_progress(target)?;

    let limit = config.animation_duration() * 2 + TICK_INTERVAL;
    loop {
        for token in queue.drain_due() {
            animator.tick(token);
        }
        if queue.is_empty() || queue.clock().elapsed() > limit {
            break;
        }
        // Jump straight to the next tick so short final legs land on time
        if let Some(due) = queue.next_due() {
            let now = queue.clock().now();
            queue.clock().advance(due.saturating_duration_since(now));
        }
    }
    animator.detach();

    let steps = steps.borrow().clone();
    let completed_at = *completed_at.borrow();
    Ok(SimulationReport {
        steps,
        completed_at,
    })
}
