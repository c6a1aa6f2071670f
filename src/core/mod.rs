//! Core logic layer
//!
//! The progress animator, the tick scheduling it relies on, and the demo
//! dashboard state. NO imports from frontend/ or rendering code.

pub mod animator;
pub mod app_core;
pub mod clock;
pub mod demo_actions;
pub mod scheduler;
pub mod simulation;

pub use animator::ProgressAnimator;
pub use app_core::AppCore;
pub use clock::{Clock, ManualClock, SystemClock};
pub use demo_actions::{DemoAction, DemoKeybinds};
pub use scheduler::{AnimatorId, PreviewScheduler, Scheduler, TickQueue, TickToken, TICK_INTERVAL};
