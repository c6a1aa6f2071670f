//! Deferred tick scheduling.
//!
//! Animators never call themselves back directly. They hand a [`TickToken`] to a
//! [`Scheduler`], and the host delivers the token back to the owning animator once
//! it is due. A token names its owner and the owner's generation at scheduling
//! time; cancelling bumps the generation, so a token that was already handed out
//! can never mutate state afterwards.

use super::clock::{Clock, SystemClock};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Nominal delay between ticks (~60 steps per second).
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Identifies one animator within a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimatorId(u64);

impl fmt::Display for AnimatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle for one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    owner: AnimatorId,
    generation: u64,
}

impl TickToken {
    pub fn new(owner: AnimatorId, generation: u64) -> Self {
        Self { owner, generation }
    }

    pub fn owner(&self) -> AnimatorId {
        self.owner
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Host-side task queue used cooperatively by every animator on one thread.
pub trait Scheduler {
    fn now(&self) -> Instant;

    /// Hand out a fresh owner id.
    fn register(&self) -> AnimatorId;

    fn schedule(&self, token: TickToken, delay: Duration);

    /// Drop every queued tick of `owner`.
    fn cancel(&self, owner: AnimatorId);

    /// False in preview contexts that have no live timing source; animators
    /// then jump straight to their target.
    fn is_live(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTick {
    token: TickToken,
    due: Instant,
    seq: u64,
}

/// Queue of pending ticks polled by the host's frame loop.
pub struct TickQueue<C: Clock = SystemClock> {
    clock: C,
    next_id: Cell<u64>,
    next_seq: Cell<u64>,
    pending: RefCell<Vec<ScheduledTick>>,
}

impl TickQueue<SystemClock> {
    pub fn new() -> Rc<Self> {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> TickQueue<C> {
    pub fn with_clock(clock: C) -> Rc<Self> {
        Rc::new(Self {
            clock,
            next_id: Cell::new(0),
            next_seq: Cell::new(0),
            pending: RefCell::new(Vec::new()),
        })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Remove and return every tick that is due, earliest first. Ticks scheduled
    /// while the caller dispatches these are left for the next poll.
    pub fn drain_due(&self) -> Vec<TickToken> {
        let now = self.clock.now();
        let mut pending = self.pending.borrow_mut();
        let (mut due, rest): (Vec<_>, Vec<_>) = pending.drain(..).partition(|t| t.due <= now);
        *pending = rest;
        due.sort_by_key(|t| (t.due, t.seq));
        due.into_iter().map(|t| t.token).collect()
    }

    /// Earliest due time, if anything is queued.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.borrow().iter().map(|t| t.due).min()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn pending_for(&self, owner: AnimatorId) -> Vec<TickToken> {
        self.pending
            .borrow()
            .iter()
            .filter(|t| t.token.owner == owner)
            .map(|t| t.token)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl<C: Clock> Scheduler for TickQueue<C> {
    fn now(&self) -> Instant {
        self.clock.now()
    }

    fn register(&self) -> AnimatorId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        AnimatorId(id)
    }

    fn schedule(&self, token: TickToken, delay: Duration) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.pending.borrow_mut().push(ScheduledTick {
            token,
            due: self.clock.now() + delay,
            seq,
        });
    }

    fn cancel(&self, owner: AnimatorId) {
        self.pending.borrow_mut().retain(|t| t.token.owner != owner);
    }
}

/// Scheduler for non-interactive previews: nothing is ever scheduled.
#[derive(Debug, Default)]
pub struct PreviewScheduler {
    next_id: Cell<u64>,
}

impl PreviewScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl Scheduler for PreviewScheduler {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn register(&self) -> AnimatorId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        AnimatorId(id)
    }

    fn schedule(&self, _token: TickToken, _delay: Duration) {}

    fn cancel(&self, _owner: AnimatorId) {}

    fn is_live(&self) -> bool {
        false
    }
}
