/// Fixed-tick frame scheduling with explicit cancellation
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared stop flag for a render loop
///
/// Clones observe the same flag. Once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Frame timing snapshot
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Monotonic frame counter, starting at zero
    pub index: u64,
    /// Time since the previous tick
    pub dt: Duration,
}

/// Fixed-interval frame clock
///
/// Deadlines advance by one interval per tick. A frame that overruns its
/// deadline moves the next deadline to "now" instead of queueing catch-up
/// frames.
#[derive(Debug, Clone)]
pub struct FrameTicker {
    interval: Duration,
    last: Instant,
    next: Instant,
    index: u64,
}

impl FrameTicker {
    pub fn new(frame_rate: u32) -> Self {
        let interval = Duration::from_secs(1) / frame_rate.max(1);
        let now = Instant::now();
        Self {
            interval,
            last: now,
            next: now + interval,
            index: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next frame is due
    pub fn remaining(&self) -> Duration {
        self.next.saturating_duration_since(Instant::now())
    }

    pub fn is_due(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Mark a frame as started and schedule the next one
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let frame = FrameTime {
            index: self.index,
            dt: now.saturating_duration_since(self.last),
        };

        self.last = now;
        self.next = (self.next + self.interval).max(now);
        self.index = self.index.wrapping_add(1);
        frame
    }
}
