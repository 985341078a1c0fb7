//! Frame scheduling capability.
//!
//! The animator never sleeps or spins. It asks a [`FrameHost`] for the next
//! display refresh and returns; the host later hands the [`FrameHandle`] back
//! through [`Session::on_frame`](crate::session::Session::on_frame). A UI
//! shell maps this onto its own per-refresh callback. [`SteppedHost`] is a
//! deterministic host with a manually advanced clock, used by the CLI to
//! render a transition frame by frame and by tests to fake time.

use std::collections::VecDeque;
use std::time::Duration;

/// Identifies one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Host clock plus per-refresh callback scheduling.
pub trait FrameHost {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;

    /// Ask for one callback on the next refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a requested callback. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Deterministic host: a fixed refresh interval and a clock that only moves
/// when told to.
#[derive(Debug)]
pub struct SteppedHost {
    now: Duration,
    interval: Duration,
    next_id: u64,
    pending: VecDeque<FrameHandle>,
}

impl SteppedHost {
    pub fn new(interval: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            interval,
            next_id: 0,
            pending: VecDeque::new(),
        }
    }

    /// Host refreshing `fps` times per second (at least 1).
    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Move the clock one refresh forward and return every callback due.
    pub fn advance(&mut self) -> Vec<FrameHandle> {
        self.advance_by(self.interval)
    }

    /// Move the clock by `elapsed` and return every callback due.
    pub fn advance_by(&mut self, elapsed: Duration) -> Vec<FrameHandle> {
        self.now += elapsed;
        self.pending.drain(..).collect()
    }

    /// Number of callbacks waiting for the next refresh.
    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }
}

impl Default for SteppedHost {
    fn default() -> Self {
        Self::from_fps(60)
    }
}

impl FrameHost for SteppedHost {
    fn now(&self) -> Duration {
        self.now
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }
}
