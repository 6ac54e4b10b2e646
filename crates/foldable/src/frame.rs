use std::io;
use std::time::{Duration, Instant};

use timerfd::{ClockId, SetTimeFlags, TimerFd, TimerState};

/// Paces animation ticks with a periodic monotonic timer.
pub struct FrameManager {
    frame_gap: Duration,
    current: Option<TimerFd>,
}
impl std::fmt::Debug for FrameManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameManager")
            .field("frame_gap", &self.frame_gap)
            .field("running", &self.current.is_some())
            .finish()
    }
}
impl FrameManager {
    pub fn new(frame_rate: u64) -> Self {
        Self {
            frame_gap: frame_gap(frame_rate),
            current: None,
        }
    }

    pub fn frame_gap(&self) -> Duration {
        self.frame_gap
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    pub fn start(&mut self) -> io::Result<()> {
        if self.current.is_some() {
            return Ok(());
        }
        let mut tfd = TimerFd::new_custom(ClockId::Monotonic, false, true)?;
        tfd.set_state(
            TimerState::Periodic {
                current: self.frame_gap,
                interval: self.frame_gap,
            },
            SetTimeFlags::Default,
        );
        self.current = Some(tfd);
        Ok(())
    }

    /// Block until the next frame is due and return its time. `None` when
    /// stopped.
    pub fn wait_frame(&self) -> Option<Instant> {
        let tfd = self.current.as_ref()?;
        let missed = tfd.read();
        if missed > 1 {
            log::debug!("{} frames dropped", missed - 1);
        }
        Some(Instant::now())
    }

    pub fn stop(&mut self) {
        if let Some(mut tfd) = self.current.take() {
            tfd.set_state(TimerState::Disarmed, SetTimeFlags::Default);
        }
    }
}
impl Drop for FrameManager {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn frame_gap(frame_rate: u64) -> Duration {
    Duration::from_micros(1_000_000 / frame_rate.max(1))
}
