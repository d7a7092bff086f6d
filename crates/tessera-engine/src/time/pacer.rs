use std::time::{Duration, Instant};

/// Wall-clock pacing for a frame-pump loop.
///
/// Sleeps until the next frame deadline derived from the frame rate. When the loop
/// falls more than `max_lag_frames` behind, the deadline is resynchronised to now
/// rather than bursting through the backlog.
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_rate: u32,
    budget: Duration,
    next: Instant,
    max_lag_frames: u32,
}

impl FramePacer {
    pub fn new(frame_rate: u32) -> Self {
        let frame_rate = frame_rate.max(1);
        Self {
            frame_rate,
            budget: budget_for(frame_rate),
            next: Instant::now() + budget_for(frame_rate),
            max_lag_frames: 4,
        }
    }

    /// Sets how many frame budgets the loop may lag before resynchronising.
    pub fn with_max_lag(mut self, frames: u32) -> Self {
        self.max_lag_frames = frames.max(1);
        self
    }

    #[inline]
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Follows a frame-rate change. Zero is ignored.
    pub fn set_frame_rate(&mut self, frame_rate: u32) {
        if frame_rate == 0 || frame_rate == self.frame_rate {
            return;
        }
        self.frame_rate = frame_rate;
        self.budget = budget_for(frame_rate);
    }

    /// Resets the deadline baseline.
    ///
    /// Useful after focus changes or when resuming from suspension.
    pub fn reset(&mut self) {
        self.next = Instant::now() + self.budget;
    }

    /// Blocks until the current frame's deadline, then schedules the next one.
    ///
    /// Returns how long the call slept.
    pub fn wait(&mut self) -> Duration {
        let now = Instant::now();

        if now < self.next {
            let slept = self.next - now;
            std::thread::sleep(slept);
            self.next += self.budget;
            return slept;
        }

        let lag = now.saturating_duration_since(self.next);
        if lag > self.budget * self.max_lag_frames {
            log::debug!("frame pump {lag:?} behind, resynchronising");
            self.next = now + self.budget;
        } else {
            self.next += self.budget;
        }
        Duration::ZERO
    }
}

fn budget_for(frame_rate: u32) -> Duration {
    Duration::from_secs(1) / frame_rate
}
