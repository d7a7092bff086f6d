/// Frame rate used when none is configured.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Logical frame clock.
///
/// Counts scheduler invocations, not wall time: `tick()` advances by exactly one.
/// Pacing against real time is the job of [`FramePacer`](super::FramePacer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameClock {
    frame_count: u64,
    frame_rate: u32,
}

impl FrameClock {
    /// Creates a clock at frame 0. A zero `frame_rate` falls back to the default.
    pub fn new(frame_rate: u32) -> Self {
        let frame_rate = if frame_rate == 0 {
            log::warn!("frame rate 0 is invalid, using {DEFAULT_FRAME_RATE}");
            DEFAULT_FRAME_RATE
        } else {
            frame_rate
        };

        Self {
            frame_count: 0,
            frame_rate,
        }
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Stores `value` verbatim. Used by save/load and debug tooling.
    #[inline]
    pub fn set_frame_count(&mut self, value: u64) {
        self.frame_count = value;
    }

    #[inline]
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Sets the target frame rate. Zero is rejected and the previous rate kept.
    pub fn set_frame_rate(&mut self, value: u32) {
        if value == 0 {
            log::warn!("ignoring frame rate 0, keeping {}", self.frame_rate);
            return;
        }
        self.frame_rate = value;
    }

    /// Rewinds the counter to 0.
    #[inline]
    pub fn reset(&mut self) {
        self.frame_count = 0;
    }

    /// Advances one frame. Wraps on overflow.
    #[inline]
    pub fn tick(&mut self) -> u64 {
        self.frame_count = self.frame_count.wrapping_add(1);
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_by_one() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn reset_always_returns_to_zero() {
        let mut clock = FrameClock::default();
        clock.set_frame_count(12_345);
        clock.reset();
        assert_eq!(clock.frame_count(), 0);
    }

    #[test]
    fn zero_frame_rate_is_rejected() {
        let mut clock = FrameClock::new(40);
        clock.set_frame_rate(0);
        assert_eq!(clock.frame_rate(), 40);
        clock.set_frame_rate(30);
        assert_eq!(clock.frame_rate(), 30);
        assert_eq!(FrameClock::new(0).frame_rate(), DEFAULT_FRAME_RATE);
    }

    #[test]
    fn counter_wraps() {
        let mut clock = FrameClock::default();
        clock.set_frame_count(u64::MAX);
        assert_eq!(clock.tick(), 0);
    }
}
