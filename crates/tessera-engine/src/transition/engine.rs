use std::path::Path;

use crate::error::GraphicsResult;
use crate::surface::FrameBuffer;

use super::{TransitionMap, blend_frames};

/// Observable phase of the transition state machine.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TransitionPhase {
    Idle,
    /// A frame has been captured; waiting for `transition()`.
    Frozen,
    Transitioning,
}

#[derive(Debug)]
struct ActiveTransition {
    frozen: FrameBuffer,
    map: Option<TransitionMap>,
    duration: u32,
    elapsed: u32,
    vagueness: f32,
}

impl ActiveTransition {
    fn progress(&self) -> f32 {
        if self.duration == 0 {
            1.0
        } else {
            self.elapsed as f32 / self.duration as f32
        }
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Frozen(FrameBuffer),
    Transitioning(ActiveTransition),
}

/// Two-phase freeze/blend screen transition.
///
/// `Idle -> Frozen (freeze) -> Transitioning (transition) -> Idle (last frame presented)`
///
/// While transitioning the engine exclusively owns the frozen capture; every
/// [`step`](Self::step) produces one presented frame.
#[derive(Debug, Default)]
pub struct TransitionEngine {
    state: State,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TransitionPhase {
        match self.state {
            State::Idle => TransitionPhase::Idle,
            State::Frozen(_) => TransitionPhase::Frozen,
            State::Transitioning(_) => TransitionPhase::Transitioning,
        }
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, State::Transitioning(_))
    }

    /// Progress of the next frame to be presented, while transitioning.
    pub fn progress(&self) -> Option<f32> {
        match &self.state {
            State::Transitioning(t) => Some(t.progress()),
            _ => None,
        }
    }

    /// Captures `screen` as the frame to transition from.
    ///
    /// Repeated calls replace the capture (last call wins). During a running
    /// transition only the captured image changes; progress is kept.
    pub fn freeze(&mut self, screen: &FrameBuffer) -> GraphicsResult<()> {
        let capture = screen.try_clone()?;

        match &mut self.state {
            State::Transitioning(t) => t.frozen = capture,
            state => *state = State::Frozen(capture),
        }
        Ok(())
    }

    /// Starts blending from the frozen frame, loading `map_path` as the threshold map.
    ///
    /// A map that cannot be loaded degrades to a linear cross-fade. Returns `false`
    /// (and changes nothing) unless a frame is currently frozen.
    pub fn transition(&mut self, duration: i32, map_path: Option<&Path>, vagueness: f32) -> bool {
        let (width, height) = match &self.state {
            State::Frozen(frozen) => (frozen.width(), frozen.height()),
            _ => {
                log::debug!("transition() ignored: no frozen frame");
                return false;
            }
        };

        let map = map_path.and_then(|path| match TransitionMap::load(path, width, height) {
            Ok(map) => Some(map),
            Err(e) => {
                log::warn!("{e}: falling back to a linear cross-fade");
                None
            }
        });

        self.transition_with_map(duration, map, vagueness)
    }

    /// Like [`transition`](Self::transition) with an already built map (`None` = cross-fade).
    pub fn transition_with_map(
        &mut self,
        duration: i32,
        map: Option<TransitionMap>,
        vagueness: f32,
    ) -> bool {
        let frozen = match std::mem::take(&mut self.state) {
            State::Frozen(frozen) => frozen,
            other => {
                self.state = other;
                log::debug!("transition() ignored: no frozen frame");
                return false;
            }
        };

        let duration = duration.max(0) as u32;
        let vagueness = if vagueness.is_finite() {
            vagueness.clamp(0.0, 1.0)
        } else {
            0.0
        };

        log::debug!(
            "transition: {duration} frames, vagueness {vagueness}, {}",
            if map.is_some() { "threshold map" } else { "cross-fade" }
        );

        self.state = State::Transitioning(ActiveTransition {
            frozen,
            map,
            duration,
            elapsed: 0,
            vagueness,
        });
        true
    }

    /// Produces one transition frame from `current` into `out`.
    ///
    /// Returns the progress that was presented, or `None` when not transitioning
    /// (in which case `out` is left untouched). After presenting progress `1.0`
    /// the captured buffers are dropped and the engine is idle again.
    pub fn step(&mut self, current: &FrameBuffer, out: &mut FrameBuffer) -> Option<f32> {
        let State::Transitioning(t) = &mut self.state else {
            return None;
        };

        let progress = t.progress();
        blend_frames(&t.frozen, current, t.map.as_ref(), progress, t.vagueness, out);

        if t.elapsed >= t.duration {
            log::debug!("transition finished");
            self.state = State::Idle;
        } else {
            t.elapsed += 1;
        }
        Some(progress)
    }

    /// Jumps a running transition to its final frame. There is no rollback.
    pub fn skip(&mut self) {
        if let State::Transitioning(t) = &mut self.state {
            t.elapsed = t.duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Rgba8;

    fn frame(px: Rgba8) -> FrameBuffer {
        FrameBuffer::try_new(4, 4, px).unwrap()
    }

    #[test]
    fn transition_requires_freeze() {
        let mut engine = TransitionEngine::new();
        assert!(!engine.transition(10, None, 0.0));
        assert_eq!(engine.phase(), TransitionPhase::Idle);

        engine.freeze(&frame(Rgba8::BLACK)).unwrap();
        assert_eq!(engine.phase(), TransitionPhase::Frozen);
        assert!(engine.transition(10, None, 0.0));
        assert_eq!(engine.phase(), TransitionPhase::Transitioning);

        // Second transition() in the same cycle has no frozen frame to use.
        assert!(!engine.transition(10, None, 0.0));
        assert!(engine.is_transitioning());
    }

    #[test]
    fn duration_n_presents_n_plus_one_frames() {
        let mut engine = TransitionEngine::new();
        engine.freeze(&frame(Rgba8::BLACK)).unwrap();
        engine.transition(4, None, 0.0);

        let current = frame(Rgba8::WHITE);
        let mut out = frame(Rgba8::TRANSPARENT);
        let mut seen = Vec::new();
        while let Some(p) = engine.step(&current, &mut out) {
            seen.push(p);
        }

        assert_eq!(seen, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(out, current);
        assert_eq!(engine.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn negative_duration_is_an_immediate_cut() {
        let mut engine = TransitionEngine::new();
        engine.freeze(&frame(Rgba8::BLACK)).unwrap();
        engine.transition(-5, None, 0.3);

        let current = frame(Rgba8::WHITE);
        let mut out = frame(Rgba8::TRANSPARENT);
        assert_eq!(engine.step(&current, &mut out), Some(1.0));
        assert_eq!(out, current);
        assert_eq!(engine.step(&current, &mut out), None);
    }

    #[test]
    fn refreeze_replaces_capture() {
        let mut engine = TransitionEngine::new();
        engine.freeze(&frame(Rgba8::WHITE)).unwrap();
        engine.freeze(&frame(Rgba8::BLACK)).unwrap();
        engine.transition(2, None, 0.0);

        let current = frame(Rgba8::WHITE);
        let mut out = frame(Rgba8::TRANSPARENT);
        engine.step(&current, &mut out);
        assert_eq!(out.get(0, 0), Some(Rgba8::BLACK));
    }

    #[test]
    fn freeze_while_transitioning_keeps_progress() {
        let mut engine = TransitionEngine::new();
        engine.freeze(&frame(Rgba8::BLACK)).unwrap();
        engine.transition(2, None, 0.0);

        let current = frame(Rgba8::WHITE);
        let mut out = frame(Rgba8::TRANSPARENT);
        engine.step(&current, &mut out);
        engine.freeze(&frame(Rgba8::rgb(255, 0, 0))).unwrap();
        assert_eq!(engine.progress(), Some(0.5));
    }

    #[test]
    fn skip_jumps_to_final_frame() {
        let mut engine = TransitionEngine::new();
        engine.freeze(&frame(Rgba8::BLACK)).unwrap();
        engine.transition(100, None, 0.0);
        engine.skip();

        let current = frame(Rgba8::WHITE);
        let mut out = frame(Rgba8::TRANSPARENT);
        assert_eq!(engine.step(&current, &mut out), Some(1.0));
        assert_eq!(engine.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn missing_map_falls_back_to_cross_fade() {
        let mut engine = TransitionEngine::new();
        engine.freeze(&frame(Rgba8::BLACK)).unwrap();
        assert!(engine.transition(2, Some(Path::new("no/such/map.png")), 0.5));

        let current = frame(Rgba8::WHITE);
        let mut out = frame(Rgba8::TRANSPARENT);
        engine.step(&current, &mut out);
        engine.step(&current, &mut out);
        // Uniform mid-grey: every pixel got the same linear weight.
        assert!(out.pixels().iter().all(|&p| p == Rgba8::rgb(128, 128, 128)));
    }
}
