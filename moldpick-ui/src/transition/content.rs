//! Content transition state machine
//!
//! Two-segment opacity animation entered once per decide action:
//! opacity fades 1→0, the content swap is applied at the boundary, then
//! opacity fades 0→1 with the same segment duration. The machine is
//! advanced by [`ContentTransition::tick`] with the elapsed time since
//! the previous call; it holds no clock of its own.

use moldpick_common::FadeCurve;
use std::time::Duration;
use tracing::trace;

/// Transition phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No transition in flight; content visible at full opacity
    Idle,
    /// First segment: previous content fading to invisible
    FadingOut,
    /// Second segment: new content fading to visible
    FadingIn,
}

impl Phase {
    /// Stable name used in events
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::FadingOut => "fading_out",
            Phase::FadingIn => "fading_in",
        }
    }
}

/// Result of advancing the machine by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Nothing in flight
    Idle,
    /// Transition advanced; the new opacity to present
    Advanced(f32),
    /// Fade-out just completed: apply the new content now. Reported
    /// exactly once per transition; the fade-in starts on the next tick.
    Swap,
    /// Fade-in just completed; back to idle at full opacity
    Done,
}

/// The two-segment content transition
#[derive(Debug)]
pub struct ContentTransition {
    segment: Duration,
    curve: FadeCurve,
    phase: Phase,
    opacity: f32,
    elapsed: Duration,
}

impl ContentTransition {
    /// Create an idle machine with the given per-segment duration
    pub fn new(segment: Duration, curve: FadeCurve) -> Self {
        Self {
            segment,
            curve,
            phase: Phase::Idle,
            opacity: 1.0,
            elapsed: Duration::ZERO,
        }
    }

    /// Start a transition
    ///
    /// Always stop-and-reset: a begin during a running transition cancels
    /// it and restarts the fade-out from full opacity, so overlapping
    /// timers can never drive the opacity to conflicting end states.
    pub fn begin(&mut self) {
        if self.phase != Phase::Idle {
            trace!(phase = self.phase.as_str(), "restarting in-flight transition");
        }
        self.phase = Phase::FadingOut;
        self.opacity = 1.0;
        self.elapsed = Duration::ZERO;
    }

    /// Advance the machine by `dt`
    pub fn tick(&mut self, dt: Duration) -> Step {
        match self.phase {
            Phase::Idle => Step::Idle,
            Phase::FadingOut => {
                self.elapsed += dt;
                if self.elapsed >= self.segment {
                    // Segment boundary: content swap happens here, the
                    // new content starts invisible
                    self.phase = Phase::FadingIn;
                    self.opacity = 0.0;
                    self.elapsed = Duration::ZERO;
                    Step::Swap
                } else {
                    self.opacity = self.curve.fade_out(self.progress());
                    Step::Advanced(self.opacity)
                }
            }
            Phase::FadingIn => {
                self.elapsed += dt;
                if self.elapsed >= self.segment {
                    self.phase = Phase::Idle;
                    self.opacity = 1.0;
                    self.elapsed = Duration::ZERO;
                    Step::Done
                } else {
                    self.opacity = self.curve.fade_in(self.progress());
                    Step::Advanced(self.opacity)
                }
            }
        }
    }

    fn progress(&self) -> f32 {
        self.elapsed.as_secs_f32() / self.segment.as_secs_f32()
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current opacity in [0, 1]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// True while either segment is in flight
    pub fn is_running(&self) -> bool {
        self.phase != Phase::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEGMENT: Duration = Duration::from_millis(200);
    const FRAME: Duration = Duration::from_millis(20);

    fn machine() -> ContentTransition {
        ContentTransition::new(SEGMENT, FadeCurve::Linear)
    }

    #[test]
    fn test_idle_until_begun() {
        let mut t = machine();
        assert_eq!(t.tick(FRAME), Step::Idle);
        assert_eq!(t.opacity(), 1.0);
        assert!(!t.is_running());
    }

    #[test]
    fn test_full_cycle() {
        let mut t = machine();
        t.begin();
        assert_eq!(t.phase(), Phase::FadingOut);

        let mut swaps = 0;
        let mut done = false;
        let mut prev_opacity = 1.0;

        // 9 frames of fade-out, each strictly darker
        for _ in 0..9 {
            match t.tick(FRAME) {
                Step::Advanced(op) => {
                    assert!(op < prev_opacity);
                    prev_opacity = op;
                }
                other => panic!("expected Advanced, got {:?}", other),
            }
        }

        // 10th frame crosses the segment boundary
        assert_eq!(t.tick(FRAME), Step::Swap);
        swaps += 1;
        assert_eq!(t.phase(), Phase::FadingIn);
        assert_eq!(t.opacity(), 0.0);

        let mut prev_opacity = 0.0;
        for _ in 0..9 {
            match t.tick(FRAME) {
                Step::Advanced(op) => {
                    assert!(op > prev_opacity);
                    prev_opacity = op;
                }
                Step::Swap => {
                    swaps += 1;
                }
                other => panic!("unexpected step {:?}", other),
            }
        }

        assert_eq!(t.tick(FRAME), Step::Done);
        done = true;

        assert_eq!(swaps, 1, "swap must be reported exactly once");
        assert!(done);
        assert_eq!(t.phase(), Phase::Idle);
        assert_eq!(t.opacity(), 1.0);
    }

    #[test]
    fn test_begin_mid_flight_stops_and_resets() {
        let mut t = machine();
        t.begin();

        // Halfway through the fade-out
        for _ in 0..5 {
            t.tick(FRAME);
        }
        assert!(t.opacity() < 1.0);

        // Retrigger: back to the start of a fresh fade-out
        t.begin();
        assert_eq!(t.phase(), Phase::FadingOut);
        assert_eq!(t.opacity(), 1.0);

        // And the restarted transition still swaps exactly once
        let mut swaps = 0;
        loop {
            match t.tick(FRAME) {
                Step::Swap => swaps += 1,
                Step::Done => break,
                _ => {}
            }
        }
        assert_eq!(swaps, 1);
    }

    #[test]
    fn test_begin_during_fade_in_restarts_from_fade_out() {
        let mut t = machine();
        t.begin();

        // Run past the swap into the fade-in
        while t.tick(FRAME) != Step::Swap {}
        t.tick(FRAME);
        assert_eq!(t.phase(), Phase::FadingIn);

        t.begin();
        assert_eq!(t.phase(), Phase::FadingOut);
        assert_eq!(t.opacity(), 1.0);
    }

    #[test]
    fn test_oversized_tick_clamps_to_boundary() {
        let mut t = machine();
        t.begin();

        // One giant frame jumps straight to the swap
        assert_eq!(t.tick(Duration::from_secs(1)), Step::Swap);
        assert_eq!(t.tick(Duration::from_secs(1)), Step::Done);
        assert_eq!(t.opacity(), 1.0);
    }
}
