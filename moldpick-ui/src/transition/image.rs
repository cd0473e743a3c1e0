//! Per-image fade-in state machine
//!
//! Keyed by a source version token: every token change resets opacity to
//! invisible (or pins it to visible when animation is suppressed), and
//! the fade to full opacity starts on image-load completion. Starting a
//! new fade always halts the in-flight one first, so rapid retriggers
//! restart cleanly instead of stacking.

use moldpick_common::FadeCurve;
use std::time::Duration;
use tracing::trace;

/// Per-image fade-in controller
#[derive(Debug)]
pub struct ImageFade {
    duration: Duration,
    curve: FadeCurve,
    animate: bool,
    version: u64,
    opacity: f32,
    elapsed: Option<Duration>,
}

impl ImageFade {
    /// Create a fade controller
    ///
    /// With `animate` off the opacity is pinned to 1 and every other call
    /// is a no-op, mirroring the suppression flag of the original image
    /// widget.
    pub fn new(duration: Duration, curve: FadeCurve, animate: bool) -> Self {
        Self {
            duration,
            curve,
            animate,
            version: 0,
            opacity: if animate { 0.0 } else { 1.0 },
            elapsed: None,
        }
    }

    /// Enable or disable animation for subsequent sources
    pub fn set_animate(&mut self, animate: bool) {
        self.animate = animate;
        if !animate {
            self.opacity = 1.0;
            self.elapsed = None;
        }
    }

    /// The image source (or its version token) changed
    ///
    /// Halts any in-flight fade and resets opacity so the new image
    /// starts invisible until its load completes.
    pub fn on_source_changed(&mut self, version: u64) {
        self.version = version;
        self.elapsed = None;
        self.opacity = if self.animate { 0.0 } else { 1.0 };
    }

    /// The current image finished loading: start the fade-in
    ///
    /// Any fade already in flight is halted and the opacity reset to 0
    /// before the new fade starts; retriggers restart, they never stack.
    pub fn on_load_complete(&mut self) {
        if !self.animate {
            self.opacity = 1.0;
            return;
        }
        if self.elapsed.is_some() {
            trace!(version = self.version, "restarting in-flight image fade");
        }
        self.opacity = 0.0;
        self.elapsed = Some(Duration::ZERO);
    }

    /// Advance an in-flight fade by `dt`; returns the current opacity
    pub fn tick(&mut self, dt: Duration) -> f32 {
        if let Some(elapsed) = self.elapsed.as_mut() {
            *elapsed += dt;
            if *elapsed >= self.duration {
                self.elapsed = None;
                self.opacity = 1.0;
            } else {
                let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
                self.opacity = self.curve.fade_in(t);
            }
        }
        self.opacity
    }

    /// Current opacity in [0, 1]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Current source version token
    pub fn version(&self) -> u64 {
        self.version
    }

    /// True while a fade is in flight
    pub fn is_fading(&self) -> bool {
        self.elapsed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(1000);
    const FRAME: Duration = Duration::from_millis(100);

    fn fade() -> ImageFade {
        ImageFade::new(DURATION, FadeCurve::Linear, true)
    }

    #[test]
    fn test_starts_invisible_when_animating() {
        assert_eq!(fade().opacity(), 0.0);
        assert_eq!(
            ImageFade::new(DURATION, FadeCurve::Linear, false).opacity(),
            1.0
        );
    }

    #[test]
    fn test_load_complete_fades_to_full() {
        let mut f = fade();
        f.on_load_complete();
        assert!(f.is_fading());

        let mut prev = 0.0;
        for _ in 0..9 {
            let op = f.tick(FRAME);
            assert!(op > prev);
            prev = op;
        }
        assert_eq!(f.tick(FRAME), 1.0);
        assert!(!f.is_fading());
    }

    #[test]
    fn test_retrigger_resets_without_stacking() {
        let mut f = fade();
        f.on_load_complete();
        for _ in 0..5 {
            f.tick(FRAME);
        }
        assert!(f.opacity() > 0.0);

        // Rapid retrigger: opacity back to 0, single fresh fade
        f.on_load_complete();
        assert_eq!(f.opacity(), 0.0);
        assert!(f.is_fading());

        // The restarted fade takes the full duration again
        for _ in 0..9 {
            assert!(f.tick(FRAME) < 1.0);
        }
        assert_eq!(f.tick(FRAME), 1.0);
    }

    #[test]
    fn test_source_change_resets_opacity() {
        let mut f = fade();
        f.on_load_complete();
        for _ in 0..5 {
            f.tick(FRAME);
        }

        f.on_source_changed(2);
        assert_eq!(f.version(), 2);
        assert_eq!(f.opacity(), 0.0);
        assert!(!f.is_fading(), "fade restarts only on load completion");
    }

    #[test]
    fn test_no_animate_pins_opacity() {
        let mut f = ImageFade::new(DURATION, FadeCurve::Linear, false);
        f.on_source_changed(1);
        assert_eq!(f.opacity(), 1.0);
        f.on_load_complete();
        assert_eq!(f.opacity(), 1.0);
        assert!(!f.is_fading());
        assert_eq!(f.tick(FRAME), 1.0);
    }

    #[test]
    fn test_disabling_animation_mid_fade_pins() {
        let mut f = fade();
        f.on_load_complete();
        f.tick(FRAME);
        f.set_animate(false);
        assert_eq!(f.opacity(), 1.0);
        assert!(!f.is_fading());
    }
}
