//! Opacity fade curve implementations
//!
//! Provides the easing curves used by the content transition and the
//! per-image fade-in. Curves map normalized time to an opacity
//! multiplier so the callers stay independent of any animation primitive.

use serde::{Deserialize, Serialize};

/// Easing curve for opacity fades
///
/// - Linear: constant rate of change (the original platform convention)
/// - SCurve: smooth acceleration and deceleration
/// - Exponential: slow start, fast finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    /// v(t) = t
    Linear,
    /// v(t) = 0.5 × (1 - cos(π × t))
    SCurve,
    /// v(t) = t²
    Exponential,
}

impl FadeCurve {
    /// Opacity during a fade-in at normalized position `t`
    ///
    /// `t` runs from 0.0 (start of fade) to 1.0 (end); the result is the
    /// opacity to display, 0.0 = invisible, 1.0 = fully visible.
    pub fn fade_in(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            FadeCurve::Linear => t,
            FadeCurve::SCurve => 0.5 * (1.0 - (std::f32::consts::PI * t).cos()),
            FadeCurve::Exponential => t * t,
        }
    }

    /// Opacity during a fade-out at normalized position `t`
    ///
    /// Inverse of [`fade_in`](Self::fade_in): starts at 1.0, ends at 0.0.
    pub fn fade_out(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            FadeCurve::Linear => 1.0 - t,
            FadeCurve::SCurve => 0.5 * (1.0 + (std::f32::consts::PI * t).cos()),
            FadeCurve::Exponential => {
                let inv = 1.0 - t;
                inv * inv
            }
        }
    }

    /// Parse curve from a config string
    ///
    /// Accepts `linear`, `s_curve` (aliases `scurve`, `s-curve`, `cosine`)
    /// and `exponential`, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linear" => Some(FadeCurve::Linear),
            "cosine" | "scurve" | "s-curve" | "s_curve" => Some(FadeCurve::SCurve),
            "exponential" => Some(FadeCurve::Exponential),
            _ => None,
        }
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FadeCurve::Linear => "Linear",
            FadeCurve::SCurve => "S-Curve",
            FadeCurve::Exponential => "Exponential",
        }
    }

    /// All available curve variants
    pub fn all_variants() -> &'static [FadeCurve] {
        &[FadeCurve::Linear, FadeCurve::SCurve, FadeCurve::Exponential]
    }
}

impl Default for FadeCurve {
    /// Default is Linear, matching the original screen's transitions
    fn default() -> Self {
        FadeCurve::Linear
    }
}

impl std::fmt::Display for FadeCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_in_bounds() {
        for curve in FadeCurve::all_variants() {
            let start = curve.fade_in(0.0);
            let end = curve.fade_in(1.0);
            assert!(
                start.abs() < 0.01,
                "{:?} fade-in at 0.0 should be ~0.0, got {}",
                curve,
                start
            );
            assert!(
                (end - 1.0).abs() < 0.01,
                "{:?} fade-in at 1.0 should be ~1.0, got {}",
                curve,
                end
            );
        }
    }

    #[test]
    fn test_fade_out_bounds() {
        for curve in FadeCurve::all_variants() {
            let start = curve.fade_out(0.0);
            let end = curve.fade_out(1.0);
            assert!((start - 1.0).abs() < 0.01);
            assert!(end.abs() < 0.01);
        }
    }

    #[test]
    fn test_fade_in_monotonic() {
        for curve in FadeCurve::all_variants() {
            let mut prev = curve.fade_in(0.0);
            for i in 1..=20 {
                let v = curve.fade_in(i as f32 / 20.0);
                assert!(v >= prev, "{:?} fade-in should not decrease", curve);
                prev = v;
            }
        }
    }

    #[test]
    fn test_position_clamped() {
        assert_eq!(FadeCurve::Linear.fade_in(-1.0), 0.0);
        assert_eq!(FadeCurve::Linear.fade_in(2.0), 1.0);
        assert_eq!(FadeCurve::Linear.fade_out(2.0), 0.0);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(FadeCurve::parse("linear"), Some(FadeCurve::Linear));
        assert_eq!(FadeCurve::parse("cosine"), Some(FadeCurve::SCurve));
        assert_eq!(FadeCurve::parse("s-curve"), Some(FadeCurve::SCurve));
        assert_eq!(FadeCurve::parse("EXPONENTIAL"), Some(FadeCurve::Exponential));
        assert_eq!(FadeCurve::parse("bounce"), None);
        assert_eq!(FadeCurve::parse(""), None);
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(FadeCurve::default(), FadeCurve::Linear);
        assert_eq!(format!("{}", FadeCurve::SCurve), "S-Curve");
    }
}
