//! Easing curves and the numeric counter animator.
//!
//! Time is always injected by the caller (milliseconds from the host's
//! animation clock), so every animation here is a deterministic function of
//! the timestamps it is ticked with.

// =============================================================================
// Easing Functions
// =============================================================================

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Quadratic ease out (CSS `ease-out` approximation)
    EaseOut,
    /// Quadratic ease in and out
    EaseInOut,
    /// Cubic ease out
    CubicOut,
    /// Quartic ease out: `1 - (1 - t)^4`
    QuartOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(2),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::QuartOut => 1.0 - (1.0 - t).powi(4),
        }
    }
}

// =============================================================================
// EasedValue
// =============================================================================

/// An easing-based animated value.
#[derive(Debug, Clone)]
pub struct EasedValue {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Total duration (caller's time unit)
    pub duration: f64,
    /// Elapsed time
    pub elapsed: f64,
    /// Easing function
    pub easing: Easing,
}

impl EasedValue {
    /// Create new eased animation.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing: Easing::EaseInOut,
        }
    }

    /// Set easing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Get current value. Exactly `to` once complete.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Whether animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Set elapsed time directly (clamped at zero).
    pub fn set_elapsed(&mut self, elapsed: f64) {
        self.elapsed = elapsed.max(0.0);
    }

    /// Advance by `dt`.
    pub fn update(&mut self, dt: f64) {
        self.set_elapsed(self.elapsed + dt);
    }
}

// =============================================================================
// MetricAnimator
// =============================================================================

/// Counts a displayed metric up to its target with an ease-out-quartic curve.
///
/// Restarting (via [`MetricAnimator::start`] or [`MetricAnimator::retarget`])
/// replaces the in-flight run; there is only ever one curve per animator.
#[derive(Debug, Clone)]
pub struct MetricAnimator {
    curve: EasedValue,
    decimals: u32,
    started_at: Option<f64>,
    value: f64,
}

impl MetricAnimator {
    /// Create an idle animator showing 0.
    #[must_use]
    pub fn new(target: f64, duration_ms: f64, decimals: u32) -> Self {
        Self {
            curve: EasedValue::new(0.0, target, duration_ms).with_easing(Easing::QuartOut),
            decimals,
            started_at: None,
            value: 0.0,
        }
    }

    /// Restart from zero at `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.value = 0.0;
        self.curve.from = 0.0;
        self.curve.elapsed = 0.0;
        self.started_at = Some(now_ms);
    }

    /// Animate from the currently displayed value to a new target.
    pub fn retarget(&mut self, target: f64, now_ms: f64) {
        self.curve.from = self.value;
        self.curve.to = target;
        self.curve.elapsed = 0.0;
        self.started_at = Some(now_ms);
    }

    /// Advance to `now_ms` and return the current value.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        if let Some(start) = self.started_at {
            self.curve.set_elapsed(now_ms - start);
            self.value = self.curve.value();
            if self.curve.is_complete() {
                self.started_at = None;
            }
        }
        self.value
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Final value of the current run.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.curve.to
    }

    /// Whether a run is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Current value formatted for display.
    #[must_use]
    pub fn display(&self) -> String {
        format_grouped(self.value, self.decimals)
    }
}

/// Most fractional digits [`format_grouped`] will print.
pub const MAX_DECIMALS: u32 = 20;

/// Format with comma thousands separators.
///
/// Whole numbers (`decimals == 0`) truncate toward zero so a count-up never
/// shows its target early. With `decimals > 0` the value is rounded to that
/// many places (at most [`MAX_DECIMALS`]). Non-finite values print as `0`.
///
/// ```
/// use vitrine_core::animation::format_grouped;
///
/// assert_eq!(format_grouped(1247.0, 0), "1,247");
/// assert_eq!(format_grouped(1169.9, 0), "1,169");
/// assert_eq!(format_grouped(4.65, 1), "4.7");
/// ```
#[must_use]
pub fn format_grouped(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let decimals = decimals.min(MAX_DECIMALS) as usize;
    let shown = if decimals == 0 { value.trunc() } else { value };
    let digits = format!("{:.*}", decimals, shown.abs());
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let mut grouped = String::with_capacity(digits.len() + whole.len() / 3 + 1);
    if shown < 0.0 && digits.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        grouped.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if !frac.is_empty() {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -------------------------------------------------------------------------
    // Easing tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_easing_clamps_input() {
        assert!((Easing::Linear.apply(-0.5) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(1.5) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_quart_out_midpoint() {
        assert!((Easing::QuartOut.apply(0.5) - 0.9375).abs() < 1e-12);
        assert_eq!(Easing::QuartOut.apply(1.0), 1.0);
        assert_eq!(Easing::QuartOut.apply(0.0), 0.0);
    }

    #[test]
    fn test_easing_ease_out_above_linear() {
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(Easing::CubicOut.apply(0.5) > Easing::EaseOut.apply(0.5));
    }

    #[test]
    fn test_easing_ease_in_out_symmetric() {
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 0.01);
    }

    // -------------------------------------------------------------------------
    // EasedValue tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_eased_value_progression() {
        let mut v = EasedValue::new(0.0, 100.0, 1.0).with_easing(Easing::Linear);
        assert_eq!(v.value(), 0.0);
        v.update(0.5);
        assert!((v.value() - 50.0).abs() < 0.001);
        v.update(0.75);
        assert!(v.is_complete());
        assert_eq!(v.value(), 100.0);
    }

    #[test]
    fn test_eased_value_zero_duration_is_complete() {
        let v = EasedValue::new(3.0, 7.0, 0.0);
        assert!(v.is_complete());
        assert_eq!(v.value(), 7.0);
    }

    // -------------------------------------------------------------------------
    // MetricAnimator tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_metric_animator_idle_until_started() {
        let mut m = MetricAnimator::new(1247.0, 2000.0, 0);
        assert_eq!(m.tick(500.0), 0.0);
        assert!(!m.is_running());
        assert_eq!(m.display(), "0");
    }

    #[test]
    fn test_metric_animator_midpoint_and_end() {
        let mut m = MetricAnimator::new(1247.0, 2000.0, 0);
        m.start(10_000.0);
        let mid = m.tick(11_000.0);
        assert!((mid - 1247.0 * 0.9375).abs() < 1e-9);
        assert_eq!(m.display(), "1,169");

        assert_eq!(m.tick(12_000.0), 1247.0);
        assert_eq!(m.display(), "1,247");
        assert!(!m.is_running());

        assert_eq!(m.tick(20_000.0), 1247.0);
    }

    #[test]
    fn test_metric_animator_restart_supersedes() {
        let mut m = MetricAnimator::new(100.0, 1000.0, 0);
        m.start(0.0);
        m.tick(900.0);
        m.start(1000.0);
        assert_eq!(m.value(), 0.0);
        assert!(m.tick(1000.0) < 1.0);
        assert_eq!(m.tick(2000.0), 100.0);
    }

    #[test]
    fn test_metric_animator_retarget_from_current() {
        let mut m = MetricAnimator::new(100.0, 1000.0, 0);
        m.start(0.0);
        m.tick(1000.0);
        m.retarget(120.0, 1000.0);
        assert_eq!(m.tick(1000.0), 100.0);
        let part = m.tick(1500.0);
        assert!(part > 100.0 && part < 120.0);
        assert_eq!(m.tick(2000.0), 120.0);
    }

    #[test]
    fn test_metric_animator_decimal_display() {
        let mut m = MetricAnimator::new(4.7, 1800.0, 1);
        m.start(0.0);
        m.tick(1800.0);
        assert_eq!(m.display(), "4.7");
    }

    // -------------------------------------------------------------------------
    // format_grouped tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0, 0), "0");
        assert_eq!(format_grouped(999.0, 0), "999");
        assert_eq!(format_grouped(2456.0, 0), "2,456");
        assert_eq!(format_grouped(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_grouped(-1500.0, 0), "-1,500");
        assert_eq!(format_grouped(1169.9, 0), "1,169");
        assert_eq!(format_grouped(f64::NAN, 0), "0");
        assert_eq!(format_grouped(-0.4, 0), "0");
    }

    #[test]
    fn test_format_grouped_rounds_fractions() {
        assert_eq!(format_grouped(4.65, 1), "4.7");
        assert_eq!(format_grouped(4.64, 1), "4.6");
        assert_eq!(format_grouped(0.999, 2), "1.00");
        assert_eq!(format_grouped(-0.001, 1), "0.0");
    }

    #[test]
    fn test_format_grouped_huge_values() {
        assert_eq!(format_grouped(1e20, 0), "100,000,000,000,000,000,000");
        assert_eq!(format_grouped(-2.5e19, 0), "-25,000,000,000,000,000,000");
    }

    #[test]
    fn test_format_grouped_caps_decimals() {
        assert_eq!(format_grouped(1.5, 20), "1.50000000000000000000");
        assert_eq!(format_grouped(1.5, u32::MAX), format_grouped(1.5, MAX_DECIMALS));

        let mut m = MetricAnimator::new(1.5, 100.0, 20);
        m.start(0.0);
        m.tick(100.0);
        assert_eq!(m.display(), "1.50000000000000000000");
    }

    proptest! {
        #[test]
        fn prop_metric_animator_terminates_at_target(target in 0.0f64..1e7, duration in 1.0f64..10_000.0) {
            let mut m = MetricAnimator::new(target, duration, 0);
            m.start(0.0);
            let mut t = 0.0;
            while t < duration {
                let v = m.tick(t);
                prop_assert!(v <= target + 1e-6);
                t += 16.0;
            }
            prop_assert_eq!(m.tick(duration), target);
            prop_assert_eq!(m.tick(duration + 1000.0), target);
        }
    }
}
