use ps_core::{CoreResult, GainTriple, Real};

use crate::metric_set::{MetricKey, MetricSet};

/// Lower bound on the settling-time estimate (seconds).
pub const MIN_SETTLING_TIME_S: Real = 0.5;
/// Overshoot estimates are clamped to `[0, MAX_OVERSHOOT_PCT]`.
pub const MAX_OVERSHOOT_PCT: Real = 50.0;
/// Below this derivative gain the overshoot estimate gets a fixed penalty.
pub const LOW_DERIVATIVE_KD: Real = 0.05;

/// Unformatted metric values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMetrics {
    pub settling_time_s: Real,
    pub overshoot_pct: Real,
    pub rise_time_s: Real,
    pub steady_state_error: Real,
    pub iae: Real,
    pub ise: Real,
}

impl RawMetrics {
    pub fn get(&self, key: MetricKey) -> Real {
        match key {
            MetricKey::SettlingTime => self.settling_time_s,
            MetricKey::Overshoot => self.overshoot_pct,
            MetricKey::RiseTime => self.rise_time_s,
            MetricKey::SteadyStateError => self.steady_state_error,
            MetricKey::Iae => self.iae,
            MetricKey::Ise => self.ise,
        }
    }

    pub fn to_metric_set(&self) -> MetricSet {
        MetricSet::from_raw(self)
    }
}

/// Estimate the six metrics from the gains.
///
/// Pure and unchecked: `kp + ki == 0` yields an infinite settling time and
/// non-finite input yields NaN in every field that depends on it.
pub fn estimate(kp: Real, ki: Real, kd: Real) -> RawMetrics {
    let settling_time_s = at_least(8.0 / (kp + ki), MIN_SETTLING_TIME_S);

    let kd_penalty = if kd.is_nan() {
        Real::NAN
    } else if kd < LOW_DERIVATIVE_KD {
        10.0
    } else {
        0.0
    };
    let overshoot_pct = at_most(at_least((kp - 0.5) * 15.0 + kd_penalty, 0.0), MAX_OVERSHOOT_PCT);

    let rise_time_s = settling_time_s * 0.35;
    let steady_state_error = at_least(0.1 / (1.0 + ki), 0.0);
    let iae = settling_time_s * 2.5 + overshoot_pct * 0.1;
    let ise = iae * 0.6;

    RawMetrics {
        settling_time_s,
        overshoot_pct,
        rise_time_s,
        steady_state_error,
        iae,
        ise,
    }
}

/// Validate the gains, then estimate and format.
pub fn estimate_checked(gains: &GainTriple) -> CoreResult<MetricSet> {
    gains.validate_for_estimate()?;
    Ok(estimate(gains.kp, gains.ki, gains.kd).to_metric_set())
}

// f64::max/min drop NaN in favour of the other operand, which would turn
// bad input into a plausible number. Keep NaN visible instead.
fn at_least(v: Real, lo: Real) -> Real {
    if v.is_nan() { v } else { v.max(lo) }
}

fn at_most(v: Real, hi: Real) -> Real {
    if v.is_nan() { v } else { v.min(hi) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps_core::{Tolerances, nearly_equal};

    #[test]
    fn settling_time_floor() {
        let m = estimate(100.0, 100.0, 0.0);
        assert_eq!(m.settling_time_s, MIN_SETTLING_TIME_S);
    }

    #[test]
    fn overshoot_penalty_applies_below_threshold_only() {
        let low = estimate(1.0, 0.5, 0.049);
        let high = estimate(1.0, 0.5, 0.05);
        assert!(nearly_equal(low.overshoot_pct - high.overshoot_pct, 10.0, Tolerances::default()));
    }

    #[test]
    fn negative_kp_clamps_overshoot_to_zero() {
        let m = estimate(-3.0, 1.0, 1.0);
        assert_eq!(m.overshoot_pct, 0.0);
    }

    #[test]
    fn zero_kp_and_ki_gives_infinite_settling_time() {
        let m = estimate(0.0, 0.0, 0.1);
        assert!(m.settling_time_s.is_infinite());
        assert!(m.rise_time_s.is_infinite());
        assert!(m.iae.is_infinite());
    }

    #[test]
    fn nan_input_propagates() {
        let m = estimate(f64::NAN, 0.5, 0.1);
        assert!(m.settling_time_s.is_nan());
        assert!(m.overshoot_pct.is_nan());
        assert!(m.rise_time_s.is_nan());
        assert!(m.iae.is_nan());
        assert!(m.ise.is_nan());

        let m = estimate(1.0, f64::NAN, 0.1);
        assert!(m.steady_state_error.is_nan());
    }

    #[test]
    fn checked_rejects_degenerate_gains() {
        let gains = GainTriple {
            kp: 0.0,
            ki: 0.0,
            kd: 0.2,
        };
        assert_eq!(
            estimate_checked(&gains).unwrap_err(),
            ps_core::CoreError::DegenerateGains
        );
    }
}
