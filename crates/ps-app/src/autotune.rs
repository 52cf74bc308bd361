//! Randomized "auto-tune".
//!
//! There is no identification or optimisation here: the tuned gains are a
//! baseline preset scaled by independent uniform factors drawn from
//! `[1 - spread, 1 + spread]`.

use ps_core::{GainTriple, round_to};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decimal places kept on tuned gains.
pub const TUNED_GAIN_DECIMALS: u32 = 3;

/// Smallest non-zero gain representable at [`TUNED_GAIN_DECIMALS`].
pub const MIN_TUNED_GAIN: f64 = 0.001;

pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Perturb each gain of `baseline` by a factor in `[1 - spread, 1 + spread]`.
///
/// `spread` is clamped to `[0, 1]`, so results are never negative. If the
/// baseline has `kp + ki > 0`, so does the result: when rounding collapses
/// both to zero, the larger of the two baseline terms keeps [`MIN_TUNED_GAIN`].
pub fn perturb_gains<R: Rng>(baseline: GainTriple, spread: f64, rng: &mut R) -> GainTriple {
    let spread = spread.clamp(0.0, 1.0);
    let mut scale = |v: f64| {
        let factor = if spread > 0.0 {
            rng.gen_range((1.0 - spread)..=(1.0 + spread))
        } else {
            1.0
        };
        round_to((v * factor).max(0.0), TUNED_GAIN_DECIMALS)
    };
    let mut tuned = GainTriple {
        kp: scale(baseline.kp),
        ki: scale(baseline.ki),
        kd: scale(baseline.kd),
    };
    if tuned.kp + tuned.ki <= 0.0 && baseline.kp + baseline.ki > 0.0 {
        if baseline.kp >= baseline.ki {
            tuned.kp = MIN_TUNED_GAIN;
        } else {
            tuned.ki = MIN_TUNED_GAIN;
        }
    }
    tuned
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_seed_same_gains() {
        let baseline = GainTriple::new(10.0, 5.0, 0.1).unwrap();
        let a = perturb_gains(baseline, 0.2, &mut rng_from_seed(Some(7)));
        let b = perturb_gains(baseline, 0.2, &mut rng_from_seed(Some(7)));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_spread_keeps_baseline() {
        let baseline = GainTriple::new(2.0, 0.5, 0.05).unwrap();
        let tuned = perturb_gains(baseline, 0.0, &mut rng_from_seed(Some(1)));
        assert_eq!(tuned, baseline);
    }

    #[test]
    fn tiny_baseline_does_not_round_to_degenerate() {
        let baseline = GainTriple::new(0.0004, 0.0, 0.1).unwrap();
        let tuned = perturb_gains(baseline, 0.0, &mut rng_from_seed(Some(3)));
        assert_eq!(tuned.kp, MIN_TUNED_GAIN);
        assert_eq!(tuned.ki, 0.0);
        assert_eq!(tuned.kd, 0.1);
        tuned.validate_for_estimate().unwrap();

        let baseline = GainTriple::new(0.0, 0.0002, 0.0).unwrap();
        let tuned = perturb_gains(baseline, 0.0, &mut rng_from_seed(Some(3)));
        assert_eq!((tuned.kp, tuned.ki), (0.0, MIN_TUNED_GAIN));
    }

    proptest! {
        #[test]
        fn tuned_gains_stay_within_spread(seed in any::<u64>(), spread in 0.0_f64..1.0) {
            let baseline = GainTriple::new(10.0, 5.0, 0.1).unwrap();
            let tuned = perturb_gains(baseline, spread, &mut rng_from_seed(Some(seed)));
            for ((_, base), (_, value)) in baseline.named().into_iter().zip(tuned.named()) {
                // rounding to 3 decimals may step just past the band
                prop_assert!(value >= base * (1.0 - spread) - 5e-4);
                prop_assert!(value <= base * (1.0 + spread) + 5e-4);
                prop_assert!(value >= 0.0);
            }
        }

        #[test]
        fn tuned_gains_stay_estimable(
            kp in 0.0_f64..0.01,
            ki in 0.0_f64..0.01,
            kd in 0.0_f64..1.0,
            spread in 0.0_f64..=1.0,
            seed in any::<u64>(),
        ) {
            prop_assume!(kp + ki > 0.0);
            let baseline = GainTriple::new(kp, ki, kd).unwrap();
            let tuned = perturb_gains(baseline, spread, &mut rng_from_seed(Some(seed)));
            prop_assert!(tuned.validate_for_estimate().is_ok());
        }
    }
}
