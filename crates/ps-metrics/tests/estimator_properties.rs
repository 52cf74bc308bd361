use proptest::prelude::*;
use ps_core::{CoreError, GainTriple, Tolerances, nearly_equal};
use ps_metrics::{MetricKey, estimate, estimate_checked};

fn values(set: &ps_metrics::MetricSet) -> Vec<&str> {
    set.iter().map(|e| e.value.as_str()).collect()
}

#[test]
fn reference_case_without_derivative_action() {
    // kd below the 0.05 threshold picks up the +10 overshoot term.
    let gains = GainTriple::new(1.2, 0.6, 0.0).unwrap();
    let set = estimate_checked(&gains).unwrap();
    assert_eq!(
        values(&set),
        ["4.44", "20.5", "1.56", "0.0625", "13.16", "7.90"]
    );
}

#[test]
fn reference_case_with_derivative_action() {
    let gains = GainTriple::new(1.2, 0.6, 0.15).unwrap();
    let set = estimate_checked(&gains).unwrap();
    assert_eq!(
        values(&set),
        ["4.44", "10.5", "1.56", "0.0625", "12.16", "7.30"]
    );
}

#[test]
fn zero_proportional_and_integral_is_rejected() {
    let gains = GainTriple::new(0.0, 0.0, 0.0).unwrap();
    assert_eq!(estimate_checked(&gains), Err(CoreError::DegenerateGains));
}

#[test]
fn invalid_gain_is_surfaced() {
    let gains = GainTriple {
        kp: 1.0,
        ki: f64::NAN,
        kd: 0.0,
    };
    assert!(matches!(
        estimate_checked(&gains),
        Err(CoreError::InvalidGain { name: "ki", .. })
    ));
}

#[test]
fn integral_only_controller_is_accepted() {
    let gains = GainTriple::new(0.0, 2.0, 0.1).unwrap();
    let set = estimate_checked(&gains).unwrap();
    assert_eq!(set.value(MetricKey::SettlingTime), "4.00");
    assert_eq!(set.value(MetricKey::Overshoot), "0.0");
}

#[test]
fn tiny_gains_format_huge_but_finite_times() {
    let gains = GainTriple::new(1e-306, 0.0, 0.0).unwrap();
    let set = estimate_checked(&gains).unwrap();
    for key in [MetricKey::SettlingTime, MetricKey::RiseTime, MetricKey::Iae, MetricKey::Ise] {
        let value = set.value(key);
        assert!(!value.contains("inf"), "{key}: {value}");
        assert!(value.parse::<f64>().unwrap().is_finite());
    }
    assert!(set.value(MetricKey::SettlingTime).starts_with('8'));
}

proptest! {
    #[test]
    fn settling_time_follows_formula(kp in 0.0_f64..100.0, ki in 0.0_f64..100.0, kd in 0.0_f64..10.0) {
        prop_assume!(kp + ki > 0.0);
        let m = estimate(kp, ki, kd);
        prop_assert_eq!(m.settling_time_s, (8.0 / (kp + ki)).max(0.5));
        prop_assert!(m.settling_time_s >= 0.5);
    }

    #[test]
    fn overshoot_is_bounded(kp in -1.0e6_f64..1.0e6, kd in -10.0_f64..10.0, ki in 0.0_f64..10.0) {
        let m = estimate(kp, ki, kd);
        prop_assert!((0.0..=50.0).contains(&m.overshoot_pct));
    }

    #[test]
    fn rise_time_is_fixed_fraction_of_settling(kp in 0.001_f64..100.0, ki in 0.0_f64..100.0, kd in 0.0_f64..10.0) {
        let m = estimate(kp, ki, kd);
        prop_assert_eq!(m.rise_time_s, m.settling_time_s * 0.35);
    }

    #[test]
    fn steady_state_error_decreases_with_ki(ki in 0.0_f64..1000.0, delta in 0.001_f64..100.0) {
        let lower = estimate(1.0, ki, 0.1).steady_state_error;
        let higher = estimate(1.0, ki + delta, 0.1).steady_state_error;
        prop_assert!(higher < lower);
        prop_assert!(lower > 0.0 && lower <= 0.1);
        prop_assert!(higher > 0.0 && higher <= 0.1);
    }

    #[test]
    fn ise_is_fixed_fraction_of_iae(kp in -10.0_f64..100.0, ki in 0.0_f64..100.0, kd in 0.0_f64..10.0) {
        let m = estimate(kp, ki, kd);
        prop_assert_eq!(m.ise, m.iae * 0.6);
    }

    #[test]
    fn checked_estimate_matches_raw_estimate(kp in 0.01_f64..50.0, ki in 0.0_f64..50.0, kd in 0.0_f64..5.0) {
        let gains = GainTriple::new(kp, ki, kd).unwrap();
        let set = estimate_checked(&gains).unwrap();
        let raw = estimate(kp, ki, kd);
        let iae: f64 = set.value(MetricKey::Iae).parse().unwrap();
        let tol = Tolerances { abs: 0.005 + 1e-9, rel: 0.0 };
        prop_assert!(nearly_equal(iae, raw.iae, tol));
    }
}
