use proptest::prelude::*;
use ps_controls::{ControlError, PlantKind, PlantModel, manual_tuning_guide, suggest_starting_gains};

#[test]
fn plant_yaml_is_tagged_by_type() {
    let plant = PlantModel::default_for(PlantKind::Tank);
    let yaml = serde_yaml::to_string(&plant).unwrap();
    assert!(yaml.contains("type: tank"));

    let loaded: PlantModel = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(loaded, plant);
}

#[test]
fn first_order_noise_defaults_to_zero() {
    let yaml = "type: first_order\ntime_constant_s: 3.0\ngain: 2.0\n";
    let plant: PlantModel = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        plant,
        PlantModel::FirstOrder {
            time_constant_s: 3.0,
            gain: 2.0,
            noise_level: 0.0
        }
    );
}

#[test]
fn default_preset_exists_for_every_kind() {
    for kind in PlantKind::ALL {
        let gains = suggest_starting_gains(kind.default_preset());
        gains.validate_for_estimate().unwrap();
    }
    assert_eq!(suggest_starting_gains(PlantKind::DcMotor.default_preset()).kp, 10.0);
}

#[test]
fn guide_starts_with_proportional_only() {
    let guide = manual_tuning_guide();
    assert_eq!(guide[0].key, "step_1");
    assert!(guide[0].text.contains("Kp only"));
    assert_eq!(guide.last().unwrap().key, "tuning_order");
}

#[test]
fn nan_parameter_rejected() {
    let mut plant = PlantModel::default_for(PlantKind::DcMotor);
    plant.set_parameter("friction", f64::NAN).unwrap();
    assert!(matches!(
        plant.validate(),
        Err(ControlError::InvalidParameter { name: "friction", .. })
    ));
}

proptest! {
    #[test]
    fn positive_parameters_validate(tau in 1e-3_f64..1e3, gain in -10.0_f64..10.0, noise in 0.0_f64..1.0) {
        let plant = PlantModel::FirstOrder { time_constant_s: tau, gain, noise_level: noise };
        prop_assert!(plant.validate().is_ok());
    }

    #[test]
    fn negative_damping_rejected(zeta in -10.0_f64..-1e-9) {
        let plant = PlantModel::SecondOrder { natural_frequency_rad_s: 1.0, damping_ratio: zeta, gain: 1.0 };
        prop_assert!(plant.validate().is_err());
    }
}
