use ps_controls::{GainPreset, PlantModel};
use ps_core::GainTriple;
use ps_project::{ValidationError, Workbench, validate_workbench};

#[test]
fn default_workbench_validates() {
    validate_workbench(&Workbench::default()).unwrap();
}

#[test]
fn future_version_rejected() {
    let workbench = Workbench {
        version: 99,
        ..Workbench::default()
    };
    assert!(matches!(
        validate_workbench(&workbench),
        Err(ValidationError::UnsupportedVersion { version: 99 })
    ));
}

#[test]
fn duplicate_preset_rejected() {
    let mut workbench = Workbench::default();
    let first = workbench.presets[0].clone();
    workbench.presets.push(first);
    assert!(matches!(
        validate_workbench(&workbench),
        Err(ValidationError::DuplicatePreset { .. })
    ));
}

#[test]
fn degenerate_preset_rejected() {
    let mut workbench = Workbench::default();
    workbench.presets.push(GainPreset {
        name: "off".to_string(),
        gains: GainTriple {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
        },
        description: None,
    });
    assert!(matches!(
        validate_workbench(&workbench),
        Err(ValidationError::Gains(_))
    ));
}

#[test]
fn negative_form_gain_rejected() {
    let workbench = Workbench {
        gains: GainTriple {
            kp: -1.0,
            ki: 0.0,
            kd: 0.0,
        },
        ..Workbench::default()
    };
    assert!(matches!(
        validate_workbench(&workbench),
        Err(ValidationError::Gains(_))
    ));
}

#[test]
fn invalid_plant_rejected() {
    let workbench = Workbench {
        plant: PlantModel::Tank {
            tank_area_m2: 0.0,
            outlet_coefficient: 0.1,
            max_level_m: 10.0,
        },
        ..Workbench::default()
    };
    let err = validate_workbench(&workbench).unwrap_err();
    assert!(err.to_string().contains("tank_area_m2"));
}

#[test]
fn spread_out_of_range_rejected() {
    let mut workbench = Workbench::default();
    workbench.auto_tune.spread = 1.5;
    let err = validate_workbench(&workbench).unwrap_err();
    assert!(err.to_string().contains("auto_tune.spread"));
}

#[test]
fn excessive_pacing_rejected() {
    let mut workbench = Workbench::default();
    workbench.pacing.stage_delay_ms = 120_000;
    assert!(matches!(
        validate_workbench(&workbench),
        Err(ValidationError::InvalidValue { .. })
    ));
}

#[test]
fn degenerate_form_gains_are_stored_as_entered() {
    // the form may hold kp = ki = 0; runs reject it, the file does not
    let workbench = Workbench {
        gains: GainTriple {
            kp: 0.0,
            ki: 0.0,
            kd: 0.2,
        },
        ..Workbench::default()
    };
    validate_workbench(&workbench).unwrap();
}
