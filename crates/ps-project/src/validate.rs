//! Workbench validation logic.

use crate::schema::{PacingDef, Workbench};
use std::collections::HashSet;

/// Upper bound on any single pacing delay.
pub const MAX_STAGE_DELAY_MS: u64 = 60_000;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate preset name: {name}")]
    DuplicatePreset { name: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid plant: {0}")]
    Plant(#[from] ps_controls::ControlError),

    #[error("Invalid gains: {0}")]
    Gains(#[from] ps_core::CoreError),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_workbench(workbench: &Workbench) -> Result<(), ValidationError> {
    if workbench.version == 0 || workbench.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: workbench.version,
        });
    }

    workbench.plant.validate()?;
    workbench.gains.validate()?;

    let mut names = HashSet::new();
    for preset in &workbench.presets {
        if preset.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "presets.name".to_string(),
                value: format!("{:?}", preset.name),
                reason: "preset names must not be empty".to_string(),
            });
        }
        if !names.insert(preset.name.as_str()) {
            return Err(ValidationError::DuplicatePreset {
                name: preset.name.clone(),
            });
        }
        preset.gains.validate_for_estimate()?;
    }

    validate_pacing(&workbench.pacing)?;

    let spread = workbench.auto_tune.spread;
    if !(0.0..=1.0).contains(&spread) {
        return Err(ValidationError::InvalidValue {
            field: "auto_tune.spread".to_string(),
            value: spread.to_string(),
            reason: "must be within [0, 1]".to_string(),
        });
    }

    Ok(())
}

fn validate_pacing(pacing: &PacingDef) -> Result<(), ValidationError> {
    for (field, value) in [
        ("pacing.stage_delay_ms", pacing.stage_delay_ms),
        (
            "pacing.auto_tune_stage_delay_ms",
            pacing.auto_tune_stage_delay_ms,
        ),
    ] {
        if value > MAX_STAGE_DELAY_MS {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
                reason: format!("must not exceed {MAX_STAGE_DELAY_MS} ms"),
            });
        }
    }
    Ok(())
}
