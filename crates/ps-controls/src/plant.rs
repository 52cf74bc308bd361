//! Plant model parameter sets.
//!
//! Provides the plant types the workbench form can describe:
//! - **First order**: `tau * dy/dt + y = K * u`
//! - **Second order**: natural frequency, damping ratio and gain
//! - **DC motor**: armature and mechanical parameters
//! - **Tank**: level with square-root outflow
//!
//! Defaults match the reference plants the workbench ships with.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Plant type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    FirstOrder,
    SecondOrder,
    DcMotor,
    Tank,
}

impl PlantKind {
    pub const ALL: [PlantKind; 4] = [
        PlantKind::FirstOrder,
        PlantKind::SecondOrder,
        PlantKind::DcMotor,
        PlantKind::Tank,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            PlantKind::FirstOrder => "first_order",
            PlantKind::SecondOrder => "second_order",
            PlantKind::DcMotor => "dc_motor",
            PlantKind::Tank => "tank",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlantKind::FirstOrder => "First-order system",
            PlantKind::SecondOrder => "Second-order system",
            PlantKind::DcMotor => "DC motor",
            PlantKind::Tank => "Water tank",
        }
    }

    /// Name of the preset used as the auto-tune baseline for this kind.
    pub fn default_preset(self) -> &'static str {
        match self {
            PlantKind::DcMotor => "motor",
            PlantKind::Tank => "tank",
            PlantKind::FirstOrder | PlantKind::SecondOrder => "general",
        }
    }
}

impl fmt::Display for PlantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PlantKind {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        PlantKind::ALL
            .into_iter()
            .find(|k| k.tag() == normalized)
            .ok_or_else(|| ControlError::UnknownPlant { tag: s.to_string() })
    }
}

/// Plant parameters as entered in the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlantModel {
    FirstOrder {
        time_constant_s: f64,
        gain: f64,
        #[serde(default)]
        noise_level: f64,
    },
    SecondOrder {
        natural_frequency_rad_s: f64,
        damping_ratio: f64,
        gain: f64,
    },
    DcMotor {
        resistance_ohm: f64,
        inductance_h: f64,
        motor_constant: f64,
        inertia: f64,
        friction: f64,
    },
    Tank {
        tank_area_m2: f64,
        outlet_coefficient: f64,
        max_level_m: f64,
    },
}

/// One named plant parameter, for display and editing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantParameter {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub value: f64,
    domain: Domain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Finite,
    NonNegative,
    Positive,
}

impl Domain {
    fn check(self, v: f64) -> Result<(), &'static str> {
        if !v.is_finite() {
            return Err("must be finite");
        }
        match self {
            Domain::Finite => Ok(()),
            Domain::NonNegative if v < 0.0 => Err("must be non-negative"),
            Domain::Positive if v <= 0.0 => Err("must be positive"),
            _ => Ok(()),
        }
    }
}

impl PlantParameter {
    const fn new(
        name: &'static str,
        label: &'static str,
        unit: &'static str,
        value: f64,
        domain: Domain,
    ) -> Self {
        Self {
            name,
            label,
            unit,
            value,
            domain,
        }
    }

    /// Smallest value the form should allow when editing.
    pub fn min_value(&self) -> f64 {
        match self.domain {
            Domain::Finite => f64::NEG_INFINITY,
            Domain::NonNegative => 0.0,
            Domain::Positive => 1e-6,
        }
    }

    pub fn validate(&self) -> ControlResult<()> {
        self.domain
            .check(self.value)
            .map_err(|reason| ControlError::InvalidParameter {
                name: self.name,
                value: self.value,
                reason,
            })
    }
}

impl PlantModel {
    pub fn default_for(kind: PlantKind) -> Self {
        match kind {
            PlantKind::FirstOrder => PlantModel::FirstOrder {
                time_constant_s: 2.0,
                gain: 1.0,
                noise_level: 0.0,
            },
            PlantKind::SecondOrder => PlantModel::SecondOrder {
                natural_frequency_rad_s: 2.0,
                damping_ratio: 0.5,
                gain: 1.0,
            },
            PlantKind::DcMotor => PlantModel::DcMotor {
                resistance_ohm: 1.0,
                inductance_h: 0.01,
                motor_constant: 0.1,
                inertia: 0.01,
                friction: 0.1,
            },
            PlantKind::Tank => PlantModel::Tank {
                tank_area_m2: 1.0,
                outlet_coefficient: 0.1,
                max_level_m: 10.0,
            },
        }
    }

    pub fn kind(&self) -> PlantKind {
        match self {
            PlantModel::FirstOrder { .. } => PlantKind::FirstOrder,
            PlantModel::SecondOrder { .. } => PlantKind::SecondOrder,
            PlantModel::DcMotor { .. } => PlantKind::DcMotor,
            PlantModel::Tank { .. } => PlantKind::Tank,
        }
    }

    /// Parameters in form order.
    pub fn parameters(&self) -> Vec<PlantParameter> {
        use Domain::*;
        match *self {
            PlantModel::FirstOrder {
                time_constant_s,
                gain,
                noise_level,
            } => vec![
                PlantParameter::new("time_constant_s", "Time constant", "s", time_constant_s, Positive),
                PlantParameter::new("gain", "Gain", "", gain, Finite),
                PlantParameter::new("noise_level", "Noise level", "", noise_level, NonNegative),
            ],
            PlantModel::SecondOrder {
                natural_frequency_rad_s,
                damping_ratio,
                gain,
            } => vec![
                PlantParameter::new(
                    "natural_frequency_rad_s",
                    "Natural frequency",
                    "rad/s",
                    natural_frequency_rad_s,
                    Positive,
                ),
                PlantParameter::new("damping_ratio", "Damping ratio", "", damping_ratio, NonNegative),
                PlantParameter::new("gain", "Gain", "", gain, Finite),
            ],
            PlantModel::DcMotor {
                resistance_ohm,
                inductance_h,
                motor_constant,
                inertia,
                friction,
            } => vec![
                PlantParameter::new("resistance_ohm", "Resistance", "Ω", resistance_ohm, Positive),
                PlantParameter::new("inductance_h", "Inductance", "H", inductance_h, Positive),
                PlantParameter::new("motor_constant", "Motor constant", "N·m/A", motor_constant, Positive),
                PlantParameter::new("inertia", "Inertia", "kg·m²", inertia, Positive),
                PlantParameter::new("friction", "Friction", "N·m·s", friction, NonNegative),
            ],
            PlantModel::Tank {
                tank_area_m2,
                outlet_coefficient,
                max_level_m,
            } => vec![
                PlantParameter::new("tank_area_m2", "Tank area", "m²", tank_area_m2, Positive),
                PlantParameter::new(
                    "outlet_coefficient",
                    "Outlet coefficient",
                    "",
                    outlet_coefficient,
                    NonNegative,
                ),
                PlantParameter::new("max_level_m", "Max level", "m", max_level_m, Positive),
            ],
        }
    }

    pub fn validate(&self) -> ControlResult<()> {
        self.parameters().iter().try_for_each(PlantParameter::validate)
    }

    /// Set a parameter by name. The new value is not validated here, so a
    /// form can hold an out-of-range entry until the next [`validate`](Self::validate).
    pub fn set_parameter(&mut self, name: &str, value: f64) -> ControlResult<()> {
        let kind = self.kind();
        let slot = match (self, name) {
            (PlantModel::FirstOrder { time_constant_s, .. }, "time_constant_s") => time_constant_s,
            (PlantModel::FirstOrder { gain, .. }, "gain") => gain,
            (PlantModel::FirstOrder { noise_level, .. }, "noise_level") => noise_level,
            (
                PlantModel::SecondOrder {
                    natural_frequency_rad_s,
                    ..
                },
                "natural_frequency_rad_s",
            ) => natural_frequency_rad_s,
            (PlantModel::SecondOrder { damping_ratio, .. }, "damping_ratio") => damping_ratio,
            (PlantModel::SecondOrder { gain, .. }, "gain") => gain,
            (PlantModel::DcMotor { resistance_ohm, .. }, "resistance_ohm") => resistance_ohm,
            (PlantModel::DcMotor { inductance_h, .. }, "inductance_h") => inductance_h,
            (PlantModel::DcMotor { motor_constant, .. }, "motor_constant") => motor_constant,
            (PlantModel::DcMotor { inertia, .. }, "inertia") => inertia,
            (PlantModel::DcMotor { friction, .. }, "friction") => friction,
            (PlantModel::Tank { tank_area_m2, .. }, "tank_area_m2") => tank_area_m2,
            (
                PlantModel::Tank {
                    outlet_coefficient, ..
                },
                "outlet_coefficient",
            ) => outlet_coefficient,
            (PlantModel::Tank { max_level_m, .. }, "max_level_m") => max_level_m,
            _ => {
                return Err(ControlError::UnknownParameter {
                    kind: kind.to_string(),
                    name: name.to_string(),
                });
            }
        };
        *slot = value;
        Ok(())
    }

    /// One-line description, e.g. `first_order (time_constant_s=2, gain=1, noise_level=0)`.
    pub fn summary(&self) -> String {
        let params: Vec<String> = self
            .parameters()
            .iter()
            .map(|p| format!("{}={}", p.name, p.value))
            .collect();
        format!("{} ({})", self.kind(), params.join(", "))
    }
}

impl Default for PlantModel {
    fn default() -> Self {
        Self::default_for(PlantKind::FirstOrder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        for kind in PlantKind::ALL {
            let plant = PlantModel::default_for(kind);
            assert_eq!(plant.kind(), kind);
            plant.validate().unwrap();
        }
    }

    #[test]
    fn kind_parses_tags_and_dashes() {
        assert_eq!("dc_motor".parse::<PlantKind>().unwrap(), PlantKind::DcMotor);
        assert_eq!("Second-Order".parse::<PlantKind>().unwrap(), PlantKind::SecondOrder);
        assert!(matches!(
            "boiler".parse::<PlantKind>(),
            Err(ControlError::UnknownPlant { .. })
        ));
    }

    #[test]
    fn zero_time_constant_rejected() {
        let mut plant = PlantModel::default_for(PlantKind::FirstOrder);
        plant.set_parameter("time_constant_s", 0.0).unwrap();
        let err = plant.validate().unwrap_err();
        assert!(matches!(
            err,
            ControlError::InvalidParameter {
                name: "time_constant_s",
                ..
            }
        ));
    }

    #[test]
    fn negative_plant_gain_is_allowed() {
        let mut plant = PlantModel::default_for(PlantKind::SecondOrder);
        plant.set_parameter("gain", -1.5).unwrap();
        plant.validate().unwrap();
    }

    #[test]
    fn set_parameter_updates_value() {
        let mut plant = PlantModel::default_for(PlantKind::DcMotor);
        plant.set_parameter("inertia", 0.02).unwrap();
        let inertia = plant
            .parameters()
            .into_iter()
            .find(|p| p.name == "inertia")
            .unwrap();
        assert_eq!(inertia.value, 0.02);
    }

    #[test]
    fn unknown_parameter_rejected() {
        let mut plant = PlantModel::default_for(PlantKind::Tank);
        let err = plant.set_parameter("damping_ratio", 0.3).unwrap_err();
        assert!(matches!(err, ControlError::UnknownParameter { .. }));
    }

    #[test]
    fn summary_lists_parameters() {
        let plant = PlantModel::default_for(PlantKind::FirstOrder);
        assert_eq!(
            plant.summary(),
            "first_order (time_constant_s=2, gain=1, noise_level=0)"
        );
    }
}
