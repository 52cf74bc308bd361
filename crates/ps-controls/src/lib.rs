//! Plant catalog, gain presets and tuning guidance for the PID workbench.
//!
//! The plant models here are parameter sets only: they describe what the
//! user entered in the form and validate it. Nothing in this crate
//! integrates plant dynamics.

pub mod error;
pub mod guide;
pub mod plant;
pub mod presets;

pub use error::{ControlError, ControlResult};
pub use guide::{TuningStep, manual_tuning_guide};
pub use plant::{PlantKind, PlantModel, PlantParameter};
pub use presets::{GainPreset, builtin_presets, suggest_starting_gains};
