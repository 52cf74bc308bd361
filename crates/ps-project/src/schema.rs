//! Workbench file schema.

use ps_controls::{GainPreset, PlantModel, builtin_presets};
use ps_core::GainTriple;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workbench {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub plant: PlantModel,
    #[serde(default)]
    pub gains: GainTriple,
    #[serde(default = "builtin_presets")]
    pub presets: Vec<GainPreset>,
    #[serde(default)]
    pub pacing: PacingDef,
    #[serde(default)]
    pub auto_tune: AutoTuneDef,
}

impl Default for Workbench {
    fn default() -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: "PID Workbench".to_string(),
            plant: PlantModel::default(),
            gains: GainTriple::default(),
            presets: builtin_presets(),
            pacing: PacingDef::default(),
            auto_tune: AutoTuneDef::default(),
        }
    }
}

/// Delays between the status stages of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PacingDef {
    #[serde(default = "default_stage_delay_ms")]
    pub stage_delay_ms: u64,
    #[serde(default = "default_auto_tune_delay_ms")]
    pub auto_tune_stage_delay_ms: u64,
}

fn default_stage_delay_ms() -> u64 {
    500
}

fn default_auto_tune_delay_ms() -> u64 {
    800
}

impl Default for PacingDef {
    fn default() -> Self {
        Self {
            stage_delay_ms: default_stage_delay_ms(),
            auto_tune_stage_delay_ms: default_auto_tune_delay_ms(),
        }
    }
}

/// Randomized auto-tune settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutoTuneDef {
    /// Relative half-width of the perturbation applied to each baseline gain.
    #[serde(default = "default_spread")]
    pub spread: f64,
    /// Fixed RNG seed. `None` draws from entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_spread() -> f64 {
    0.2
}

impl Default for AutoTuneDef {
    fn default() -> Self {
        Self {
            spread: default_spread(),
            seed: None,
        }
    }
}
