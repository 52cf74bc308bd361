//! Named baseline gain triples.

use ps_core::GainTriple;
use serde::{Deserialize, Serialize};

/// Name of the preset used when a lookup misses.
pub const FALLBACK_PRESET: &str = "general";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainPreset {
    pub name: String,
    pub gains: GainTriple,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GainPreset {
    fn builtin(name: &str, kp: f64, ki: f64, kd: f64, description: &str) -> Self {
        Self {
            name: name.to_string(),
            gains: GainTriple { kp, ki, kd },
            description: Some(description.to_string()),
        }
    }
}

/// Presets the workbench ships with.
pub fn builtin_presets() -> Vec<GainPreset> {
    vec![
        GainPreset::builtin("motor", 10.0, 5.0, 0.1, "DC motor speed loop"),
        GainPreset::builtin("tank", 2.0, 0.5, 0.05, "Tank level loop"),
        GainPreset::builtin("thermal", 1.0, 0.1, 0.01, "Slow thermal process"),
        GainPreset::builtin("general", 1.0, 0.1, 0.01, "Conservative starting point"),
        GainPreset::builtin("fast_system", 0.5, 0.8, 0.1, "Fast, lightly damped process"),
        GainPreset::builtin("slow_system", 5.0, 0.1, 0.5, "Sluggish, heavily damped process"),
    ]
}

/// Starting gains for a plant family. Unknown names get the `general` preset.
pub fn suggest_starting_gains(name: &str) -> GainTriple {
    lookup(&builtin_presets(), name)
}

/// Look a preset up by name in `presets`, falling back to `general`, then to
/// [`GainTriple::default`] if the list has no `general` entry either.
pub fn lookup(presets: &[GainPreset], name: &str) -> GainTriple {
    presets
        .iter()
        .find(|p| p.name == name)
        .or_else(|| presets.iter().find(|p| p.name == FALLBACK_PRESET))
        .map(|p| p.gains)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motor_preset() {
        let g = suggest_starting_gains("motor");
        assert_eq!((g.kp, g.ki, g.kd), (10.0, 5.0, 0.1));
    }

    #[test]
    fn unknown_name_falls_back_to_general() {
        assert_eq!(
            suggest_starting_gains("reactor"),
            suggest_starting_gains("general")
        );
    }

    #[test]
    fn builtin_presets_are_valid() {
        for preset in builtin_presets() {
            preset.gains.validate_for_estimate().unwrap();
        }
    }

    #[test]
    fn lookup_without_general_uses_default() {
        let presets = vec![GainPreset::builtin("only", 3.0, 1.0, 0.0, "")];
        assert_eq!(lookup(&presets, "missing"), GainTriple::default());
    }
}
