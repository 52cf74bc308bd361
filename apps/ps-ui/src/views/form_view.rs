use ps_controls::{GainPreset, PlantKind, PlantModel, manual_tuning_guide};
use ps_core::GainTriple;
use std::ops::RangeInclusive;

/// Gains only need to be finite and non-negative.
const GAIN_RANGE: RangeInclusive<f64> = 0.0..=f64::MAX;

/// Edits requested by the form this frame. Applied by the app through the
/// session controller, which refuses them while a run is active.
#[derive(Default)]
pub struct FormActions {
    pub plant_kind: Option<PlantKind>,
    pub plant_parameter: Option<(&'static str, f64)>,
    pub gains: Option<GainTriple>,
    pub preset: Option<String>,
}

#[derive(Default)]
pub struct FormView {
    show_guide: bool,
}

impl FormView {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        plant: &PlantModel,
        gains: &GainTriple,
        presets: &[GainPreset],
        editable: bool,
    ) -> FormActions {
        let mut actions = FormActions::default();

        ui.add_enabled_ui(editable, |ui| {
            ui.heading("Plant");
            let mut kind = plant.kind();
            egui::ComboBox::from_label("Type")
                .selected_text(kind.label())
                .show_ui(ui, |ui| {
                    for candidate in PlantKind::ALL {
                        ui.selectable_value(&mut kind, candidate, candidate.label());
                    }
                });
            if kind != plant.kind() {
                actions.plant_kind = Some(kind);
            }

            egui::Grid::new("plant_parameters")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui| {
                    for param in plant.parameters() {
                        let mut value = param.value;
                        ui.label(param.label);
                        let mut drag = egui::DragValue::new(&mut value).speed(0.01);
                        if param.min_value().is_finite() {
                            drag = drag.range(param.min_value()..=f64::MAX);
                        }
                        if ui.add(drag).changed() {
                            actions.plant_parameter = Some((param.name, value));
                        }
                        ui.label(param.unit);
                        ui.end_row();
                    }
                });

            ui.separator();
            ui.heading("Controller gains");
            let mut edited = *gains;
            egui::Grid::new("gains").num_columns(2).show(ui, |ui| {
                for (label, value) in [
                    ("Kp", &mut edited.kp),
                    ("Ki", &mut edited.ki),
                    ("Kd", &mut edited.kd),
                ] {
                    ui.label(label);
                    ui.add(
                        egui::DragValue::new(value)
                            .speed(0.01)
                            .range(GAIN_RANGE)
                            .max_decimals(4),
                    );
                    ui.end_row();
                }
            });
            if edited != *gains {
                actions.gains = Some(edited);
            }

            ui.horizontal_wrapped(|ui| {
                ui.label("Presets:");
                for preset in presets {
                    let button = ui.button(&preset.name);
                    let button = match &preset.description {
                        Some(description) => button.on_hover_text(description),
                        None => button,
                    };
                    if button.clicked() {
                        actions.preset = Some(preset.name.clone());
                    }
                }
            });
        });

        ui.separator();
        ui.checkbox(&mut self.show_guide, "Show tuning guide");
        if self.show_guide {
            for step in manual_tuning_guide() {
                ui.label(format!("• {}", step.text));
            }
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_range_matches_gain_validation() {
        assert!(GAIN_RANGE.contains(&0.0));
        assert!(GAIN_RANGE.contains(&1.0e6));
        assert!(!GAIN_RANGE.contains(&-0.001));
        for value in [0.0, 2500.0, 1.0e12] {
            assert!(GainTriple::new(value, value, value).is_ok());
            assert!(GAIN_RANGE.contains(&value));
        }
    }
}
