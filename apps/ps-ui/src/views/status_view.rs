use ps_app::{RunProgressEvent, SessionState, StatusEntry, StatusLevel};
use std::collections::VecDeque;

#[derive(Default)]
pub struct StatusView;

impl StatusView {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &SessionState,
        progress: Option<&RunProgressEvent>,
        entries: &VecDeque<StatusEntry>,
    ) {
        ui.horizontal(|ui| {
            ui.strong(state.label());
            if let SessionState::Failed { message } = state {
                ui.colored_label(egui::Color32::RED, message);
            }
        });

        if let Some(event) = progress {
            ui.add(
                egui::ProgressBar::new(event.fraction_complete as f32)
                    .text(event.message.clone().unwrap_or_default()),
            );
        }

        egui::ScrollArea::vertical()
            .max_height(140.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for entry in entries {
                    let color = match entry.level {
                        StatusLevel::Info => ui.visuals().text_color(),
                        StatusLevel::Success => egui::Color32::from_rgb(60, 170, 80),
                        StatusLevel::Error => egui::Color32::RED,
                    };
                    ui.colored_label(
                        color,
                        format!("{}  {}", entry.at.format("%H:%M:%S"), entry.text),
                    );
                }
            });
    }
}
