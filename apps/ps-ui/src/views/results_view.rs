use egui_extras::{Column, TableBuilder};
use ps_app::EstimateReport;

#[derive(Default)]
pub struct ResultsView;

impl ResultsView {
    pub fn show(&mut self, ui: &mut egui::Ui, report: Option<&EstimateReport>) {
        ui.heading("Performance metrics");

        let Some(report) = report else {
            ui.label("No results yet. Run a simulation or auto-tune.");
            return;
        };

        ui.label(format!(
            "Kp = {}, Ki = {}, Kd = {}",
            report.gains.kp, report.gains.ki, report.gains.kd
        ));
        if let Some(base) = &report.baseline {
            ui.label(format!(
                "Auto-tuned from baseline Kp = {}, Ki = {}, Kd = {}",
                base.kp, base.ki, base.kd
            ));
        }
        ui.separator();

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Metric");
                });
                header.col(|ui| {
                    ui.strong("Value");
                });
                header.col(|ui| {
                    ui.strong("Unit");
                });
            })
            .body(|mut body| {
                for entry in &report.metrics {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(entry.key.label());
                        });
                        row.col(|ui| {
                            ui.monospace(&entry.value);
                        });
                        row.col(|ui| {
                            ui.label(entry.unit);
                        });
                    });
                }
            });

        if report.heuristic {
            ui.add_space(6.0);
            ui.colored_label(
                egui::Color32::from_rgb(200, 150, 40),
                EstimateReport::HEURISTIC_NOTICE,
            );
        }
    }
}
