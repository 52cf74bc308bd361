use crate::run_worker::{RunWorker, WorkerMessage};
use crate::views::{FormActions, FormView, ResultsView, StatusView};
use egui_file_dialog::{DialogMode, FileDialog};
use ps_app::{RunMode, RunProgressEvent, SessionController, load_workbench, save_workbench};
use std::path::PathBuf;

pub struct WorkbenchApp {
    session: SessionController,
    workbench_path: Option<PathBuf>,
    file_dialog: FileDialog,
    file_dialog_action: Option<FileDialogAction>,
    last_directory: Option<PathBuf>,
    form_view: FormView,
    results_view: ResultsView,
    status_view: StatusView,
    run_worker: Option<RunWorker>,
    latest_progress: Option<RunProgressEvent>,
    last_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileDialogAction {
    Open,
    Save,
}

impl WorkbenchApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            session: SessionController::default(),
            workbench_path: None,
            file_dialog: FileDialog::new(),
            file_dialog_action: None,
            last_directory: None,
            form_view: FormView::default(),
            results_view: ResultsView,
            status_view: StatusView,
            run_worker: None,
            latest_progress: None,
            last_message: None,
        }
    }

    fn open_workbench(&mut self, path: PathBuf) {
        if self.session.is_running() {
            self.last_message = Some("Stop the active run before opening a workbench".into());
            return;
        }
        match load_workbench(&path) {
            Ok(workbench) => {
                self.session = SessionController::new(workbench);
                self.last_message = Some(format!("Opened {}", path.display()));
                self.last_directory = path.parent().map(|p| p.to_path_buf());
                self.workbench_path = Some(path);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to open workbench");
                self.last_message = Some(e.to_string());
            }
        }
    }

    fn save_workbench_as(&mut self, path: PathBuf) {
        match save_workbench(&path, &self.session.to_workbench()) {
            Ok(()) => {
                self.last_message = Some(format!("Saved {}", path.display()));
                self.last_directory = path.parent().map(|p| p.to_path_buf());
                self.workbench_path = Some(path);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save workbench");
                self.last_message = Some(e.to_string());
            }
        }
    }

    fn start_run(&mut self, ctx: &egui::Context, mode: RunMode) {
        match self.session.begin(mode) {
            Ok((request, cancel)) => {
                self.latest_progress = None;
                self.run_worker = Some(RunWorker::start(request, cancel, ctx.clone()));
            }
            Err(e) => self.last_message = Some(e.to_string()),
        }
    }

    fn poll_worker(&mut self) {
        let mut outcome = None;

        if let Some(worker) = &self.run_worker {
            while let Ok(msg) = worker.progress_rx.try_recv() {
                match msg {
                    WorkerMessage::Progress(event) => {
                        self.session.on_progress(&event);
                        self.latest_progress = Some(event);
                    }
                    WorkerMessage::Finished(result) => {
                        outcome = Some(result);
                        break;
                    }
                }
            }
        }

        if let Some(result) = outcome {
            self.run_worker = None;
            self.latest_progress = None;
            // Failures are already recorded in the session status log.
            let _ = self.session.complete(result);
        }
    }

    fn apply_form_actions(&mut self, actions: FormActions) {
        let result = if let Some(kind) = actions.plant_kind {
            self.session.set_plant_kind(kind)
        } else if let Some((name, value)) = actions.plant_parameter {
            self.session.set_plant_parameter(name, value)
        } else if let Some(name) = actions.preset {
            self.session.apply_preset(&name)
        } else if let Some(gains) = actions.gains {
            self.session.set_gains(gains)
        } else {
            Ok(())
        };
        if let Err(e) = result {
            self.last_message = Some(e.to_string());
        }
    }
}

impl eframe::App for WorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();
        let running = self.session.is_running();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add_enabled_ui(!running, |ui| {
                    if ui.button("Open").clicked() {
                        self.file_dialog_action = Some(FileDialogAction::Open);
                        let initial_dir = self.last_directory.as_ref().and_then(|p| p.to_str());
                        let _ = self
                            .file_dialog
                            .open(DialogMode::SelectFile, true, initial_dir);
                    }
                });

                if ui.button("Save").clicked() {
                    match self.workbench_path.clone() {
                        Some(path) => self.save_workbench_as(path),
                        None => {
                            self.file_dialog_action = Some(FileDialogAction::Save);
                            self.file_dialog.save_file();
                        }
                    }
                }

                ui.separator();

                ui.add_enabled_ui(!running, |ui| {
                    if ui.button("Run Simulation").clicked() {
                        self.start_run(ctx, RunMode::Simulate);
                    }
                    if ui.button("Auto-Tune").clicked() {
                        self.start_run(ctx, RunMode::AutoTune);
                    }
                });

                if running && ui.button("Stop").clicked() {
                    self.session.request_stop();
                }

                ui.add_enabled_ui(!running, |ui| {
                    if ui.button("Reset").clicked() {
                        self.session.reset();
                        self.last_message = None;
                    }
                });

                ui.separator();
                ui.label("Spread");
                ui.add_enabled(
                    !running,
                    egui::DragValue::new(&mut self.session.auto_tune_mut().spread)
                        .speed(0.01)
                        .range(0.0..=1.0),
                );
            });
        });

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            match self.file_dialog_action.take() {
                Some(FileDialogAction::Open) => self.open_workbench(path.to_path_buf()),
                Some(FileDialogAction::Save) => self.save_workbench_as(path.to_path_buf()),
                None => {}
            }
        }

        egui::TopBottomPanel::bottom("status")
            .resizable(true)
            .show(ctx, |ui| {
                self.status_view.show(
                    ui,
                    self.session.state(),
                    self.latest_progress.as_ref(),
                    self.session.status(),
                );
                if let Some(msg) = &self.last_message {
                    ui.label(msg);
                }
            });

        let form_actions = egui::SidePanel::left("form")
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| {
                        self.form_view.show(
                            ui,
                            self.session.plant(),
                            self.session.gains(),
                            self.session.presets(),
                            !running,
                        )
                    })
                    .inner
            })
            .inner;
        self.apply_form_actions(form_actions);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.results_view.show(ui, self.session.report());
        });
    }
}
