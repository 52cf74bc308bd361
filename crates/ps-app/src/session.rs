//! Session controller: the single owner of form state and run state.
//!
//! Front-ends never keep their own "is running" flag. They call
//! [`SessionController::begin`] to obtain a request and a cancel token, hand
//! both to the run service (inline or on a worker), and report the outcome
//! back through `finish`, `fail` or `cancelled`.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use ps_controls::{GainPreset, PlantKind, PlantModel, presets};
use ps_core::GainTriple;
use ps_project::{AutoTuneDef, PacingDef, Workbench};

use crate::error::{AppError, AppResult};
use crate::pacing::{CancelToken, Pacer};
use crate::progress::RunProgressEvent;
use crate::run_service::{self, EstimateReport, RunMode, RunRequest};

/// Status log entries kept before the oldest is dropped.
pub const STATUS_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Running { mode: RunMode },
    Stopping { mode: RunMode },
    Completed { mode: RunMode },
    Failed { message: String },
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            SessionState::Running { .. } | SessionState::Stopping { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Ready",
            SessionState::Running { mode: RunMode::Simulate } => "Simulating",
            SessionState::Running { mode: RunMode::AutoTune } => "Auto-tuning",
            SessionState::Stopping { .. } => "Stopping",
            SessionState::Completed { .. } => "Done",
            SessionState::Failed { .. } => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusEntry {
    pub at: DateTime<Local>,
    pub level: StatusLevel,
    pub text: String,
}

/// Read-only props for rendering a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub name: &'a str,
    pub state: &'a SessionState,
    pub plant: &'a PlantModel,
    pub gains: &'a GainTriple,
    pub report: Option<&'a EstimateReport>,
    pub status: &'a VecDeque<StatusEntry>,
}

#[derive(Debug)]
pub struct SessionController {
    name: String,
    state: SessionState,
    plant: PlantModel,
    gains: GainTriple,
    presets: Vec<GainPreset>,
    pacing: PacingDef,
    auto_tune: AutoTuneDef,
    report: Option<EstimateReport>,
    status: VecDeque<StatusEntry>,
    cancel: Option<CancelToken>,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(Workbench::default())
    }
}

impl SessionController {
    pub fn new(workbench: Workbench) -> Self {
        Self {
            name: workbench.name,
            state: SessionState::Idle,
            plant: workbench.plant,
            gains: workbench.gains,
            presets: workbench.presets,
            pacing: workbench.pacing,
            auto_tune: workbench.auto_tune,
            report: None,
            status: VecDeque::new(),
            cancel: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn plant(&self) -> &PlantModel {
        &self.plant
    }

    pub fn gains(&self) -> &GainTriple {
        &self.gains
    }

    pub fn presets(&self) -> &[GainPreset] {
        &self.presets
    }

    pub fn report(&self) -> Option<&EstimateReport> {
        self.report.as_ref()
    }

    pub fn status(&self) -> &VecDeque<StatusEntry> {
        &self.status
    }

    pub fn auto_tune_mut(&mut self) -> &mut AutoTuneDef {
        &mut self.auto_tune
    }

    /// Form edits are refused while a run is in flight.
    pub fn set_gains(&mut self, gains: GainTriple) -> AppResult<()> {
        self.ensure_idle()?;
        self.gains = gains;
        Ok(())
    }

    /// Switch plant type, resetting its parameters to the defaults.
    pub fn set_plant_kind(&mut self, kind: PlantKind) -> AppResult<()> {
        self.ensure_idle()?;
        if self.plant.kind() != kind {
            self.plant = PlantModel::default_for(kind);
        }
        Ok(())
    }

    pub fn set_plant_parameter(&mut self, name: &str, value: f64) -> AppResult<()> {
        self.ensure_idle()?;
        self.plant.set_parameter(name, value)?;
        Ok(())
    }

    /// Load a preset's gains into the form.
    pub fn apply_preset(&mut self, name: &str) -> AppResult<()> {
        self.ensure_idle()?;
        let preset = self
            .presets
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown preset: {name}")))?;
        self.gains = preset.gains;
        let text = format!(
            "Applied preset {} (Kp={}, Ki={}, Kd={})",
            preset.name, preset.gains.kp, preset.gains.ki, preset.gains.kd
        );
        self.push_status(StatusLevel::Info, text);
        Ok(())
    }

    /// Baseline gains an auto-tune would start from.
    pub fn baseline_gains(&self) -> GainTriple {
        presets::lookup(&self.presets, self.plant.kind().default_preset())
    }

    /// Start a run. Validation failures move the session to `Failed` and are
    /// returned to the caller.
    pub fn begin(&mut self, mode: RunMode) -> AppResult<(RunRequest, CancelToken)> {
        if let SessionState::Running { mode: active } | SessionState::Stopping { mode: active } =
            self.state
        {
            return Err(AppError::Busy(active));
        }

        let request = RunRequest {
            mode,
            plant: self.plant.clone(),
            gains: self.gains,
            presets: self.presets.clone(),
            pacing: self.pacing.clone(),
            auto_tune: self.auto_tune.clone(),
        };
        if let Err(err) = request.validate() {
            self.fail(err.to_string());
            return Err(err);
        }

        let cancel = CancelToken::new();
        self.cancel = Some(cancel.clone());
        self.state = SessionState::Running { mode };
        tracing::debug!(%mode, "session run started");
        self.push_status(StatusLevel::Info, format!("Starting {mode}..."));
        Ok((request, cancel))
    }

    /// Record a progress event in the status log.
    pub fn on_progress(&mut self, event: &RunProgressEvent) {
        if !self.is_running() {
            return;
        }
        if let Some(message) = &event.message {
            self.push_status(StatusLevel::Info, message.clone());
        }
    }

    /// Ask the active run to stop. Returns `false` when nothing is running.
    pub fn request_stop(&mut self) -> bool {
        match self.state {
            SessionState::Running { mode } => {
                if let Some(cancel) = &self.cancel {
                    cancel.cancel();
                }
                self.state = SessionState::Stopping { mode };
                self.push_status(StatusLevel::Info, "Stopping...".to_string());
                true
            }
            _ => false,
        }
    }

    pub fn finish(&mut self, report: EstimateReport) -> AppResult<()> {
        let mode = match self.state {
            SessionState::Running { mode } | SessionState::Stopping { mode } => mode,
            _ => return Err(AppError::NotRunning),
        };
        if mode == RunMode::AutoTune {
            self.gains = report.gains;
        }
        let text = format!(
            "{} complete (Kp={}, Ki={}, Kd={})",
            capitalize(&mode.to_string()),
            report.gains.kp,
            report.gains.ki,
            report.gains.kd
        );
        self.report = Some(report);
        self.cancel = None;
        self.state = SessionState::Completed { mode };
        self.push_status(StatusLevel::Success, text);
        Ok(())
    }

    pub fn fail(&mut self, message: String) {
        tracing::warn!(%message, "session run failed");
        self.cancel = None;
        self.push_status(StatusLevel::Error, message.clone());
        self.state = SessionState::Failed { message };
    }

    /// The run observed the stop request and gave up.
    pub fn cancelled(&mut self) {
        self.cancel = None;
        self.state = SessionState::Idle;
        self.push_status(StatusLevel::Info, "Stopped".to_string());
    }

    /// Route a run outcome to `finish`, `cancelled` or `fail`.
    pub fn complete(&mut self, outcome: AppResult<EstimateReport>) -> AppResult<()> {
        match outcome {
            Ok(report) => self.finish(report),
            Err(AppError::Cancelled) => {
                self.cancelled();
                Ok(())
            }
            Err(err) => {
                self.fail(err.to_string());
                Err(err)
            }
        }
    }

    /// Run to completion on the calling thread.
    pub fn run_blocking(
        &mut self,
        mode: RunMode,
        pacer: &mut dyn Pacer,
        mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
    ) -> AppResult<&EstimateReport> {
        let (request, cancel) = self.begin(mode)?;
        let outcome = run_service::execute_with_progress(
            &request,
            pacer,
            &cancel,
            Some(&mut |event: RunProgressEvent| {
                self.on_progress(&event);
                if let Some(cb) = progress_cb.as_deref_mut() {
                    cb(event);
                }
            }),
        );
        self.complete(outcome)?;
        match self.state {
            SessionState::Completed { .. } => self.report.as_ref().ok_or(AppError::NotRunning),
            _ => Err(AppError::Cancelled),
        }
    }

    /// Back to `Idle` with the default form, keeping presets and pacing.
    pub fn reset(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        self.state = SessionState::Idle;
        self.plant = PlantModel::default();
        self.gains = GainTriple::default();
        self.report = None;
        self.status.clear();
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            name: &self.name,
            state: &self.state,
            plant: &self.plant,
            gains: &self.gains,
            report: self.report.as_ref(),
            status: &self.status,
        }
    }

    pub fn to_workbench(&self) -> Workbench {
        Workbench {
            version: ps_project::LATEST_VERSION,
            name: self.name.clone(),
            plant: self.plant.clone(),
            gains: self.gains,
            presets: self.presets.clone(),
            pacing: self.pacing.clone(),
            auto_tune: self.auto_tune.clone(),
        }
    }

    fn ensure_idle(&self) -> AppResult<()> {
        match self.state {
            SessionState::Running { mode } | SessionState::Stopping { mode } => {
                Err(AppError::Busy(mode))
            }
            _ => Ok(()),
        }
    }

    fn push_status(&mut self, level: StatusLevel, text: String) {
        if self.status.len() == STATUS_LOG_CAPACITY {
            self.status.pop_front();
        }
        self.status.push_back(StatusEntry {
            at: Local::now(),
            level,
            text,
        });
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
