use crate::run_service::RunMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Initializing,
    Simulating,
    AnalyzingPlant,
    Optimizing,
    ApplyingGains,
    ComputingMetrics,
    Completed,
}

impl RunStage {
    pub fn label(self) -> &'static str {
        match self {
            RunStage::Initializing => "initializing",
            RunStage::Simulating => "simulating",
            RunStage::AnalyzingPlant => "analyzing plant",
            RunStage::Optimizing => "optimizing",
            RunStage::ApplyingGains => "applying gains",
            RunStage::ComputingMetrics => "computing metrics",
            RunStage::Completed => "completed",
        }
    }

    /// Status text shown while the stage is active.
    pub fn message(self, mode: RunMode) -> &'static str {
        match (self, mode) {
            (RunStage::Initializing, _) => "Initializing simulation...",
            (RunStage::Simulating, _) => "Running closed-loop simulation...",
            (RunStage::AnalyzingPlant, _) => "Analyzing plant response...",
            (RunStage::Optimizing, _) => "Searching for better gains...",
            (RunStage::ApplyingGains, _) => "Applying tuned gains...",
            (RunStage::ComputingMetrics, _) => "Computing performance metrics...",
            (RunStage::Completed, RunMode::Simulate) => "Simulation complete",
            (RunStage::Completed, RunMode::AutoTune) => "Auto-tune complete",
        }
    }

    /// Stage sequence for a run mode, ending in `Completed`.
    pub fn sequence(mode: RunMode) -> &'static [RunStage] {
        match mode {
            RunMode::Simulate => &[
                RunStage::Initializing,
                RunStage::Simulating,
                RunStage::ComputingMetrics,
                RunStage::Completed,
            ],
            RunMode::AutoTune => &[
                RunStage::AnalyzingPlant,
                RunStage::Optimizing,
                RunStage::ApplyingGains,
                RunStage::ComputingMetrics,
                RunStage::Completed,
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub mode: RunMode,
    pub stage: RunStage,
    pub fraction_complete: f64,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}

impl RunProgressEvent {
    pub fn stage(
        mode: RunMode,
        stage: RunStage,
        fraction_complete: f64,
        elapsed_wall_s: f64,
    ) -> Self {
        Self {
            mode,
            stage,
            fraction_complete,
            elapsed_wall_s,
            message: Some(stage.message(mode).to_string()),
        }
    }
}
