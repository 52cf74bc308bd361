//! Run execution service.
//!
//! A "run" is a paced sequence of status stages that ends in a metrics
//! estimate. Simulate runs estimate the entered gains; auto-tune runs
//! estimate a randomized perturbation of the plant's baseline preset.

use std::fmt;
use std::time::{Duration, Instant};

use ps_controls::{GainPreset, PlantModel, presets};
use ps_core::GainTriple;
use ps_metrics::{MetricSet, estimate_checked};
use ps_project::{AutoTuneDef, PacingDef, Workbench};
use serde::Serialize;

use crate::autotune::{perturb_gains, rng_from_seed};
use crate::error::{AppError, AppResult};
use crate::pacing::{CancelToken, Pacer};
use crate::progress::{RunProgressEvent, RunStage};

/// What a run does once its stages have been paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Simulate,
    AutoTune,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunMode::Simulate => "simulation",
            RunMode::AutoTune => "auto-tune",
        })
    }
}

/// Request to execute a run. Owned so it can move to a worker thread.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub mode: RunMode,
    pub plant: PlantModel,
    pub gains: GainTriple,
    pub presets: Vec<GainPreset>,
    pub pacing: PacingDef,
    pub auto_tune: AutoTuneDef,
}

impl RunRequest {
    pub fn from_workbench(workbench: &Workbench, mode: RunMode) -> Self {
        Self {
            mode,
            plant: workbench.plant.clone(),
            gains: workbench.gains,
            presets: workbench.presets.clone(),
            pacing: workbench.pacing.clone(),
            auto_tune: workbench.auto_tune.clone(),
        }
    }

    /// Same request with all pacing delays removed.
    pub fn without_delays(mut self) -> Self {
        self.pacing.stage_delay_ms = 0;
        self.pacing.auto_tune_stage_delay_ms = 0;
        self
    }

    fn stage_delay(&self) -> Duration {
        let ms = match self.mode {
            RunMode::Simulate => self.pacing.stage_delay_ms,
            RunMode::AutoTune => self.pacing.auto_tune_stage_delay_ms,
        };
        Duration::from_millis(ms)
    }

    /// Gains the auto-tune perturbs: the preset named by the plant kind.
    pub fn baseline_gains(&self) -> GainTriple {
        presets::lookup(&self.presets, self.plant.kind().default_preset())
    }

    /// Checks that run before any stage is paced.
    pub fn validate(&self) -> AppResult<()> {
        self.plant.validate()?;
        match self.mode {
            RunMode::Simulate => self.gains.validate_for_estimate()?,
            RunMode::AutoTune => {
                self.baseline_gains().validate_for_estimate()?;
                if !(0.0..=1.0).contains(&self.auto_tune.spread) {
                    return Err(AppError::InvalidInput(format!(
                        "auto-tune spread {} is outside [0, 1]",
                        self.auto_tune.spread
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    pub mode: RunMode,
    pub plant: PlantModel,
    /// Gains the metrics were computed from.
    pub gains: GainTriple,
    /// Auto-tune baseline the gains were derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<GainTriple>,
    pub metrics: MetricSet,
    /// Always true: plant type and parameters did not influence the metrics.
    pub heuristic: bool,
}

impl EstimateReport {
    pub const HEURISTIC_NOTICE: &'static str = "Heuristic estimate from the gains only; \
        the plant model and its parameters were not simulated.";
}

/// Estimate metrics for `plant` and `gains` with no pacing.
pub fn estimate_now(plant: &PlantModel, gains: GainTriple) -> AppResult<EstimateReport> {
    plant.validate()?;
    let metrics = estimate_checked(&gains)?;
    Ok(EstimateReport {
        mode: RunMode::Simulate,
        plant: plant.clone(),
        gains,
        baseline: None,
        metrics,
        heuristic: true,
    })
}

pub fn execute(
    request: &RunRequest,
    pacer: &mut dyn Pacer,
    cancel: &CancelToken,
) -> AppResult<EstimateReport> {
    execute_with_progress(request, pacer, cancel, None)
}

pub fn execute_with_progress(
    request: &RunRequest,
    pacer: &mut dyn Pacer,
    cancel: &CancelToken,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<EstimateReport> {
    let started = Instant::now();
    request.validate()?;

    tracing::info!(
        mode = %request.mode,
        plant = %request.plant.kind(),
        "starting run"
    );

    let stages = RunStage::sequence(request.mode);
    let delay = request.stage_delay();
    let mut gains = request.gains;
    let mut baseline = None;
    let mut metrics = None;

    for (idx, &stage) in stages.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::warn!(mode = %request.mode, stage = stage.label(), "run cancelled");
            return Err(AppError::Cancelled);
        }

        let fraction = idx as f64 / (stages.len() - 1) as f64;
        tracing::debug!(stage = stage.label(), fraction, "run stage");
        if let Some(cb) = progress_cb.as_deref_mut() {
            cb(RunProgressEvent::stage(
                request.mode,
                stage,
                fraction,
                started.elapsed().as_secs_f64(),
            ));
        }

        match stage {
            RunStage::Optimizing => {
                let base = request.baseline_gains();
                let mut rng = rng_from_seed(request.auto_tune.seed);
                gains = perturb_gains(base, request.auto_tune.spread, &mut rng);
                baseline = Some(base);
                tracing::debug!(kp = gains.kp, ki = gains.ki, kd = gains.kd, "tuned gains");
            }
            RunStage::ComputingMetrics => {
                metrics = Some(estimate_checked(&gains)?);
            }
            RunStage::Completed => break,
            _ => {}
        }

        pacer.pause(delay);
    }

    let metrics = metrics.ok_or(AppError::Cancelled)?;
    tracing::info!(
        mode = %request.mode,
        elapsed_s = started.elapsed().as_secs_f64(),
        "run completed"
    );

    Ok(EstimateReport {
        mode: request.mode,
        plant: request.plant.clone(),
        gains,
        baseline,
        metrics,
        heuristic: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::InstantPacer;
    use ps_metrics::MetricKey;

    fn request(mode: RunMode) -> RunRequest {
        RunRequest::from_workbench(&Workbench::default(), mode)
    }

    #[test]
    fn simulate_paces_every_stage_but_the_last() {
        let mut pacer = InstantPacer::default();
        execute(&request(RunMode::Simulate), &mut pacer, &CancelToken::new()).unwrap();
        assert_eq!(pacer.requested, vec![Duration::from_millis(500); 3]);
    }

    #[test]
    fn without_delays_requests_zero_pauses() {
        let mut pacer = InstantPacer::default();
        let req = request(RunMode::AutoTune).without_delays();
        execute(&req, &mut pacer, &CancelToken::new()).unwrap();
        assert!(pacer.requested.iter().all(|d| d.is_zero()));
        assert_eq!(pacer.requested.len(), 4);
    }

    #[test]
    fn invalid_gains_fail_before_pacing() {
        let mut req = request(RunMode::Simulate);
        req.gains = GainTriple {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
        };
        let mut pacer = InstantPacer::default();
        let err = execute(&req, &mut pacer, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, AppError::Gains(ps_core::CoreError::DegenerateGains)));
        assert!(pacer.requested.is_empty());
    }

    #[test]
    fn estimate_now_matches_estimator() {
        let gains = GainTriple::new(1.2, 0.6, 0.0).unwrap();
        let report = estimate_now(&PlantModel::default(), gains).unwrap();
        assert_eq!(report.metrics.value(MetricKey::Overshoot), "20.5");
        assert!(report.heuristic);
    }
}
