//! Side-by-side estimates for named gain sets.
//!
//! Every candidate goes through the same heuristic estimator; the best set is
//! the one with the lowest IAE, the first listed winning a tie.

use ps_controls::{GainPreset, PlantModel};
use ps_core::GainTriple;
use ps_metrics::{MetricSet, estimate};
use serde::Serialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub name: String,
    pub gains: GainTriple,
    pub metrics: MetricSet,
    /// Unrounded IAE used for ranking.
    #[serde(skip)]
    pub iae: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub plant: PlantModel,
    pub rows: Vec<ComparisonRow>,
    /// Name of the row with the lowest IAE.
    pub best: String,
    pub heuristic: bool,
    #[serde(skip)]
    best_index: usize,
}

impl Comparison {
    pub fn best_row(&self) -> &ComparisonRow {
        &self.rows[self.best_index]
    }

    pub fn is_best(&self, idx: usize) -> bool {
        idx == self.best_index
    }
}

/// Estimate every candidate and rank them by IAE.
pub fn compare_gain_sets(plant: &PlantModel, candidates: &[GainPreset]) -> AppResult<Comparison> {
    plant.validate()?;
    if candidates.is_empty() {
        return Err(AppError::InvalidInput("no gain sets to compare".to_string()));
    }

    let mut rows: Vec<ComparisonRow> = Vec::with_capacity(candidates.len());
    let mut best_index = 0;
    for (idx, candidate) in candidates.iter().enumerate() {
        candidate
            .gains
            .validate_for_estimate()
            .map_err(|err| AppError::InvalidInput(format!("gain set {}: {err}", candidate.name)))?;

        let GainTriple { kp, ki, kd } = candidate.gains;
        let raw = estimate(kp, ki, kd);
        if idx > 0 && raw.iae < rows[best_index].iae {
            best_index = idx;
        }
        rows.push(ComparisonRow {
            name: candidate.name.clone(),
            gains: candidate.gains,
            metrics: raw.to_metric_set(),
            iae: raw.iae,
        });
    }

    let best = rows[best_index].name.clone();
    tracing::debug!(candidates = rows.len(), %best, "compared gain sets");
    Ok(Comparison {
        plant: plant.clone(),
        rows,
        best,
        heuristic: true,
        best_index,
    })
}

/// Parse `NAME=KP,KI,KD`.
pub fn parse_gain_set(text: &str) -> AppResult<GainPreset> {
    let invalid = || AppError::InvalidInput(format!("expected NAME=KP,KI,KD, got {text:?}"));

    let (name, values) = text.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    let parsed = values
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;
    let &[kp, ki, kd] = parsed.as_slice() else {
        return Err(invalid());
    };

    Ok(GainPreset {
        name: name.to_string(),
        gains: GainTriple::new(kp, ki, kd)?,
        description: None,
    })
}
