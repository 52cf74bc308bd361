//! PID gain triple.

use crate::{CoreError, CoreResult, Real};

/// Proportional, integral and derivative gains of a feedback controller.
///
/// Construction through [`GainTriple::new`] validates; the public fields
/// allow form code to hold half-edited values, which [`GainTriple::validate`]
/// checks again before anything is computed from them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GainTriple {
    pub kp: Real,
    pub ki: Real,
    pub kd: Real,
}

impl GainTriple {
    pub fn new(kp: Real, ki: Real, kd: Real) -> CoreResult<Self> {
        let gains = Self { kp, ki, kd };
        gains.validate()?;
        Ok(gains)
    }

    /// Every gain must be finite and non-negative.
    pub fn validate(&self) -> CoreResult<()> {
        for (name, value) in self.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidGain { name, value });
            }
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), and additionally rejects `kp + ki == 0`,
    /// for which the settling-time estimate is undefined.
    pub fn validate_for_estimate(&self) -> CoreResult<()> {
        self.validate()?;
        if self.kp + self.ki <= 0.0 {
            return Err(CoreError::DegenerateGains);
        }
        Ok(())
    }

    pub fn named(&self) -> [(&'static str, Real); 3] {
        [("kp", self.kp), ("ki", self.ki), ("kd", self.kd)]
    }
}

impl Default for GainTriple {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.1,
            kd: 0.01,
        }
    }
}
