use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid gain {name} = {value}: gains must be finite and non-negative")]
    InvalidGain { name: &'static str, value: f64 },

    #[error("Degenerate gains: kp + ki must be greater than zero")]
    DegenerateGains,
}
