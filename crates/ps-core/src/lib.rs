//! ps-core: stable foundation for the PID workbench.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - gains (the validated kp/ki/kd triple)
//! - error (shared error types)

pub mod error;
pub mod gains;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use gains::GainTriple;
pub use numeric::*;
