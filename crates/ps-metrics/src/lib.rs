//! Heuristic step-response metrics for a PID gain triple.
//!
//! The numbers produced here are closed-form expressions of the gains. No
//! plant is simulated, and neither the plant type nor its parameters enter
//! the computation. Callers that present these values should say so.
//!
//! Two entry points:
//! - [`estimate`]: pure arithmetic, no validation. Out-of-domain input
//!   (non-finite values, `kp + ki == 0`) propagates as NaN/infinity.
//! - [`estimate_checked`]: validates the gains, rejects the degenerate
//!   `kp + ki == 0` case and returns a formatted [`MetricSet`].

pub mod estimator;
pub mod metric_set;

pub use estimator::{RawMetrics, estimate, estimate_checked};
pub use metric_set::{MetricEntry, MetricKey, MetricSet};
