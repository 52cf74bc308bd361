//! Shared application service layer for the PID workbench.
//!
//! This crate provides a unified interface for both CLI and GUI frontends,
//! centralizing workbench file handling, the session state machine, paced
//! run execution and rendering.

pub mod autotune;
pub mod compare;
pub mod error;
pub mod pacing;
pub mod progress;
pub mod render;
pub mod run_service;
pub mod session;
pub mod workbench_service;

// Re-export key types for convenience
pub use compare::{Comparison, ComparisonRow, compare_gain_sets, parse_gain_set};
pub use error::{AppError, AppResult};
pub use pacing::{CancelToken, InstantPacer, Pacer, SleepPacer};
pub use progress::{RunProgressEvent, RunStage};
pub use render::{
    escape_html, render_comparison_html, render_comparison_json, render_comparison_text,
    render_page_html, render_results_html, render_results_json, render_results_text,
    render_status_html,
};
pub use run_service::{EstimateReport, RunMode, RunRequest, estimate_now, execute, execute_with_progress};
pub use session::{
    SessionController, SessionState, SessionView, StatusEntry, StatusLevel, STATUS_LOG_CAPACITY,
};
pub use workbench_service::{load_workbench, save_workbench};
