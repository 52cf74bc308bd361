//! Workbench file loading and saving.

use std::path::Path;

use ps_project::Workbench;

use crate::error::{AppError, AppResult};

pub fn load_workbench(path: &Path) -> AppResult<Workbench> {
    let workbench = ps_project::load(path).map_err(|source| AppError::WorkbenchFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), name = %workbench.name, "loaded workbench");
    Ok(workbench)
}

pub fn save_workbench(path: &Path, workbench: &Workbench) -> AppResult<()> {
    ps_project::save(path, workbench).map_err(|source| AppError::WorkbenchFileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "saved workbench");
    Ok(())
}
