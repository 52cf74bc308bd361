//! ps-project: workbench file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_workbench};

use std::path::Path;

/// Current workbench file version.
pub const LATEST_VERSION: u32 = 1;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<Workbench> {
    let content = std::fs::read_to_string(path)?;
    let workbench: Workbench = serde_yaml::from_str(&content)?;
    validate_workbench(&workbench)?;
    Ok(workbench)
}

pub fn save_yaml(path: &Path, workbench: &Workbench) -> ProjectResult<()> {
    validate_workbench(workbench)?;
    let content = serde_yaml::to_string(workbench)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Workbench> {
    let content = std::fs::read_to_string(path)?;
    let workbench: Workbench = serde_json::from_str(&content)?;
    validate_workbench(&workbench)?;
    Ok(workbench)
}

pub fn save_json(path: &Path, workbench: &Workbench) -> ProjectResult<()> {
    validate_workbench(workbench)?;
    let content = serde_json::to_string_pretty(workbench)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &Path) -> ProjectResult<Workbench> {
    if is_json(path) {
        load_json(path)
    } else {
        load_yaml(path)
    }
}

/// Save by extension: `.json` as JSON, anything else as YAML.
pub fn save(path: &Path, workbench: &Workbench) -> ProjectResult<()> {
    if is_json(path) {
        save_json(path, workbench)
    } else {
        save_yaml(path, workbench)
    }
}
