//! Simulation snapshot and geometry export steps.

use std::path::PathBuf;

use sector_types::{ExportOptions, ResolvedDirectory};
use star_host::Host;
use tracing::{debug, info, instrument};

use crate::import::single_body;
use crate::types::OpError;

/// Prefix used when the session path gives nothing usable.
pub const FALLBACK_PREFIX: &str = "sector";

/// File-name prefix for extraction outputs, derived from the session path.
///
/// Takes the last path segment, keeps everything before the first `_` and
/// drops a trailing `.sim`. Falls back to `fallback` when the path is missing
/// or nothing is left.
pub fn derive_prefix(session_path: Option<&str>, fallback: &str) -> String {
    let Some(path) = session_path.map(str::trim).filter(|p| !p.is_empty()) else {
        return fallback.to_string();
    };
    let segment = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = segment.split('_').next().unwrap_or(segment);
    let stem = stem.strip_suffix(".sim").unwrap_or(stem);
    if stem.is_empty() {
        fallback.to_string()
    } else {
        stem.to_string()
    }
}

/// Save the current simulation as `{prefix}.sim` under `export`.
#[instrument(skip(host, export))]
pub fn save_simulation(
    host: &mut dyn Host,
    export: &ResolvedDirectory,
    prefix: &str,
) -> Result<PathBuf, OpError> {
    let path = export.file(&format!("{prefix}.sim"));
    host.save_state(&path)?;
    info!(path = %path.display(), "simulation saved");
    Ok(path)
}

/// Clear the solution history, then the current solution.
#[instrument(skip(host))]
pub fn clear_solution(host: &mut dyn Host) -> Result<(), OpError> {
    host.clear_solution_history()?;
    host.clear_solution()?;
    debug!("solution cleared");
    Ok(())
}

/// How the physics engine is brought back up after the solution is cleared.
#[derive(Debug, Clone, Copy)]
pub struct EngineReset<'a> {
    /// Module resource loaded before starting the engine.
    pub module: &'a str,
    /// Scene prepared for interactive use once the engine runs.
    pub scene: &'a str,
    pub parameter: &'a str,
    pub units: &'a str,
    pub value: f64,
}

/// Restart the physics engine and set its operating parameter.
///
/// The module is loaded once to start the engine and once more after the
/// scene is prepared, matching how the environment expects to be driven.
#[instrument(skip(host))]
pub fn reinitialize_engine(host: &mut dyn Host, reset: &EngineReset<'_>) -> Result<(), OpError> {
    host.load_physics_module(reset.module)?;
    host.start_physics_engine()?;

    let scene = host.find_scene(reset.scene)?;
    host.set_advanced_rendering(scene, false)?;
    host.open_interactive(scene)?;

    host.load_physics_module(reset.module)?;
    let parameter = host.find_parameter(reset.parameter)?;
    let units = host.find_units(reset.units)?;
    host.set_engine_parameter(parameter, reset.value, units)?;
    host.update_physics_engine()?;

    info!(
        parameter = reset.parameter,
        value = reset.value,
        units = reset.units,
        "engine reinitialized"
    );
    Ok(())
}

/// Export the single body `body_name` of `model_name` as `{prefix}.x_b`.
#[instrument(skip(host, export, options))]
pub fn export_body(
    host: &mut dyn Host,
    model_name: &str,
    body_name: &str,
    export: &ResolvedDirectory,
    prefix: &str,
    options: &ExportOptions,
) -> Result<PathBuf, OpError> {
    let model = host.find_cad_model(model_name)?;
    let body = single_body(host, model, model_name, body_name)?;
    let path = export.file(&format!("{prefix}.x_b"));
    host.export_bodies(model, &[body], &path, options)?;
    info!(body = body_name, path = %path.display(), "body exported");
    Ok(path)
}
