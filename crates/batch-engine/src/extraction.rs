use design_ops::{
    clear_solution, derive_prefix, export_body, reinitialize_engine, save_simulation, EngineReset,
};
use sector_types::PathConfig;
use star_host::Host;
use tracing::{info, instrument};

use crate::settings::AutomationSettings;
use crate::types::{at_step, FlowError, FlowReport, Step};

/// Save the simulation, clear its solution, restart the engine and export
/// the sector body. Runs once; the first failing step aborts the flow.
#[instrument(skip_all)]
pub fn run_extraction(
    host: &mut dyn Host,
    settings: &AutomationSettings,
    paths: &PathConfig,
    report: &mut FlowReport,
) -> Result<(), FlowError> {
    let session = host.session_path();
    let prefix = derive_prefix(session.as_deref(), &settings.extraction.fallback_prefix);
    info!(prefix = %prefix, session = ?session, "extraction prefix derived");

    let result = extract(host, settings, paths, &prefix);
    match &result {
        Ok(artifacts) => report.record_success(&prefix, artifacts.clone()),
        Err(err) => report.record_failure(&prefix, err),
    }
    result.map(|_| ())
}

fn extract(
    host: &mut dyn Host,
    settings: &AutomationSettings,
    paths: &PathConfig,
    prefix: &str,
) -> Result<Vec<String>, FlowError> {
    let lookups = &settings.lookups;
    let extraction = &settings.extraction;

    let simulation =
        save_simulation(host, &paths.export, prefix).map_err(at_step(Step::SaveState))?;
    clear_solution(host).map_err(at_step(Step::ClearSolution))?;

    let reset = EngineReset {
        module: &lookups.physics_module,
        scene: &lookups.extraction_scene,
        parameter: &lookups.start_parameter,
        units: &lookups.start_units,
        value: extraction.start_value,
    };
    reinitialize_engine(host, &reset).map_err(at_step(Step::ReinitializeEngine))?;

    let geometry = export_body(
        host,
        &lookups.extraction_model,
        &lookups.imported_body,
        &paths.export,
        prefix,
        &extraction.export,
    )
    .map_err(at_step(Step::ExportBody))?;

    Ok(vec![
        simulation.display().to_string(),
        geometry.display().to_string(),
    ])
}
