use design_ops::{build_section, import_design, materialize};
use sector_types::{DesignName, PathConfig};
use star_host::Host;
use tracing::{info, instrument, warn};

use crate::settings::{AutomationSettings, FailurePolicy};
use crate::types::{at_design, FlowError, FlowReport, Step};

/// Import, materialize and section every design of the comparison range,
/// in ascending index order.
#[instrument(skip_all, fields(designs = settings.comparison.designs.count))]
pub fn run_comparison(
    host: &mut dyn Host,
    settings: &AutomationSettings,
    paths: &PathConfig,
    report: &mut FlowReport,
) -> Result<(), FlowError> {
    let designs: Vec<(u32, DesignName)> = settings.comparison.designs.designs().collect();
    if designs.is_empty() {
        warn!("comparison range is empty, nothing to do");
    }

    let mut failed = Vec::new();
    for (position, (index, design)) in designs.iter().enumerate() {
        match process_design(host, settings, paths, *index, design) {
            Ok(artifacts) => report.record_success(design.as_str(), artifacts),
            Err(err) => {
                report.record_failure(design.as_str(), &err);
                match settings.comparison.policy {
                    FailurePolicy::Abort => {
                        for (_, rest) in &designs[position + 1..] {
                            report.record_skipped(rest.as_str());
                        }
                        return Err(err);
                    }
                    FailurePolicy::Continue => {
                        warn!(design = %design, error = %err, "design failed, continuing");
                        failed.push(design.clone());
                    }
                }
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(FlowError::BatchFailed {
            failed,
            total: designs.len(),
        })
    }
}

/// Run the per-design pipeline. Returns the files the design was read from.
fn process_design(
    host: &mut dyn Host,
    settings: &AutomationSettings,
    paths: &PathConfig,
    index: u32,
    design: &DesignName,
) -> Result<Vec<String>, FlowError> {
    let comparison = &settings.comparison;
    let lookups = &settings.lookups;
    let geometry = paths
        .designs
        .file(&design.file_name(&comparison.geometry_extension));

    import_design(
        host,
        design,
        &geometry,
        &lookups.import_target(),
        &comparison.import,
    )
    .map_err(at_design(design, index, Step::Import))?;

    let part = materialize(
        host,
        &lookups.comparison_model,
        design.as_str(),
        &comparison.faceting,
    )
    .map_err(at_design(design, index, Step::Materialize))?;

    let section = build_section(
        host,
        &lookups.geometry_scene,
        &part,
        &comparison.section_plane,
        design.as_str(),
        &comparison.section_style,
    )
    .map_err(at_design(design, index, Step::Section))?;

    info!(
        design = %design,
        index,
        surfaces = part.surfaces.len(),
        section = %section.section,
        "design processed"
    );
    Ok(vec![geometry.display().to_string()])
}
