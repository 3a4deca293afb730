use design_ops::CaptureController;
use sector_types::PathConfig;
use star_host::Host;
use tracing::{info, instrument, warn};

use crate::settings::{AutomationSettings, FailurePolicy};
use crate::types::{at_design, at_step, FlowError, FlowReport, Step};

/// Capture one picture per listed design, each with only that design's
/// displayer visible and the fixed camera applied.
#[instrument(skip_all, fields(pictures = settings.pictures.designs.len()))]
pub fn run_pictures(
    host: &mut dyn Host,
    settings: &AutomationSettings,
    paths: &PathConfig,
    report: &mut FlowReport,
) -> Result<(), FlowError> {
    let pictures = &settings.pictures;

    let outside = settings.pictures_outside_range();
    if !outside.is_empty() {
        let names: Vec<&str> = outside.iter().map(|d| d.as_str()).collect();
        warn!(
            names = %names.join(", "),
            "pictures requested for designs the comparison flow does not create"
        );
    }

    let mut capture = CaptureController::new(
        host,
        &settings.lookups.geometry_scene,
        pictures.camera,
        pictures.image,
    )
    .map_err(at_step(Step::Capture))?;

    let mut failed = Vec::new();
    for (position, design) in pictures.designs.iter().enumerate() {
        let index = position as u32 + 1;
        match capture
            .capture_design(design, &paths.images)
            .map_err(at_design(design, index, Step::Capture))
        {
            Ok(output) => {
                report.record_success(design.as_str(), vec![output.path.display().to_string()]);
            }
            Err(err) => {
                report.record_failure(design.as_str(), &err);
                match pictures.policy {
                    FailurePolicy::Abort => {
                        for rest in &pictures.designs[position + 1..] {
                            report.record_skipped(rest.as_str());
                        }
                        return Err(err);
                    }
                    FailurePolicy::Continue => {
                        warn!(design = %design, error = %err, "picture failed, continuing");
                        failed.push(design.clone());
                    }
                }
            }
        }
    }

    info!(
        captured = pictures.designs.len() - failed.len(),
        failed = failed.len(),
        "pictures finished"
    );
    if failed.is_empty() {
        Ok(())
    } else {
        Err(FlowError::BatchFailed {
            failed,
            total: pictures.designs.len(),
        })
    }
}
