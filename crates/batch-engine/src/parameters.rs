use design_ops::list_parameters;
use star_host::{Host, ScalarParameter};
use tracing::info;

use crate::types::FlowReport;

/// List every scalar global parameter, one report item each.
pub fn run_parameters(host: &dyn Host, report: &mut FlowReport) -> Vec<ScalarParameter> {
    let parameters = list_parameters(host);
    for parameter in &parameters {
        report.record_success(parameter.name.as_str(), Vec::new());
    }
    info!(count = parameters.len(), "parameters listed");
    parameters
}
