use star_host::{Host, ScalarParameter};
use tracing::debug;

/// Every scalar global parameter with its raw value and units.
pub fn list_parameters(host: &dyn Host) -> Vec<ScalarParameter> {
    let parameters = host.scalar_parameters();
    debug!(count = parameters.len(), "scalar parameters listed");
    parameters
}

/// One report line: `Parameter: {name} | Value: {value} | Units: {units}`.
pub fn format_parameter(parameter: &ScalarParameter) -> String {
    format!(
        "Parameter: {} | Value: {:.6} | Units: {}",
        parameter.name,
        parameter.value,
        parameter.units.as_deref().unwrap_or("No Units")
    )
}
