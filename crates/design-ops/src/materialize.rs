use sector_types::FacetingParams;
use star_host::Host;
use tracing::{info, instrument};

use crate::import::single_body;
use crate::types::{MaterializedPart, OpError};

/// Turn the body named `body_name` into a persisted, tessellated part of the
/// same name.
///
/// Parts are created once: an existing part with that name is an error
/// rather than being replaced.
#[instrument(skip(host, faceting))]
pub fn materialize(
    host: &mut dyn Host,
    model_name: &str,
    body_name: &str,
    faceting: &FacetingParams,
) -> Result<MaterializedPart, OpError> {
    let model = host.find_cad_model(model_name)?;

    match host.find_part(body_name) {
        Ok(_) => {
            return Err(OpError::PartAlreadyExists {
                name: body_name.to_string(),
            })
        }
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(err.into()),
    }

    let body = single_body(host, model, model_name, body_name)?;
    let part = host.create_part(model, body, faceting)?;

    // The environment names parts after their body; confirm before use.
    let found = host.find_part(body_name)?;
    if found != part {
        return Err(OpError::invariant(format!(
            "part {body_name:?} resolved to {found}, expected {part}"
        )));
    }

    let surfaces = host.part_surfaces(part)?;
    info!(part = body_name, surfaces = surfaces.len(), "part materialized");
    Ok(MaterializedPart {
        name: body_name.to_string(),
        part,
        surfaces,
    })
}
