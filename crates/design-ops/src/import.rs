use std::path::Path;

use sector_types::{DesignName, ImportOptions};
use star_host::{BodyId, CadModelId, Host};
use tracing::{debug, info, instrument};

use crate::session::EditSession;
use crate::types::{ImportedDesign, OpError};

/// Names the importer needs to find things in the environment.
#[derive(Debug, Clone, Copy)]
pub struct ImportTarget<'a> {
    /// CAD model the geometry is imported into.
    pub model: &'a str,
    /// Transient scene the edit session is bound to.
    pub scene: &'a str,
    /// Name the imported body carries before it is renamed.
    pub body: &'a str,
}

/// Import one design's geometry file and rename its body to the design name.
///
/// Runs inside its own edit session. Every failure rolls the edit back and
/// removes the transient scene before the error is returned.
#[instrument(skip(host, design, target, options), fields(design = %design))]
pub fn import_design(
    host: &mut dyn Host,
    design: &DesignName,
    geometry: &Path,
    target: &ImportTarget<'_>,
    options: &ImportOptions,
) -> Result<ImportedDesign, OpError> {
    let mut session = EditSession::open(host, target.model, target.scene)?;
    let model = session.model();
    let scene = session.scene();

    let created = session.host().import_cad_file(model, geometry, options)?;
    debug!(bodies = created.len(), path = %geometry.display(), "geometry imported");
    session.host().reset_camera(scene)?;

    let existing = session.host().find_bodies(model, design.as_str())?;
    if !existing.is_empty() {
        return Err(OpError::DuplicateBody {
            model: target.model.to_string(),
            name: design.to_string(),
        });
    }

    let body = single_body(session.host(), model, target.model, target.body)?;
    session.host().rename_body(body, design.as_str())?;
    session.commit()?;

    info!(design = %design, body = %body, "design imported");
    Ok(ImportedDesign {
        design: design.clone(),
        body,
        source: geometry.to_path_buf(),
        imported_bodies: created.len(),
    })
}

/// The one body in `model` named `body_name`.
///
/// Zero matches is a lookup failure and several matches are ambiguous.
pub fn single_body(
    host: &dyn Host,
    model: CadModelId,
    model_name: &str,
    body_name: &str,
) -> Result<BodyId, OpError> {
    let bodies = host.find_bodies(model, body_name)?;
    match bodies.as_slice() {
        [body] => Ok(*body),
        [] => Err(OpError::BodyNotFound {
            model: model_name.to_string(),
            body: body_name.to_string(),
        }),
        many => Err(OpError::AmbiguousBody {
            model: model_name.to_string(),
            body: body_name.to_string(),
            count: many.len(),
        }),
    }
}
